use crate::color::{HslaColor, RgbaColor};
use crate::picker::{ColorPickerEvent, ColorPickerState};
use crate::sliders::{ColorSlidersEvent, ColorSlidersState};
use crate::swatch::ColorSwatch;
use gpui::{prelude::*, *};
use gpui_component::{
    ActiveTheme as _, WindowExt as _,
    dialog::DialogButtonProps,
    h_flex,
    input::{Input, InputEvent, InputState},
    v_flex,
};
use std::rc::Rc;

pub const DEFAULT_HEX: &str = "#ff0000";
const DEFAULT_TITLE: &str = "Color Picker";
const DIALOG_WIDTH: f32 = 420.0;
const HEX_INPUT_WIDTH: f32 = 120.0;

/// Which widget the dialog hosts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorPickerVariant {
    #[default]
    Ring,
    Sliders,
}

/// Snapshot of the dialog color handed to the callbacks.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorChange {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
    /// Lowercase `#rrggbb`.
    pub hex: String,
    pub rgba: RgbaColor,
}

impl From<HslaColor> for ColorChange {
    fn from(color: HslaColor) -> Self {
        Self {
            hue: color.hue(),
            saturation: color.saturation(),
            lightness: color.lightness(),
            alpha: color.alpha(),
            hex: color.to_hex(),
            rgba: color.to_rgba(),
        }
    }
}

impl ColorChange {
    pub fn color(&self) -> HslaColor {
        HslaColor::new(self.hue, self.saturation, self.lightness, self.alpha)
    }

    /// `HEX: #rrggbb  RGBA: rgba(r,g,b,a.aa)`
    pub fn info_line(&self) -> String {
        format!("HEX: {}  RGBA: {}", self.hex, self.rgba.css_fixed())
    }
}

type ChangeHandler = Rc<dyn Fn(&ColorChange, &mut Window, &mut App)>;
type CloseHandler = Rc<dyn Fn(bool, &mut Window, &mut App)>;

pub struct ColorPickerDialogOptions {
    hex: SharedString,
    alpha: f32,
    variant: ColorPickerVariant,
    title: SharedString,
    on_change: Option<ChangeHandler>,
    on_ok: Option<ChangeHandler>,
    on_close: Option<CloseHandler>,
}

impl Default for ColorPickerDialogOptions {
    fn default() -> Self {
        Self {
            hex: DEFAULT_HEX.into(),
            alpha: 1.0,
            variant: ColorPickerVariant::default(),
            title: DEFAULT_TITLE.into(),
            on_change: None,
            on_ok: None,
            on_close: None,
        }
    }
}

impl ColorPickerDialogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial color as `#RRGGBB`, default: `#ff0000`
    pub fn hex(mut self, hex: impl Into<SharedString>) -> Self {
        self.hex = hex.into();
        self
    }

    /// Initial alpha, default: 1.0
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn variant(mut self, variant: ColorPickerVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }

    /// Called when the dialog opens, after each drag release and after each valid hex entry.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&ColorChange, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    /// Called with the final color when OK is pressed, before the dialog closes.
    pub fn on_ok(mut self, on_ok: impl Fn(&ColorChange, &mut Window, &mut App) + 'static) -> Self {
        self.on_ok = Some(Rc::new(on_ok));
        self
    }

    /// Called after the dialog closes with `true` when it was confirmed.
    pub fn on_close(mut self, on_close: impl Fn(bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_close = Some(Rc::new(on_close));
        self
    }

    /// The color the widget starts with.
    ///
    /// An invalid hex keeps the widget default and ignores the alpha option too.
    pub fn initial_color(&self) -> HslaColor {
        match HslaColor::parse_hex(&self.hex) {
            Ok(color) => color.with_alpha(self.alpha),
            Err(err) => {
                tracing::debug!("ignoring initial color {:?}: {err}", self.hex);
                HslaColor::default()
            }
        }
    }
}

/// Tracks the open color picker dialog so a second one is not stacked on top.
#[derive(Default)]
struct OpenColorPickerDialog(Option<WeakEntity<ColorPickerDialogView>>);

impl Global for OpenColorPickerDialog {}

impl OpenColorPickerDialog {
    fn is_open(cx: &App) -> bool {
        cx.try_global::<Self>()
            .and_then(|open| open.0.as_ref())
            .is_some_and(|view| view.upgrade().is_some())
    }

    fn set(view: Option<WeakEntity<ColorPickerDialogView>>, cx: &mut App) {
        cx.set_global(Self(view));
    }
}

enum DialogWidget {
    Ring(Entity<ColorPickerState>),
    Sliders(Entity<ColorSlidersState>),
}

impl DialogWidget {
    fn color(&self, cx: &App) -> HslaColor {
        match self {
            DialogWidget::Ring(picker) => picker.read(cx).color(),
            DialogWidget::Sliders(sliders) => sliders.read(cx).color(),
        }
    }

    fn set_color(&self, color: HslaColor, cx: &mut App) {
        match self {
            DialogWidget::Ring(picker) => picker.update(cx, |picker, cx| picker.set_color(color, cx)),
            DialogWidget::Sliders(sliders) => {
                sliders.update(cx, |sliders, cx| sliders.set_color(color, cx))
            }
        }
    }
}

/// Content of the color picker dialog: the widget, a swatch, the hex input and the info line.
pub struct ColorPickerDialogView {
    widget: DialogWidget,
    hex_input: Entity<InputState>,
    hex_input_programmatic_update: bool,
    info: SharedString,
    confirmed: bool,
    on_change: Option<ChangeHandler>,
    on_ok: Option<ChangeHandler>,
    _subscriptions: Vec<Subscription>,
}

impl ColorPickerDialogView {
    fn new(options: &ColorPickerDialogOptions, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let initial = options.initial_color();
        let mut _subscriptions = Vec::new();

        let widget = match options.variant {
            ColorPickerVariant::Ring => {
                let picker =
                    cx.new(|_| ColorPickerState::new("color-picker-dialog-ring").with_color(initial));
                _subscriptions.push(cx.subscribe_in(
                    &picker,
                    window,
                    |this, _, event: &ColorPickerEvent, window, cx| match event {
                        ColorPickerEvent::Change(_) => cx.notify(),
                        ColorPickerEvent::Release(_) => this.refresh(window, cx),
                    },
                ));
                DialogWidget::Ring(picker)
            }
            ColorPickerVariant::Sliders => {
                let sliders = cx.new(|_| {
                    ColorSlidersState::new("color-picker-dialog-sliders").with_color(initial)
                });
                _subscriptions.push(cx.subscribe_in(
                    &sliders,
                    window,
                    |this, _, event: &ColorSlidersEvent, window, cx| match event {
                        ColorSlidersEvent::Change(_) => cx.notify(),
                        ColorSlidersEvent::Release(_) => this.refresh(window, cx),
                    },
                ));
                DialogWidget::Sliders(sliders)
            }
        };

        let hex_input = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("#RRGGBB")
                .default_value(initial.to_hex())
        });
        _subscriptions.push(cx.subscribe_in(
            &hex_input,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if matches!(event, InputEvent::PressEnter { .. } | InputEvent::Blur) {
                    this.commit_hex(window, cx);
                }
            },
        ));

        Self {
            widget,
            hex_input,
            hex_input_programmatic_update: false,
            info: ColorChange::from(initial).info_line().into(),
            confirmed: false,
            on_change: options.on_change.clone(),
            on_ok: options.on_ok.clone(),
            _subscriptions,
        }
    }

    pub fn color(&self, cx: &App) -> HslaColor {
        self.widget.color(cx)
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Syncs the hex input and info line to the widget and reports the color.
    fn refresh(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let change = ColorChange::from(self.widget.color(cx));
        self.info = change.info_line().into();
        self.sync_hex_input(&change.hex, window, cx);
        if let Some(on_change) = self.on_change.clone() {
            on_change(&change, window, cx);
        }
        cx.notify();
    }

    fn sync_hex_input(&mut self, hex: &str, window: &mut Window, cx: &mut Context<Self>) {
        if self.hex_input.read(cx).value().to_string() == hex {
            return;
        }

        self.hex_input_programmatic_update = true;
        let hex = SharedString::from(hex.to_string());
        self.hex_input.update(cx, |input, cx| input.set_value(hex, window, cx));
        self.hex_input_programmatic_update = false;
    }

    fn commit_hex(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.hex_input_programmatic_update {
            return;
        }

        let value = self.hex_input.read(cx).value().to_string();
        let Some(next) = apply_hex_input(self.widget.color(cx), &value) else {
            tracing::trace!("hex input {value:?} left the color unchanged");
            return;
        };

        self.widget.set_color(next, cx);
        self.refresh(window, cx);
    }

    /// Commits the hex field, reports the color to `on_ok`, then refreshes once more.
    fn confirm(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.commit_hex(window, cx);
        self.confirmed = true;

        let change = ColorChange::from(self.widget.color(cx));
        tracing::debug!(hex = %change.hex, alpha = change.alpha, "color picker dialog confirmed");
        if let Some(on_ok) = self.on_ok.clone() {
            on_ok(&change, window, cx);
        }
        self.refresh(window, cx);
    }
}

/// The color after committing `input` over `current`, keeping alpha.
///
/// `None` when the input is invalid or already matches the current hex.
fn apply_hex_input(current: HslaColor, input: &str) -> Option<HslaColor> {
    let next = current.with_hex(input)?;
    (next.to_hex() != current.to_hex()).then_some(next)
}

impl Render for ColorPickerDialogView {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let color = self.widget.color(cx);
        let widget = match &self.widget {
            DialogWidget::Ring(picker) => picker.clone().into_any_element(),
            DialogWidget::Sliders(sliders) => sliders.clone().into_any_element(),
        };

        v_flex()
            .gap_3()
            .items_center()
            .child(widget)
            .child(
                h_flex()
                    .w_full()
                    .gap_2()
                    .items_center()
                    .child(ColorSwatch::new(color))
                    .child(Input::new(&self.hex_input).w(px(HEX_INPUT_WIDTH))),
            )
            .child(
                div()
                    .w_full()
                    .text_sm()
                    .font_family(cx.theme().mono_font_family.clone())
                    .text_color(cx.theme().muted_foreground)
                    .child(self.info.clone()),
            )
    }
}

/// A modal dialog hosting a [`ColorPickerState`] or [`ColorSlidersState`].
pub struct ColorPickerDialog;

impl ColorPickerDialog {
    /// Opens the dialog in `window`.
    ///
    /// Returns `None` without opening anything while another color picker dialog is open.
    pub fn open(
        options: ColorPickerDialogOptions,
        window: &mut Window,
        cx: &mut App,
    ) -> Option<Entity<ColorPickerDialogView>> {
        if OpenColorPickerDialog::is_open(cx) {
            tracing::debug!("color picker dialog already open");
            return None;
        }

        let view = cx.new(|cx| ColorPickerDialogView::new(&options, window, cx));
        OpenColorPickerDialog::set(Some(view.downgrade()), cx);
        view.update(cx, |view, cx| view.refresh(window, cx));
        tracing::debug!(variant = ?options.variant, "opening color picker dialog");

        let title = options.title.clone();
        let on_close = options.on_close.clone();
        let content = view.clone();
        window.open_dialog(cx, move |dialog, _, _| {
            dialog
                .title(title.clone())
                .width(px(DIALOG_WIDTH))
                .child(content.clone())
                .confirm()
                .overlay_closable(true)
                .button_props(
                    DialogButtonProps::default()
                        .ok_text("OK")
                        .cancel_text("Cancel"),
                )
                .on_ok({
                    let content = content.clone();
                    move |_, window, cx| {
                        content.update(cx, |view, cx| view.confirm(window, cx));
                        true
                    }
                })
                .on_close({
                    let content = content.clone();
                    let on_close = on_close.clone();
                    move |_, window, cx| {
                        let confirmed = content.read(cx).is_confirmed();
                        OpenColorPickerDialog::set(None, cx);
                        if let Some(on_close) = &on_close {
                            on_close(confirmed, window, cx);
                        }
                    }
                })
        });

        Some(view)
    }

    pub fn is_open(cx: &App) -> bool {
        OpenColorPickerDialog::is_open(cx)
    }
}
