use gpui::{prelude::*, *};
use gpui_color_picker::{
    ColorChange, ColorPickerDialog, ColorPickerDialogOptions, ColorPickerEvent, ColorPickerState,
    ColorPickerVariant, ColorSlidersEvent, ColorSlidersState, ColorSwatch, HslaColor,
};
use gpui_component::{
    ActiveTheme as _, Root,
    button::{Button, ButtonVariants as _},
    h_flex, v_flex,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

struct ColorPickerStory {
    picker: Entity<ColorPickerState>,
    sliders: Entity<ColorSlidersState>,
    chosen: Option<ColorChange>,
    _subscriptions: Vec<Subscription>,
}

impl ColorPickerStory {
    fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let picker = cx.new(|_| ColorPickerState::new("story-ring-picker"));
        let sliders = cx.new(|_| ColorSlidersState::new("story-sliders"));

        let mut _subscriptions = Vec::new();
        _subscriptions.push(cx.subscribe_in(
            &picker,
            window,
            |this, _, event: &ColorPickerEvent, _, cx| match event {
                ColorPickerEvent::Change(color) => {
                    this.sliders
                        .update(cx, |sliders, cx| sliders.set_color(*color, cx));
                    cx.notify();
                }
                ColorPickerEvent::Release(color) => {
                    tracing::info!(hsla = %color.hsla_string(), "ring picker released");
                }
            },
        ));
        _subscriptions.push(cx.subscribe_in(
            &sliders,
            window,
            |this, _, event: &ColorSlidersEvent, _, cx| match event {
                ColorSlidersEvent::Change(color) => {
                    this.picker
                        .update(cx, |picker, cx| picker.set_color(*color, cx));
                    cx.notify();
                }
                ColorSlidersEvent::Release(color) => {
                    tracing::info!(hsla = %color.hsla_string(), "sliders released");
                }
            },
        ));

        Self {
            picker,
            sliders,
            chosen: None,
            _subscriptions,
        }
    }

    fn set_color(&mut self, color: HslaColor, cx: &mut Context<Self>) {
        self.picker.update(cx, |picker, cx| picker.set_color(color, cx));
        self.sliders
            .update(cx, |sliders, cx| sliders.set_color(color, cx));
        cx.notify();
    }

    fn open_dialog(
        &mut self,
        variant: ColorPickerVariant,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let current = self.picker.read(cx).color();
        let story = cx.entity().downgrade();
        let options = ColorPickerDialogOptions::new()
            .hex(current.to_hex())
            .alpha(current.alpha())
            .variant(variant)
            .on_change(|change, _, _| {
                tracing::debug!(hex = %change.hex, alpha = change.alpha, "dialog color changed");
            })
            .on_ok(move |change, _, cx| {
                let change = change.clone();
                let _ = story.update(cx, |this, cx| {
                    this.set_color(change.color(), cx);
                    this.chosen = Some(change);
                });
            })
            .on_close(|confirmed, _, _| {
                tracing::info!(confirmed, "color picker dialog closed");
            });

        if ColorPickerDialog::open(options, window, cx).is_none() {
            tracing::warn!("a color picker dialog is already open");
        }
    }
}

impl Render for ColorPickerStory {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let picker = self.picker.read(cx);
        let color = picker.color();
        let summary = format!(
            "{}  {}  {}",
            picker.hex(),
            picker.rgba_string(),
            picker.hsla_string()
        );
        let chosen = self
            .chosen
            .as_ref()
            .map(|change| format!("Last confirmed: {}", change.info_line()))
            .unwrap_or_else(|| "No color confirmed yet".to_string());

        v_flex()
            .size_full()
            .p_6()
            .gap_4()
            .bg(cx.theme().background)
            .child(
                h_flex()
                    .gap_6()
                    .items_start()
                    .child(self.picker.clone())
                    .child(self.sliders.clone()),
            )
            .child(
                h_flex()
                    .gap_3()
                    .items_center()
                    .child(ColorSwatch::new(color).size(px(40.)))
                    .child(div().text_sm().child(summary)),
            )
            .child(
                h_flex()
                    .gap_2()
                    .child(
                        Button::new("open-ring-dialog")
                            .primary()
                            .label("Ring dialog")
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.open_dialog(ColorPickerVariant::Ring, window, cx)
                            })),
                    )
                    .child(
                        Button::new("open-sliders-dialog")
                            .label("Sliders dialog")
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.open_dialog(ColorPickerVariant::Sliders, window, cx)
                            })),
                    )
                    .child(
                        Button::new("reset-color")
                            .label("Reset")
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.set_color(HslaColor::default(), cx)
                            })),
                    ),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(chosen),
            )
    }
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env();
    let filter = match "gpui_color_picker=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() {
    Application::new().run(|cx: &mut App| {
        init_tracing();
        gpui_component::init(cx);
        cx.activate(true);

        let window_bounds = Bounds::centered(None, size(px(760.), px(640.)), cx);
        cx.spawn(async move |cx| {
            cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(window_bounds)),
                    ..Default::default()
                },
                |window, cx| {
                    let view = cx.new(|cx| ColorPickerStory::new(window, cx));
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });
}
