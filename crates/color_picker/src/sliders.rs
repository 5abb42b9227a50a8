use crate::coalesce::{FrameCoalescer, FrameTicket};
use crate::color::{HslaColor, RgbaColor};
use crate::paint::{
    paint_checkerboard, paint_gradient, paint_outline, paint_triangle, to_window, to_window_bounds,
};
use crate::sliders_layout::{SliderChannel, SlidersLayout, sizing};
use gpui::{prelude::*, *};
use gpui_component::PixelsExt as _;

#[derive(Clone, Debug, PartialEq)]
pub enum ColorSlidersEvent {
    Change(HslaColor),
    Release(HslaColor),
}

/// Four horizontal tracks for hue, saturation, lightness and alpha.
pub struct ColorSlidersState {
    pub id: SharedString,
    color: HslaColor,
    layout: SlidersLayout,
    bounds: Bounds<Pixels>,
    active: Option<SliderChannel>,
    pending: FrameCoalescer<f32>,
}

impl ColorSlidersState {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            color: HslaColor::default(),
            layout: SlidersLayout::default(),
            bounds: Bounds::default(),
            active: None,
            pending: FrameCoalescer::new(),
        }
    }

    pub fn with_color(mut self, color: HslaColor) -> Self {
        self.color = color;
        self
    }

    pub fn layout(mut self, layout: SlidersLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn color(&self) -> HslaColor {
        self.color
    }

    pub fn sliders_layout(&self) -> &SlidersLayout {
        &self.layout
    }

    /// The channel being dragged, if any.
    pub fn active_channel(&self) -> Option<SliderChannel> {
        self.active
    }

    pub fn set_color(&mut self, color: HslaColor, cx: &mut Context<Self>) {
        if self.color != color {
            self.color = color;
            cx.notify();
        }
    }

    pub fn set_hue(&mut self, hue: f32, cx: &mut Context<Self>) {
        self.set_color(self.color.with_hue(hue), cx);
    }

    pub fn set_saturation(&mut self, saturation: f32, cx: &mut Context<Self>) {
        self.set_color(self.color.with_saturation(saturation), cx);
    }

    pub fn set_lightness(&mut self, lightness: f32, cx: &mut Context<Self>) {
        self.set_color(self.color.with_lightness(lightness), cx);
    }

    pub fn set_alpha(&mut self, alpha: f32, cx: &mut Context<Self>) {
        self.set_color(self.color.with_alpha(alpha), cx);
    }

    pub fn hsla_string(&self) -> String {
        self.color.hsla_string()
    }

    pub fn rgba(&self) -> RgbaColor {
        self.color.to_rgba()
    }

    pub fn rgba_string(&self) -> String {
        self.color.rgba_string()
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    fn local_position(&self, position: Point<Pixels>) -> Point<f32> {
        point(
            (position.x - self.bounds.origin.x).as_f32(),
            (position.y - self.bounds.origin.y).as_f32(),
        )
    }

    /// Selects the track under `local` and applies its x position right away.
    pub(crate) fn press(&mut self, local: Point<f32>) -> Option<ColorSlidersEvent> {
        let channel = self.layout.channel_at(local.y)?;
        tracing::trace!(channel = channel.label(), "color slider drag started");
        self.active = Some(channel);
        self.pending.cancel();
        Some(self.apply_x(channel, local.x))
    }

    pub(crate) fn queue_move(&mut self, x: f32) -> Option<FrameTicket> {
        self.active?;
        self.pending.push(x)
    }

    pub(crate) fn flush_move(&mut self, ticket: FrameTicket) -> Option<ColorSlidersEvent> {
        let channel = self.active?;
        let x = self.pending.flush(ticket)?;
        Some(self.apply_x(channel, x))
    }

    pub(crate) fn release(&mut self) -> Option<ColorSlidersEvent> {
        self.active.take()?;
        self.pending.cancel();
        Some(ColorSlidersEvent::Release(self.color))
    }

    fn apply_x(&mut self, channel: SliderChannel, x: f32) -> ColorSlidersEvent {
        let fraction = self.layout.fraction_at(x);
        self.color = self.layout.apply(channel, fraction, self.color);
        ColorSlidersEvent::Change(self.color)
    }

    pub(crate) fn begin_drag(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) -> bool {
        let local = self.local_position(position);
        let Some(event) = self.press(local) else {
            return false;
        };

        cx.emit(event);
        cx.notify();
        true
    }

    pub(crate) fn handle_active_move(
        &mut self,
        position: Point<Pixels>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let x = self.local_position(position).x;
        if let Some(ticket) = self.queue_move(x) {
            cx.on_next_frame(window, move |this, _, cx| {
                if let Some(event) = this.flush_move(ticket) {
                    cx.emit(event);
                    cx.notify();
                }
            });
        }
    }

    pub(crate) fn handle_pointer_release(&mut self, cx: &mut Context<Self>) {
        if let Some(event) = self.release() {
            cx.emit(event);
            cx.notify();
        }
    }
}

impl EventEmitter<ColorSlidersEvent> for ColorSlidersState {}

impl Render for ColorSlidersState {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        ColorSliders::new(&cx.entity())
    }
}

#[derive(IntoElement)]
pub struct ColorSliders {
    state: Entity<ColorSlidersState>,
}

impl ColorSliders {
    pub fn new(state: &Entity<ColorSlidersState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    fn paint_tracks(
        bounds: Bounds<Pixels>,
        layout: SlidersLayout,
        color: HslaColor,
        window: &mut Window,
    ) {
        let origin = bounds.origin;
        for channel in SliderChannel::ALL {
            let track = to_window_bounds(origin, layout.track_bounds(channel));
            if channel == SliderChannel::Alpha {
                paint_checkerboard(window, track, px(sizing::CHECKER_SIZE));
            }
            paint_gradient(window, track, &layout.gradient_stops(channel, &color));
            paint_outline(window, track, black());

            let (above, below) = layout.pointer_triangles(channel, &color);
            paint_triangle(window, above.map(|p| to_window(origin, p)), black());
            paint_triangle(window, below.map(|p| to_window(origin, p)), white());
        }
    }
}

impl RenderOnce for ColorSliders {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = self.state.read(cx);
        let layout = state.layout;
        let color = state.color;
        let (width, height) = layout.canvas_size();

        div()
            .id(state.id.clone())
            .relative()
            .flex_none()
            .w(px(width))
            .h(px(height))
            .child(
                canvas(
                    {
                        let state = self.state.clone();
                        move |bounds, window, cx| {
                            state.update(cx, |state, _| state.bounds = bounds);
                            window.insert_hitbox(bounds, HitboxBehavior::Normal)
                        }
                    },
                    {
                        let state = self.state.clone();
                        move |bounds, hitbox: Hitbox, window, cx| {
                            Self::paint_tracks(bounds, layout, color, window);
                            if hitbox.is_hovered(window) || state.read(cx).active_channel().is_some() {
                                window.set_cursor_style(CursorStyle::PointingHand, &hitbox);
                            }

                            window.on_mouse_event({
                                let state = state.clone();
                                move |ev: &MouseMoveEvent, phase, window, cx| {
                                    if !phase.bubble() {
                                        return;
                                    }
                                    state.update(cx, |state, cx| {
                                        state.handle_active_move(ev.position, window, cx);
                                    });
                                }
                            });

                            window.on_mouse_event({
                                let state = state.clone();
                                move |_: &MouseUpEvent, phase, _, cx| {
                                    if !phase.bubble() {
                                        return;
                                    }
                                    state.update(cx, |state, cx| state.handle_pointer_release(cx));
                                }
                            });
                        }
                    },
                )
                .absolute()
                .inset_0(),
            )
            .on_mouse_down(
                MouseButton::Left,
                window.listener_for(
                    &self.state,
                    |state: &mut ColorSlidersState,
                     ev: &MouseDownEvent,
                     _: &mut Window,
                     cx: &mut Context<ColorSlidersState>| {
                        if state.begin_drag(ev.position, cx) {
                            cx.stop_propagation();
                        }
                    },
                ),
            )
    }
}
