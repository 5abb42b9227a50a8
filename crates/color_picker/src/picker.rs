use crate::coalesce::{FrameCoalescer, FrameTicket};
use crate::color::{HslaColor, RgbaColor};
use crate::layout::{DragTarget, RingLayout, sizing};
use crate::paint::{paint_ring_marker, to_window, to_window_bounds};
use crate::raster::RingLayers;
use gpui::{prelude::*, *};
use gpui_component::{ActiveTheme as _, PixelsExt as _, v_flex};
use std::sync::Arc;

const ALPHA_TRACK_OPACITY: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub enum ColorPickerEvent {
    /// Emitted for every pointer update applied while dragging.
    Change(HslaColor),
    /// Emitted once when the pointer is released after a drag.
    Release(HslaColor),
}

/// Hue ring with a saturation/lightness square and an alpha bar.
pub struct ColorPickerState {
    pub id: SharedString,
    color: HslaColor,
    layout: RingLayout,
    show_readout: bool,
    bounds: Bounds<Pixels>,
    drag: Option<DragTarget>,
    pending: FrameCoalescer<Point<f32>>,
    layers: RingLayers,
}

impl ColorPickerState {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            color: HslaColor::default(),
            layout: RingLayout::default(),
            show_readout: true,
            bounds: Bounds::default(),
            drag: None,
            pending: FrameCoalescer::new(),
            layers: RingLayers::default(),
        }
    }

    pub fn with_color(mut self, color: HslaColor) -> Self {
        self.color = color;
        self
    }

    pub fn layout(mut self, layout: RingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Show the `H: .., S: .., L: .., A: ..` line under the canvas, default: true
    pub fn readout(mut self, show_readout: bool) -> Self {
        self.show_readout = show_readout;
        self
    }

    pub fn color(&self) -> HslaColor {
        self.color
    }

    pub fn ring_layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
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

    /// Starts a drag at a canvas-local position and applies it right away.
    pub(crate) fn press(&mut self, local: Point<f32>) -> Option<ColorPickerEvent> {
        let target = self.layout.hit_test(local)?;
        tracing::trace!(?target, "color picker drag started");
        self.drag = Some(target);
        self.pending.cancel();
        Some(self.apply_position(target, local))
    }

    /// Keeps the latest position of a drag; returns a ticket when a frame must be scheduled.
    pub(crate) fn queue_move(&mut self, local: Point<f32>) -> Option<FrameTicket> {
        self.drag?;
        self.pending.push(local)
    }

    pub(crate) fn flush_move(&mut self, ticket: FrameTicket) -> Option<ColorPickerEvent> {
        let target = self.drag?;
        let position = self.pending.flush(ticket)?;
        Some(self.apply_position(target, position))
    }

    pub(crate) fn release(&mut self) -> Option<ColorPickerEvent> {
        self.drag.take()?;
        self.pending.cancel();
        tracing::trace!(color = %self.color.hsla_string(), "color picker drag released");
        Some(ColorPickerEvent::Release(self.color))
    }

    fn apply_position(&mut self, target: DragTarget, position: Point<f32>) -> ColorPickerEvent {
        self.color = self.layout.apply(target, position, self.color);
        ColorPickerEvent::Change(self.color)
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
        let local = self.local_position(position);
        if let Some(ticket) = self.queue_move(local) {
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

    fn background_images(&mut self) -> (Option<Arc<Image>>, Option<Arc<Image>>) {
        let layout = self.layout;
        (
            self.layers.hue_ring(&layout),
            self.layers.saturation_lightness(&layout, self.color.hue()),
        )
    }
}

impl EventEmitter<ColorPickerEvent> for ColorPickerState {}

impl Render for ColorPickerState {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        ColorPicker::new(&cx.entity())
    }
}

/// Element rendering a [`ColorPickerState`].
#[derive(IntoElement)]
pub struct ColorPicker {
    state: Entity<ColorPickerState>,
}

impl ColorPicker {
    pub fn new(state: &Entity<ColorPickerState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    fn paint_indicators(
        bounds: Bounds<Pixels>,
        layout: RingLayout,
        color: HslaColor,
        window: &mut Window,
    ) {
        let origin = bounds.origin;

        paint_ring_marker(
            window,
            to_window(origin, layout.hue_marker(color.hue())),
            px(layout.hue_marker_radius),
            px(sizing::HUE_MARKER_STROKE),
            black(),
        );
        paint_ring_marker(
            window,
            to_window(
                origin,
                layout.saturation_lightness_marker(color.saturation(), color.lightness()),
            ),
            px(layout.sl_marker_radius),
            px(sizing::SL_MARKER_STROKE),
            black(),
        );

        let track = layout.alpha_bounds();
        window.paint_quad(fill(
            to_window_bounds(origin, track),
            black().opacity(ALPHA_TRACK_OPACITY),
        ));

        let handle = Bounds::new(
            point(track.origin.x, layout.alpha_handle_top(color.alpha())),
            size(track.size.width, layout.alpha_handle_height),
        );
        window.paint_quad(fill(to_window_bounds(origin, handle), black()));
    }

    fn with_global_mouse_watch(root: Div, state: Entity<ColorPickerState>) -> Div {
        root.child(
            canvas(
                {
                    let state = state.clone();
                    move |bounds, window, cx| {
                        state.update(cx, |state, _| state.bounds = bounds);
                        window.insert_hitbox(bounds, HitboxBehavior::Normal)
                    }
                },
                move |_, hitbox: Hitbox, window, cx| {
                    if hitbox.is_hovered(window) || state.read(cx).is_dragging() {
                        window.set_cursor_style(CursorStyle::Crosshair, &hitbox);
                    }

                    // Keep dragging when the pointer leaves the canvas.
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
                },
            )
            .absolute()
            .inset_0(),
        )
    }
}

impl RenderOnce for ColorPicker {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let (ring_image, square_image) = self
            .state
            .update(cx, |state, _| state.background_images());
        let state = self.state.read(cx);
        let layout = state.layout;
        let color = state.color;
        let square = layout.square_bounds();
        let readout = state.show_readout.then(|| color.readout());

        let canvas_root = div()
            .relative()
            .flex_none()
            .w(px(layout.width))
            .h(px(layout.height))
            .when_some(ring_image, |this, image| {
                this.child(img(image).absolute().top_0().left_0().size_full())
            })
            .when_some(square_image, |this, image| {
                this.child(
                    img(image)
                        .absolute()
                        .left(px(square.origin.x))
                        .top(px(square.origin.y))
                        .w(px(square.size.width))
                        .h(px(square.size.height)),
                )
            })
            .child(
                canvas(
                    |_, _, _| (),
                    move |bounds, _, window, _| {
                        Self::paint_indicators(bounds, layout, color, window)
                    },
                )
                .absolute()
                .inset_0(),
            )
            .on_mouse_down(
                MouseButton::Left,
                window.listener_for(
                    &self.state,
                    |state: &mut ColorPickerState,
                     ev: &MouseDownEvent,
                     _: &mut Window,
                     cx: &mut Context<ColorPickerState>| {
                        if state.begin_drag(ev.position, cx) {
                            cx.stop_propagation();
                        }
                    },
                ),
            );
        let canvas_root = Self::with_global_mouse_watch(canvas_root, self.state.clone());

        v_flex()
            .id(state.id.clone())
            .gap_2()
            .child(canvas_root)
            .when_some(readout, |this, readout| {
                this.child(
                    div()
                        .text_sm()
                        .font_family(cx.theme().mono_font_family.clone())
                        .text_color(cx.theme().muted_foreground)
                        .child(readout),
                )
            })
    }
}
