use crate::color::HslaColor;
use crate::paint::paint_checkerboard;
use gpui::{prelude::*, *};
use gpui_component::ActiveTheme as _;

const DEFAULT_SWATCH_SIZE: f32 = 32.0;
const CHECKER_SIZE: f32 = 6.0;

/// A sample of a color drawn over a checkerboard, so transparency stays visible.
#[derive(IntoElement)]
pub struct ColorSwatch {
    color: HslaColor,
    size: Pixels,
}

impl ColorSwatch {
    pub fn new(color: HslaColor) -> Self {
        Self {
            color,
            size: px(DEFAULT_SWATCH_SIZE),
        }
    }

    pub fn size(mut self, size: impl Into<Pixels>) -> Self {
        self.size = size.into();
        self
    }
}

impl RenderOnce for ColorSwatch {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let color: Hsla = self.color.into();

        div()
            .flex_none()
            .size(self.size)
            .overflow_hidden()
            .rounded(px(4.))
            .border_1()
            .border_color(cx.theme().border)
            .child(
                canvas(
                    |_, _, _| (),
                    move |bounds, _, window, _| {
                        paint_checkerboard(window, bounds, px(CHECKER_SIZE));
                        window.paint_quad(fill(bounds, color));
                    },
                )
                .size_full(),
            )
    }
}
