use crate::color::HslaColor;
use gpui::{
    BorderStyle, Bounds, Corners, Edges, Hsla, PaintQuad, PathBuilder, Pixels, Point, Window,
    fill, hsla, linear_color_stop, linear_gradient, point, px, size, transparent_black,
};

const CHECKER_LIGHT: f32 = 1.0;
const CHECKER_DARK: f32 = 0.8;

/// Converts a point in widget-local coordinates to window coordinates.
pub(crate) fn to_window(origin: Point<Pixels>, local: Point<f32>) -> Point<Pixels> {
    point(origin.x + px(local.x), origin.y + px(local.y))
}

pub(crate) fn to_window_bounds(origin: Point<Pixels>, local: Bounds<f32>) -> Bounds<Pixels> {
    Bounds::new(
        to_window(origin, local.origin),
        size(px(local.size.width), px(local.size.height)),
    )
}

pub(crate) fn paint_ring_marker(
    window: &mut Window,
    center: Point<Pixels>,
    radius: Pixels,
    stroke: Pixels,
    color: Hsla,
) {
    window.paint_quad(PaintQuad {
        bounds: Bounds::new(
            point(center.x - radius, center.y - radius),
            size(radius * 2.0, radius * 2.0),
        ),
        corner_radii: Corners::all(radius),
        background: transparent_black().into(),
        border_widths: Edges::all(stroke),
        border_color: color,
        border_style: BorderStyle::default(),
    });
}

pub(crate) fn paint_outline(window: &mut Window, bounds: Bounds<Pixels>, color: Hsla) {
    window.paint_quad(PaintQuad {
        bounds,
        corner_radii: Corners::default(),
        background: transparent_black().into(),
        border_widths: Edges::all(px(1.0)),
        border_color: color,
        border_style: BorderStyle::default(),
    });
}

pub(crate) fn paint_checkerboard(window: &mut Window, bounds: Bounds<Pixels>, cell: Pixels) {
    window.paint_quad(fill(bounds, hsla(0.0, 0.0, CHECKER_LIGHT, 1.0)));
    if cell <= px(0.0) {
        return;
    }

    let dark = hsla(0.0, 0.0, CHECKER_DARK, 1.0);
    let right = bounds.origin.x + bounds.size.width;
    let bottom = bounds.origin.y + bounds.size.height;
    let mut row = 0;
    let mut y = bounds.origin.y;
    while y < bottom {
        let mut col = 0;
        let mut x = bounds.origin.x;
        while x < right {
            if (row + col) % 2 == 1 {
                let width = if right - x < cell { right - x } else { cell };
                let height = if bottom - y < cell { bottom - y } else { cell };
                window.paint_quad(fill(Bounds::new(point(x, y), size(width, height)), dark));
            }
            x += cell;
            col += 1;
        }
        y += cell;
        row += 1;
    }
}

/// Horizontal multi-stop gradient, painted as one two-stop band per stop pair.
pub(crate) fn paint_gradient(
    window: &mut Window,
    bounds: Bounds<Pixels>,
    stops: &[(f32, HslaColor)],
) {
    for pair in stops.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        let band = Bounds::new(
            point(bounds.origin.x + bounds.size.width * start, bounds.origin.y),
            size(bounds.size.width * (end - start), bounds.size.height),
        );
        window.paint_quad(fill(
            band,
            linear_gradient(
                90.0,
                linear_color_stop(Hsla::from(from), 0.0),
                linear_color_stop(Hsla::from(to), 1.0),
            ),
        ));
    }
}

pub(crate) fn paint_triangle(window: &mut Window, points: [Point<Pixels>; 3], color: Hsla) {
    let mut builder = PathBuilder::fill();
    builder.move_to(points[0]);
    builder.line_to(points[1]);
    builder.line_to(points[2]);
    builder.close();
    match builder.build() {
        Ok(path) => window.paint_path(path, color),
        Err(err) => tracing::warn!("failed to build pointer path: {err:?}"),
    }
}
