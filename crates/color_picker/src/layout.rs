use crate::color::{HUE_MAX, HslaColor, PERCENT_MAX};
use gpui::{Bounds, Point, point, size};

pub mod sizing {
    pub const CANVAS_WIDTH: f32 = 360.0;
    pub const CANVAS_HEIGHT: f32 = 320.0;
    /// The ring is shifted left to leave room for the alpha bar.
    pub const CENTER_OFFSET_X: f32 = -25.0;

    pub const RING_RADIUS: f32 = 150.0;
    pub const RING_THICKNESS: f32 = 20.0;

    pub const SQUARE_SIZE: f32 = 200.0;

    pub const ALPHA_GAP: f32 = 70.0;
    pub const ALPHA_WIDTH: f32 = 20.0;
    pub const ALPHA_HANDLE_HEIGHT: f32 = 8.0;

    pub const HUE_MARKER_RADIUS: f32 = 10.0;
    pub const HUE_MARKER_STROKE: f32 = 3.0;
    pub const SL_MARKER_RADIUS: f32 = 8.0;
    pub const SL_MARKER_STROKE: f32 = 2.0;
}

/// The part of the ring widget a pointer press landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    Hue,
    SaturationLightness,
    Alpha,
}

/// Geometry of the ring widget in local coordinates (origin at the top-left corner).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayout {
    pub width: f32,
    pub height: f32,
    pub center_offset_x: f32,
    pub ring_radius: f32,
    pub ring_thickness: f32,
    pub square_size: f32,
    pub alpha_gap: f32,
    pub alpha_width: f32,
    pub alpha_handle_height: f32,
    pub hue_marker_radius: f32,
    pub sl_marker_radius: f32,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            width: sizing::CANVAS_WIDTH,
            height: sizing::CANVAS_HEIGHT,
            center_offset_x: sizing::CENTER_OFFSET_X,
            ring_radius: sizing::RING_RADIUS,
            ring_thickness: sizing::RING_THICKNESS,
            square_size: sizing::SQUARE_SIZE,
            alpha_gap: sizing::ALPHA_GAP,
            alpha_width: sizing::ALPHA_WIDTH,
            alpha_handle_height: sizing::ALPHA_HANDLE_HEIGHT,
            hue_marker_radius: sizing::HUE_MARKER_RADIUS,
            sl_marker_radius: sizing::SL_MARKER_RADIUS,
        }
    }
}

impl RingLayout {
    pub fn center(&self) -> Point<f32> {
        point(
            self.width / 2.0 + self.center_offset_x,
            self.height / 2.0,
        )
    }

    pub fn inner_radius(&self) -> f32 {
        (self.ring_radius - self.ring_thickness / 2.0).max(0.0)
    }

    pub fn outer_radius(&self) -> f32 {
        self.ring_radius + self.ring_thickness / 2.0
    }

    pub fn square_bounds(&self) -> Bounds<f32> {
        let center = self.center();
        let half = self.square_size / 2.0;
        Bounds::new(
            point(center.x - half, center.y - half),
            size(self.square_size, self.square_size),
        )
    }

    /// The alpha bar sits to the right of the square and shares its vertical extent.
    pub fn alpha_bounds(&self) -> Bounds<f32> {
        let square = self.square_bounds();
        Bounds::new(
            point(
                square.origin.x + self.square_size + self.alpha_gap,
                square.origin.y,
            ),
            size(self.alpha_width, self.square_size),
        )
    }

    pub fn hit_test(&self, position: Point<f32>) -> Option<DragTarget> {
        let center = self.center();
        let dx = position.x - center.x;
        let dy = position.y - center.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance >= self.inner_radius() && distance <= self.outer_radius() {
            return Some(DragTarget::Hue);
        }
        if contains_inclusive(&self.square_bounds(), position) {
            return Some(DragTarget::SaturationLightness);
        }
        if contains_inclusive(&self.alpha_bounds(), position) {
            return Some(DragTarget::Alpha);
        }
        None
    }

    /// Hue in degrees of the angle between the ring center and `position`.
    pub fn hue_at(&self, position: Point<f32>) -> f32 {
        let center = self.center();
        let mut angle = (position.y - center.y)
            .atan2(position.x - center.x)
            .to_degrees();
        if angle < 0.0 {
            angle += HUE_MAX;
        }
        if angle >= HUE_MAX { 0.0 } else { angle }
    }

    /// Returns `(saturation, lightness)` in percent, clamped to the square.
    pub fn saturation_lightness_at(&self, position: Point<f32>) -> (f32, f32) {
        let square = self.square_bounds();
        let saturation = (position.x - square.origin.x) / self.square_size * PERCENT_MAX;
        let lightness =
            PERCENT_MAX - (position.y - square.origin.y) / self.square_size * PERCENT_MAX;
        (
            saturation.clamp(0.0, PERCENT_MAX),
            lightness.clamp(0.0, PERCENT_MAX),
        )
    }

    /// Alpha for a vertical position on the bar, opaque at the top.
    pub fn alpha_at(&self, y: f32) -> f32 {
        let bar = self.alpha_bounds();
        (1.0 - (y - bar.origin.y) / bar.size.height).clamp(0.0, 1.0)
    }

    /// Applies a pointer position to `color` for the given drag target.
    pub fn apply(&self, target: DragTarget, position: Point<f32>, color: HslaColor) -> HslaColor {
        match target {
            DragTarget::Hue => color.with_hue(self.hue_at(position)),
            DragTarget::SaturationLightness => {
                let (saturation, lightness) = self.saturation_lightness_at(position);
                color
                    .with_saturation(saturation)
                    .with_lightness(lightness)
            }
            DragTarget::Alpha => color.with_alpha(self.alpha_at(position.y)),
        }
    }

    /// Center of the hue marker on the ring.
    pub fn hue_marker(&self, hue: f32) -> Point<f32> {
        let center = self.center();
        let radians = hue.to_radians();
        point(
            center.x + self.ring_radius * radians.cos(),
            center.y + self.ring_radius * radians.sin(),
        )
    }

    /// Center of the saturation/lightness marker in the square.
    pub fn saturation_lightness_marker(&self, saturation: f32, lightness: f32) -> Point<f32> {
        let square = self.square_bounds();
        point(
            square.origin.x + saturation / PERCENT_MAX * self.square_size,
            square.origin.y + (1.0 - lightness / PERCENT_MAX) * self.square_size,
        )
    }

    /// Top edge of the alpha handle, centered on the alpha position.
    pub fn alpha_handle_top(&self, alpha: f32) -> f32 {
        let bar = self.alpha_bounds();
        bar.origin.y + (1.0 - alpha) * bar.size.height - self.alpha_handle_height / 2.0
    }
}

fn contains_inclusive(bounds: &Bounds<f32>, position: Point<f32>) -> bool {
    position.x >= bounds.origin.x
        && position.x <= bounds.origin.x + bounds.size.width
        && position.y >= bounds.origin.y
        && position.y <= bounds.origin.y + bounds.size.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "expected {a} ~= {b}");
    }

    #[test]
    fn default_geometry_matches_canvas() {
        let layout = RingLayout::default();
        assert_eq!(layout.center(), point(155.0, 160.0));
        assert_eq!(layout.square_bounds().origin, point(55.0, 60.0));
        assert_eq!(layout.alpha_bounds().origin, point(325.0, 60.0));
        assert_eq!(layout.alpha_bounds().size, size(20.0, 200.0));
        approx_eq(layout.inner_radius(), 140.0);
        approx_eq(layout.outer_radius(), 160.0);
    }

    #[test]
    fn hit_test_prefers_ring_then_square_then_alpha() {
        let layout = RingLayout::default();
        let center = layout.center();

        assert_eq!(
            layout.hit_test(point(center.x + 150.0, center.y)),
            Some(DragTarget::Hue)
        );
        // Band edges are inclusive.
        assert_eq!(
            layout.hit_test(point(center.x, center.y - 160.0)),
            Some(DragTarget::Hue)
        );
        assert_eq!(layout.hit_test(center), Some(DragTarget::SaturationLightness));
        // Square corners lie inside the ring band.
        assert_eq!(layout.hit_test(point(55.0, 60.0)), Some(DragTarget::Hue));
        assert_eq!(
            layout.hit_test(point(60.0, 160.0)),
            Some(DragTarget::SaturationLightness)
        );
        assert_eq!(layout.hit_test(point(335.0, 160.0)), Some(DragTarget::Alpha));
        assert_eq!(layout.hit_test(point(345.0, 260.0)), Some(DragTarget::Alpha));
        assert_eq!(layout.hit_test(point(350.0, 160.0)), None);
        assert_eq!(layout.hit_test(point(0.0, 0.0)), None);
    }

    #[test]
    fn hue_follows_screen_angle() {
        let layout = RingLayout::default();
        let c = layout.center();
        approx_eq(layout.hue_at(point(c.x + 10.0, c.y)), 0.0);
        approx_eq(layout.hue_at(point(c.x, c.y + 10.0)), 90.0);
        approx_eq(layout.hue_at(point(c.x - 10.0, c.y)), 180.0);
        approx_eq(layout.hue_at(point(c.x, c.y - 10.0)), 270.0);
        assert!(layout.hue_at(point(c.x + 10.0, c.y - 1e-6)) < HUE_MAX);
    }

    #[test]
    fn saturation_lightness_are_clamped_outside_square() {
        let layout = RingLayout::default();
        let (s, l) = layout.saturation_lightness_at(point(55.0, 60.0));
        approx_eq(s, 0.0);
        approx_eq(l, 100.0);

        let (s, l) = layout.saturation_lightness_at(point(155.0, 160.0));
        approx_eq(s, 50.0);
        approx_eq(l, 50.0);

        let (s, l) = layout.saturation_lightness_at(point(-100.0, 900.0));
        approx_eq(s, 0.0);
        approx_eq(l, 0.0);
    }

    #[test]
    fn alpha_is_opaque_at_top() {
        let layout = RingLayout::default();
        approx_eq(layout.alpha_at(60.0), 1.0);
        approx_eq(layout.alpha_at(160.0), 0.5);
        approx_eq(layout.alpha_at(260.0), 0.0);
        approx_eq(layout.alpha_at(-50.0), 1.0);
        approx_eq(layout.alpha_at(500.0), 0.0);
        approx_eq(layout.alpha_handle_top(1.0), 56.0);
        approx_eq(layout.alpha_handle_top(0.0), 256.0);
    }

    #[test]
    fn markers_map_back_to_their_values() {
        let layout = RingLayout::default();
        for hue in [0.0, 45.0, 135.5, 200.0, 359.0] {
            approx_eq(layout.hue_at(layout.hue_marker(hue)), hue);
            assert_eq!(layout.hit_test(layout.hue_marker(hue)), Some(DragTarget::Hue));
        }

        for (s, l) in [(0.0, 0.0), (25.0, 75.0), (100.0, 100.0), (62.5, 12.5)] {
            let (s2, l2) = layout.saturation_lightness_at(layout.saturation_lightness_marker(s, l));
            approx_eq(s2, s);
            approx_eq(l2, l);
        }

        for alpha in [0.0, 0.33, 1.0] {
            let top = layout.alpha_handle_top(alpha);
            approx_eq(layout.alpha_at(top + layout.alpha_handle_height / 2.0), alpha);
        }
    }

    #[test]
    fn apply_only_touches_the_dragged_components() {
        let layout = RingLayout::default();
        let color = HslaColor::new(10.0, 20.0, 30.0, 0.4);

        let hue = layout.apply(DragTarget::Hue, layout.hue_marker(90.0), color);
        approx_eq(hue.hue(), 90.0);
        assert_eq!(hue.saturation(), color.saturation());
        assert_eq!(hue.alpha(), color.alpha());

        let sl = layout.apply(DragTarget::SaturationLightness, point(255.0, 260.0), color);
        approx_eq(sl.saturation(), 100.0);
        approx_eq(sl.lightness(), 0.0);
        assert_eq!(sl.hue(), color.hue());

        let alpha = layout.apply(DragTarget::Alpha, point(0.0, 110.0), color);
        approx_eq(alpha.alpha(), 0.75);
        assert_eq!(alpha.lightness(), color.lightness());
    }
}
