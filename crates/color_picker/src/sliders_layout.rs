use crate::color::{HUE_MAX, HslaColor, PERCENT_MAX};
use gpui::{Bounds, Point, point, size};

pub mod sizing {
    pub const ORIGIN_X: f32 = 20.0;
    pub const ORIGIN_Y: f32 = 20.0;
    pub const TRACK_WIDTH: f32 = 200.0;
    pub const TRACK_HEIGHT: f32 = 20.0;
    /// Distance between the top edges of two consecutive tracks.
    pub const TRACK_PITCH: f32 = 30.0;
    pub const POINTER_SIZE: f32 = 8.0;
    pub const CHECKER_SIZE: f32 = 5.0;
}

/// Keeps the hue pointer at the right end instead of wrapping back to 0°.
pub const HUE_SLIDER_MAX: f32 = 359.99;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliderChannel {
    Hue,
    Saturation,
    Lightness,
    Alpha,
}

impl SliderChannel {
    pub const ALL: [SliderChannel; 4] = [
        SliderChannel::Hue,
        SliderChannel::Saturation,
        SliderChannel::Lightness,
        SliderChannel::Alpha,
    ];

    pub fn index(self) -> usize {
        match self {
            SliderChannel::Hue => 0,
            SliderChannel::Saturation => 1,
            SliderChannel::Lightness => 2,
            SliderChannel::Alpha => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SliderChannel::Hue => "Hue",
            SliderChannel::Saturation => "Saturation",
            SliderChannel::Lightness => "Lightness",
            SliderChannel::Alpha => "Alpha",
        }
    }

    /// Position of `color` along this channel in `0..=1`.
    pub fn fraction(self, color: &HslaColor) -> f32 {
        match self {
            SliderChannel::Hue => color.hue() / HUE_MAX,
            SliderChannel::Saturation => color.saturation() / PERCENT_MAX,
            SliderChannel::Lightness => color.lightness() / PERCENT_MAX,
            SliderChannel::Alpha => color.alpha(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlidersLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub track_width: f32,
    pub track_height: f32,
    pub track_pitch: f32,
    pub pointer_size: f32,
}

impl Default for SlidersLayout {
    fn default() -> Self {
        Self {
            origin_x: sizing::ORIGIN_X,
            origin_y: sizing::ORIGIN_Y,
            track_width: sizing::TRACK_WIDTH,
            track_height: sizing::TRACK_HEIGHT,
            track_pitch: sizing::TRACK_PITCH,
            pointer_size: sizing::POINTER_SIZE,
        }
    }
}

impl SlidersLayout {
    /// Total size the four tracks need, pointers and trailing margin included.
    pub fn canvas_size(&self) -> (f32, f32) {
        let last = self.track_bounds(SliderChannel::Alpha);
        (
            self.origin_x * 2.0 + self.track_width,
            last.origin.y + last.size.height + self.pointer_size + self.origin_y,
        )
    }

    pub fn track_bounds(&self, channel: SliderChannel) -> Bounds<f32> {
        Bounds::new(
            point(
                self.origin_x,
                self.origin_y + channel.index() as f32 * self.track_pitch,
            ),
            size(self.track_width, self.track_height),
        )
    }

    /// Only the vertical band decides which track a press selects.
    pub fn channel_at(&self, y: f32) -> Option<SliderChannel> {
        SliderChannel::ALL.into_iter().find(|channel| {
            let track = self.track_bounds(*channel);
            y >= track.origin.y && y <= track.origin.y + track.size.height
        })
    }

    pub fn fraction_at(&self, x: f32) -> f32 {
        if self.track_width <= 0.0 {
            return 0.0;
        }
        ((x - self.origin_x) / self.track_width).clamp(0.0, 1.0)
    }

    pub fn apply(&self, channel: SliderChannel, fraction: f32, color: HslaColor) -> HslaColor {
        let fraction = fraction.clamp(0.0, 1.0);
        match channel {
            SliderChannel::Hue => color.with_hue((fraction * HUE_MAX).min(HUE_SLIDER_MAX)),
            SliderChannel::Saturation => color.with_saturation(fraction * PERCENT_MAX),
            SliderChannel::Lightness => color.with_lightness(fraction * PERCENT_MAX),
            SliderChannel::Alpha => color.with_alpha(fraction),
        }
    }

    pub fn pointer_x(&self, channel: SliderChannel, color: &HslaColor) -> f32 {
        self.origin_x + channel.fraction(color).clamp(0.0, 1.0) * self.track_width
    }

    /// The black pointer above the track and the white pointer below it, both pointing down.
    pub fn pointer_triangles(
        &self,
        channel: SliderChannel,
        color: &HslaColor,
    ) -> ([Point<f32>; 3], [Point<f32>; 3]) {
        let x = self.pointer_x(channel, color);
        let track = self.track_bounds(channel);
        let top = track.origin.y;
        let bottom = top + track.size.height;
        let half = self.pointer_size / 2.0;

        (
            [
                point(x - half, top - self.pointer_size),
                point(x + half, top - self.pointer_size),
                point(x, top),
            ],
            [
                point(x - half, bottom),
                point(x + half, bottom),
                point(x, bottom + self.pointer_size),
            ],
        )
    }

    /// Gradient stops `(offset, color)` for a track, offsets in `0..=1`.
    pub fn gradient_stops(&self, channel: SliderChannel, color: &HslaColor) -> Vec<(f32, HslaColor)> {
        let (h, s, l) = (color.hue(), color.saturation(), color.lightness());
        match channel {
            SliderChannel::Hue => (0..=6)
                .map(|ix| {
                    let offset = ix as f32 / 6.0;
                    (offset, HslaColor::new(ix as f32 * 60.0, s, l, 1.0))
                })
                .collect(),
            SliderChannel::Saturation => vec![
                (0.0, HslaColor::new(h, 0.0, l, 1.0)),
                (1.0, HslaColor::new(h, PERCENT_MAX, l, 1.0)),
            ],
            SliderChannel::Lightness => vec![
                (0.0, HslaColor::new(h, s, 0.0, 1.0)),
                (0.5, HslaColor::new(h, s, 50.0, 1.0)),
                (1.0, HslaColor::new(h, s, PERCENT_MAX, 1.0)),
            ],
            SliderChannel::Alpha => vec![
                (0.0, HslaColor::new(h, s, l, 0.0)),
                (1.0, HslaColor::new(h, s, l, 1.0)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "expected {a} ~= {b}");
    }

    #[test]
    fn tracks_are_stacked_by_pitch() {
        let layout = SlidersLayout::default();
        assert_eq!(layout.track_bounds(SliderChannel::Hue).origin, point(20.0, 20.0));
        assert_eq!(
            layout.track_bounds(SliderChannel::Alpha).origin,
            point(20.0, 110.0)
        );
        assert_eq!(layout.canvas_size(), (240.0, 158.0));
    }

    #[test]
    fn channel_selected_by_vertical_band_only() {
        let layout = SlidersLayout::default();
        assert_eq!(layout.channel_at(20.0), Some(SliderChannel::Hue));
        assert_eq!(layout.channel_at(40.0), Some(SliderChannel::Hue));
        assert_eq!(layout.channel_at(45.0), None);
        assert_eq!(layout.channel_at(55.0), Some(SliderChannel::Saturation));
        assert_eq!(layout.channel_at(85.0), Some(SliderChannel::Lightness));
        assert_eq!(layout.channel_at(130.0), Some(SliderChannel::Alpha));
        assert_eq!(layout.channel_at(131.0), None);
        assert_eq!(layout.channel_at(5.0), None);
    }

    #[test]
    fn fraction_is_clamped_to_track() {
        let layout = SlidersLayout::default();
        approx_eq(layout.fraction_at(20.0), 0.0);
        approx_eq(layout.fraction_at(120.0), 0.5);
        approx_eq(layout.fraction_at(220.0), 1.0);
        approx_eq(layout.fraction_at(-40.0), 0.0);
        approx_eq(layout.fraction_at(1000.0), 1.0);
    }

    #[test]
    fn full_hue_fraction_does_not_wrap_to_zero() {
        let layout = SlidersLayout::default();
        let color = layout.apply(SliderChannel::Hue, 1.0, HslaColor::default());
        approx_eq(color.hue(), HUE_SLIDER_MAX);
        assert!(layout.pointer_x(SliderChannel::Hue, &color) > 219.9);
    }

    #[test]
    fn apply_and_pointer_x_are_inverse() {
        let layout = SlidersLayout::default();
        let base = HslaColor::new(120.0, 40.0, 60.0, 0.5);
        for channel in SliderChannel::ALL {
            for fraction in [0.0, 0.25, 0.5, 0.8] {
                let color = layout.apply(channel, fraction, base);
                approx_eq(
                    layout.fraction_at(layout.pointer_x(channel, &color)),
                    fraction,
                );
            }
        }

        let color = layout.apply(SliderChannel::Saturation, 0.3, base);
        approx_eq(color.saturation(), 30.0);
        assert_eq!(color.hue(), base.hue());
        assert_eq!(color.alpha(), base.alpha());
    }

    #[test]
    fn pointers_touch_the_track_edges() {
        let layout = SlidersLayout::default();
        let color = HslaColor::new(0.0, 50.0, 50.0, 1.0);
        let (above, below) = layout.pointer_triangles(SliderChannel::Saturation, &color);

        assert_eq!(above[2], point(120.0, 50.0));
        assert_eq!(above[0], point(116.0, 42.0));
        assert_eq!(below[0], point(116.0, 70.0));
        assert_eq!(below[2], point(120.0, 78.0));
    }

    #[test]
    fn gradient_stops_follow_current_color() {
        let layout = SlidersLayout::default();
        let color = HslaColor::new(200.0, 40.0, 70.0, 0.3);

        let hue = layout.gradient_stops(SliderChannel::Hue, &color);
        assert_eq!(hue.len(), 7);
        approx_eq(hue[1].0, 1.0 / 6.0);
        approx_eq(hue[1].1.hue(), 60.0);
        approx_eq(hue[3].1.saturation(), 40.0);
        approx_eq(hue[3].1.lightness(), 70.0);

        let lightness = layout.gradient_stops(SliderChannel::Lightness, &color);
        let values: Vec<f32> = lightness.iter().map(|(_, c)| c.lightness()).collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0]);

        let alpha = layout.gradient_stops(SliderChannel::Alpha, &color);
        approx_eq(alpha[0].1.alpha(), 0.0);
        approx_eq(alpha[1].1.alpha(), 1.0);
        approx_eq(alpha[1].1.hue(), 200.0);
    }
}
