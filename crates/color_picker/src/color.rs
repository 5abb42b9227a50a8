use anyhow::anyhow;
use gpui::Hsla;
use serde::{Deserialize, Serialize};

pub const HUE_MAX: f32 = 360.0;
pub const PERCENT_MAX: f32 = 100.0;

/// A color in the HSL model with an alpha channel.
///
/// - `hue` is in degrees and always wraps into `[0, 360)`.
/// - `saturation` and `lightness` are percentages clamped to `[0, 100]`.
/// - `alpha` is clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "HslaFields", into = "HslaFields")]
pub struct HslaColor {
    hue: f32,
    saturation: f32,
    lightness: f32,
    alpha: f32,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct HslaFields {
    hue: f32,
    saturation: f32,
    lightness: f32,
    alpha: f32,
}

impl From<HslaFields> for HslaColor {
    fn from(value: HslaFields) -> Self {
        Self::new(value.hue, value.saturation, value.lightness, value.alpha)
    }
}

impl From<HslaColor> for HslaFields {
    fn from(value: HslaColor) -> Self {
        Self {
            hue: value.hue,
            saturation: value.saturation,
            lightness: value.lightness,
            alpha: value.alpha,
        }
    }
}

/// An 8-bit RGB color with a floating point alpha channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl RgbaColor {
    /// Returns `rgba(r,g,b,a)`.
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Same as [`Self::css`] but with the alpha fixed to two decimals.
    pub fn css_fixed(&self) -> String {
        format!("rgba({},{},{},{:.2})", self.r, self.g, self.b, self.a)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(HUE_MAX);
    // `rem_euclid` of a tiny negative value rounds up to exactly 360.
    if wrapped >= HUE_MAX { 0.0 } else { wrapped }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

impl Default for HslaColor {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 50.0,
            lightness: 50.0,
            alpha: 1.0,
        }
    }
}

impl HslaColor {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue: wrap_hue(finite_or(hue, 0.0)),
            saturation: finite_or(saturation, 0.0).clamp(0.0, PERCENT_MAX),
            lightness: finite_or(lightness, 0.0).clamp(0.0, PERCENT_MAX),
            alpha: finite_or(alpha, 1.0).clamp(0.0, 1.0),
        }
    }

    /// Converts 8-bit RGB channels to HSL, the result is opaque and not rounded.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = r as f32 / 255.0;
        let g = g as f32 / 255.0;
        let b = b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return Self::new(0.0, 0.0, lightness * PERCENT_MAX, 1.0);
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let sector = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self::new(
            sector * 60.0,
            saturation * PERCENT_MAX,
            lightness * PERCENT_MAX,
            1.0,
        )
    }

    /// Parses `#RRGGBB` (case-insensitive) into an opaque color.
    pub fn parse_hex(value: &str) -> anyhow::Result<Self> {
        let (r, g, b) = parse_hex_channels(value)?;
        Ok(Self::from_rgb(r, g, b))
    }

    /// Returns a copy whose hue, saturation and lightness come from `hex`,
    /// keeping the current alpha. `None` when `hex` is not a valid `#RRGGBB`.
    pub fn with_hex(&self, hex: &str) -> Option<Self> {
        let parsed = Self::parse_hex(hex).ok()?;
        Some(parsed.with_alpha(self.alpha))
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_hue(&mut self, hue: f32) {
        if hue.is_finite() {
            self.hue = wrap_hue(hue);
        }
    }

    pub fn set_saturation(&mut self, saturation: f32) {
        if saturation.is_finite() {
            self.saturation = saturation.clamp(0.0, PERCENT_MAX);
        }
    }

    pub fn set_lightness(&mut self, lightness: f32) {
        if lightness.is_finite() {
            self.lightness = lightness.clamp(0.0, PERCENT_MAX);
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// Replaces hue, saturation and lightness at once, alpha is untouched.
    pub fn set_hsl(&mut self, hue: f32, saturation: f32, lightness: f32) {
        self.set_hue(hue);
        self.set_saturation(saturation);
        self.set_lightness(lightness);
    }

    pub fn with_hue(mut self, hue: f32) -> Self {
        self.set_hue(hue);
        self
    }

    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.set_saturation(saturation);
        self
    }

    pub fn with_lightness(mut self, lightness: f32) -> Self {
        self.set_lightness(lightness);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.set_alpha(alpha);
        self
    }

    /// Same color with full opacity, used for painting the layers behind the indicators.
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.hue, self.saturation, self.lightness, self.alpha]
    }

    /// Converts to RGB with each channel rounded to the nearest integer.
    pub fn to_rgba(&self) -> RgbaColor {
        let (r, g, b) = hsl_to_rgb(
            self.hue / HUE_MAX,
            self.saturation / PERCENT_MAX,
            self.lightness / PERCENT_MAX,
        );

        RgbaColor {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
            a: self.alpha,
        }
    }

    /// Lowercase `#rrggbb`, alpha is not included.
    pub fn to_hex(&self) -> String {
        self.to_rgba().to_hex()
    }

    /// `hsla(H, S%, L%, A)` with unrounded components.
    pub fn hsla_string(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }

    pub fn rgba_string(&self) -> String {
        self.to_rgba().css()
    }

    /// Short human readable summary, e.g. `H: 0°, S: 50%, L: 50%, A: 1.00`.
    pub fn readout(&self) -> String {
        format!(
            "H: {}°, S: {}%, L: {}%, A: {:.2}",
            self.hue.round(),
            self.saturation.round(),
            self.lightness.round(),
            self.alpha
        )
    }
}

impl TryFrom<&str> for HslaColor {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_hex(value)
    }
}

impl From<HslaColor> for Hsla {
    fn from(value: HslaColor) -> Self {
        gpui::hsla(
            value.hue / HUE_MAX,
            value.saturation / PERCENT_MAX,
            value.lightness / PERCENT_MAX,
            value.alpha,
        )
    }
}

impl From<Hsla> for HslaColor {
    fn from(value: Hsla) -> Self {
        Self::new(
            value.h * HUE_MAX,
            value.s * PERCENT_MAX,
            value.l * PERCENT_MAX,
            value.a,
        )
    }
}

fn parse_hex_channels(value: &str) -> anyhow::Result<(u8, u8, u8)> {
    let trimmed = value.trim();
    let Some(digits) = trimmed.strip_prefix('#') else {
        return Err(anyhow!("Color must start with #"));
    };

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(anyhow!("Expected 6 hex digits (#RRGGBB), got {trimmed:?}"));
    }

    let channel = |ix: usize| u8::from_str_radix(&digits[ix..ix + 2], 16);
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// HSL to RGB with every component in `0..=1`.
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f32, b: f32) {
        assert!(
            (a - b).abs() < 1e-3,
            "expected {a} ~= {b}, delta={}",
            (a - b).abs()
        );
    }

    #[test]
    fn pure_red_maps_to_hsl_and_hex() {
        let red = HslaColor::from_rgb(255, 0, 0);
        approx_eq(red.hue(), 0.0);
        approx_eq(red.saturation(), 100.0);
        approx_eq(red.lightness(), 50.0);
        approx_eq(red.alpha(), 1.0);
        assert_eq!(red.to_hex(), "#ff0000");
        assert_eq!(
            red.to_rgba(),
            RgbaColor {
                r: 255,
                g: 0,
                b: 0,
                a: 1.0
            }
        );
    }

    #[test]
    fn secondary_colors_land_on_expected_hues() {
        approx_eq(HslaColor::from_rgb(255, 255, 0).hue(), 60.0);
        approx_eq(HslaColor::from_rgb(0, 255, 0).hue(), 120.0);
        approx_eq(HslaColor::from_rgb(0, 255, 255).hue(), 180.0);
        approx_eq(HslaColor::from_rgb(0, 0, 255).hue(), 240.0);
        approx_eq(HslaColor::from_rgb(255, 0, 255).hue(), 300.0);
    }

    #[test]
    fn grays_have_no_saturation() {
        let gray = HslaColor::from_rgb(128, 128, 128);
        approx_eq(gray.hue(), 0.0);
        approx_eq(gray.saturation(), 0.0);
        assert_eq!(gray.to_hex(), "#808080");

        approx_eq(HslaColor::from_rgb(0, 0, 0).lightness(), 0.0);
        approx_eq(HslaColor::from_rgb(255, 255, 255).lightness(), 100.0);
    }

    #[test]
    fn default_color_is_half_saturated_red() {
        let color = HslaColor::default();
        assert_eq!(color.to_array(), [0.0, 50.0, 50.0, 1.0]);
        assert_eq!(color.to_hex(), "#bf4040");
    }

    #[test]
    fn components_are_clamped_and_hue_wraps() {
        let color = HslaColor::new(-30.0, 150.0, -5.0, 2.0);
        approx_eq(color.hue(), 330.0);
        approx_eq(color.saturation(), 100.0);
        approx_eq(color.lightness(), 0.0);
        approx_eq(color.alpha(), 1.0);

        approx_eq(HslaColor::new(360.0, 0.0, 0.0, 0.0).hue(), 0.0);
        approx_eq(HslaColor::new(725.0, 0.0, 0.0, 0.0).hue(), 5.0);

        let mut color = HslaColor::default();
        color.set_alpha(-0.5);
        approx_eq(color.alpha(), 0.0);
        color.set_saturation(101.0);
        approx_eq(color.saturation(), 100.0);
    }

    #[test]
    fn tiny_negative_hue_does_not_wrap_to_360() {
        let color = HslaColor::new(-1e-8, 50.0, 50.0, 1.0);
        assert!(color.hue() < HUE_MAX);
        approx_eq(color.hue(), 0.0);
    }

    #[test]
    fn non_finite_components_are_ignored_by_setters() {
        let mut color = HslaColor::new(200.0, 40.0, 60.0, 0.5);
        color.set_hue(f32::NAN);
        color.set_saturation(f32::INFINITY);
        color.set_lightness(f32::NEG_INFINITY);
        color.set_alpha(f32::NAN);
        assert_eq!(color, HslaColor::new(200.0, 40.0, 60.0, 0.5));

        let fallback = HslaColor::new(f32::NAN, f32::NAN, f32::NAN, f32::NAN);
        assert_eq!(fallback.to_array(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn parse_hex_accepts_only_six_digit_form() {
        let color = HslaColor::parse_hex("#00FF00").unwrap();
        assert_eq!(color.to_hex(), "#00ff00");
        assert!(HslaColor::parse_hex("  #0000ff ").is_ok());

        assert!(HslaColor::parse_hex("").is_err());
        assert!(HslaColor::parse_hex("00ff00").is_err());
        assert!(HslaColor::parse_hex("#0f0").is_err());
        assert!(HslaColor::parse_hex("#00ff0080").is_err());
        assert!(HslaColor::parse_hex("#gg0000").is_err());
        assert!(HslaColor::parse_hex("#ééé").is_err());
        assert!(HslaColor::try_from("#123456").is_ok());
    }

    #[test]
    fn with_hex_keeps_alpha_and_rejects_invalid_input() {
        let color = HslaColor::new(10.0, 20.0, 30.0, 0.25);
        let blue = color.with_hex("#0000ff").unwrap();
        approx_eq(blue.hue(), 240.0);
        approx_eq(blue.alpha(), 0.25);

        assert_eq!(color.with_hex("#12345"), None);
        assert_eq!(color.with_hex("blue"), None);
    }

    #[test]
    fn string_forms_follow_css_syntax() {
        let color = HslaColor::new(120.0, 100.0, 25.0, 0.5);
        assert_eq!(color.hsla_string(), "hsla(120, 100%, 25%, 0.5)");
        assert_eq!(color.rgba_string(), "rgba(0,128,0,0.5)");
        assert_eq!(color.to_rgba().css_fixed(), "rgba(0,128,0,0.50)");
        assert_eq!(color.readout(), "H: 120°, S: 100%, L: 25%, A: 0.50");

        let fractional = HslaColor::new(12.5, 33.4, 66.6, 1.0);
        assert_eq!(fractional.readout(), "H: 13°, S: 33%, L: 67%, A: 1.00");
    }

    #[test]
    fn gpui_hsla_conversion_round_trips() {
        let color = HslaColor::new(210.0, 80.0, 40.0, 0.7);
        let hsla: Hsla = color.into();
        approx_eq(hsla.h, 210.0 / 360.0);
        approx_eq(hsla.s, 0.8);
        approx_eq(hsla.l, 0.4);

        let back = HslaColor::from(hsla);
        approx_eq(back.hue(), 210.0);
        approx_eq(back.saturation(), 80.0);
        approx_eq(back.lightness(), 40.0);
        approx_eq(back.alpha(), 0.7);
    }

    #[test]
    fn serde_normalizes_out_of_range_fields() {
        let json = r#"{"hue":-90.0,"saturation":120.0,"lightness":50.0,"alpha":3.0}"#;
        let color: HslaColor = serde_json::from_str(json).unwrap();
        assert_eq!(color.to_array(), [270.0, 100.0, 50.0, 1.0]);

        let encoded = serde_json::to_value(color).unwrap();
        assert_eq!(encoded["hue"], 270.0);
        assert_eq!(encoded["alpha"], 1.0);
    }

    proptest! {
        #[test]
        fn rgb_round_trips_through_hsl(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgba = HslaColor::from_rgb(r, g, b).to_rgba();
            prop_assert!((rgba.r as i16 - r as i16).abs() <= 1);
            prop_assert!((rgba.g as i16 - g as i16).abs() <= 1);
            prop_assert!((rgba.b as i16 - b as i16).abs() <= 1);
        }

        #[test]
        fn constructed_colors_stay_in_range(
            h in -1000.0f32..1000.0,
            s in -200.0f32..200.0,
            l in -200.0f32..200.0,
            a in -2.0f32..2.0,
        ) {
            let color = HslaColor::new(h, s, l, a);
            prop_assert!((0.0..HUE_MAX).contains(&color.hue()));
            prop_assert!((0.0..=PERCENT_MAX).contains(&color.saturation()));
            prop_assert!((0.0..=PERCENT_MAX).contains(&color.lightness()));
            prop_assert!((0.0..=1.0).contains(&color.alpha()));
        }
    }
}
