use crate::color::{HUE_MAX, hsl_to_rgb};
use crate::layout::RingLayout;
use gpui::{Image, ImageFormat};
use std::sync::Arc;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Device pixels rendered per layout pixel.
pub const RASTER_SCALE: f32 = 2.0;

const SUBSAMPLE_OFFSETS: [f32; 2] = [0.25, 0.75];

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn scaled_extent(value: f32, scale: f32) -> u32 {
    (value * scale).round().max(0.0) as u32
}

/// Paints the hue ring over the whole widget canvas, transparent outside the band.
pub(crate) fn render_hue_ring(layout: &RingLayout, scale: f32) -> Option<Pixmap> {
    let width = scaled_extent(layout.width, scale);
    let height = scaled_extent(layout.height, scale);
    let mut pixmap = Pixmap::new(width, height)?;
    let pixels = pixmap.pixels_mut();

    let center = layout.center();
    let (center_x, center_y) = (center.x * scale, center.y * scale);
    let inner = layout.inner_radius() * scale;
    let outer = layout.outer_radius() * scale;

    for y in 0..height {
        for x in 0..width {
            let mut sum = (0.0_f32, 0.0_f32, 0.0_f32);
            let mut covered = 0_u8;

            for sy in SUBSAMPLE_OFFSETS {
                for sx in SUBSAMPLE_OFFSETS {
                    let dx = x as f32 + sx - center_x;
                    let dy = y as f32 + sy - center_y;
                    let distance = (dx * dx + dy * dy).sqrt();
                    if distance < inner || distance > outer {
                        continue;
                    }

                    let hue = dy.atan2(dx).to_degrees().rem_euclid(HUE_MAX);
                    let (r, g, b) = hsl_to_rgb(hue / HUE_MAX, 1.0, 0.5);
                    sum.0 += r;
                    sum.1 += g;
                    sum.2 += b;
                    covered += 1;
                }
            }

            if covered == 0 {
                continue;
            }

            let coverage = covered as f32 / 4.0;
            let inv = 1.0 / covered as f32;
            // Premultiplied, so the channels scale with coverage.
            let alpha = unit_to_u8(coverage);
            let r = unit_to_u8(sum.0 * inv * coverage).min(alpha);
            let g = unit_to_u8(sum.1 * inv * coverage).min(alpha);
            let b = unit_to_u8(sum.2 * inv * coverage).min(alpha);

            if let Some(pixel) = PremultipliedColorU8::from_rgba(r, g, b, alpha) {
                pixels[(y * width + x) as usize] = pixel;
            }
        }
    }

    Some(pixmap)
}

/// Paints the saturation (x) / lightness (y) plane for one hue.
pub(crate) fn render_saturation_lightness(hue: f32, side: f32, scale: f32) -> Option<Pixmap> {
    let extent = scaled_extent(side, scale);
    let mut pixmap = Pixmap::new(extent, extent)?;
    let pixels = pixmap.pixels_mut();
    let hue = hue.rem_euclid(HUE_MAX) / HUE_MAX;
    let step = 1.0 / extent as f32;

    for y in 0..extent {
        let lightness = 1.0 - (y as f32 + 0.5) * step;
        for x in 0..extent {
            let saturation = (x as f32 + 0.5) * step;
            let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
            if let Some(pixel) =
                PremultipliedColorU8::from_rgba(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), 255)
            {
                pixels[(y * extent + x) as usize] = pixel;
            }
        }
    }

    Some(pixmap)
}

pub(crate) fn encode_image(pixmap: &Pixmap) -> Option<Arc<Image>> {
    match pixmap.encode_png() {
        Ok(data) => Some(Arc::new(Image::from_bytes(ImageFormat::Png, data))),
        Err(err) => {
            tracing::warn!("failed to encode color layer: {err}");
            None
        }
    }
}

/// Hue quantized to tenths of a degree, the resolution of the square cache.
pub(crate) fn hue_cache_key(hue: f32) -> u16 {
    ((hue.rem_euclid(HUE_MAX) * 10.0).round() as u16) % 3600
}

/// Cached background images of the ring widget.
#[derive(Default)]
pub(crate) struct RingLayers {
    ring: Option<(RingLayout, Arc<Image>)>,
    square: Option<(RingLayout, u16, Arc<Image>)>,
}

impl RingLayers {
    pub(crate) fn hue_ring(&mut self, layout: &RingLayout) -> Option<Arc<Image>> {
        if let Some((cached, image)) = &self.ring {
            if cached == layout {
                return Some(image.clone());
            }
        }

        tracing::debug!(
            width = layout.width,
            height = layout.height,
            "rasterizing hue ring"
        );
        let Some(pixmap) = render_hue_ring(layout, RASTER_SCALE) else {
            tracing::warn!("hue ring has an empty canvas");
            return None;
        };
        let image = encode_image(&pixmap)?;
        self.ring = Some((*layout, image.clone()));
        Some(image)
    }

    pub(crate) fn saturation_lightness(
        &mut self,
        layout: &RingLayout,
        hue: f32,
    ) -> Option<Arc<Image>> {
        let key = hue_cache_key(hue);
        if let Some((cached, cached_key, image)) = &self.square {
            if cached == layout && *cached_key == key {
                return Some(image.clone());
            }
        }

        tracing::trace!(hue = key as f32 / 10.0, "rasterizing saturation/lightness square");
        let Some(pixmap) =
            render_saturation_lightness(key as f32 / 10.0, layout.square_size, RASTER_SCALE)
        else {
            tracing::warn!("saturation/lightness square has an empty canvas");
            return None;
        };
        let image = encode_image(&pixmap)?;
        self.square = Some((*layout, key, image.clone()));
        Some(image)
    }
}
