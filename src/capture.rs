// capture.rs - View-to-Image Capture
//
// Renders the composited editing scene (base photo + sticker overlay) to a
// JPEG at a fixed logical size. This is the in-process equivalent of a
// view-shot: the compositor produces exactly what the image area on screen
// shows, independent of window scale.

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::constants;
use crate::sticker::Sticker;

/// The scene to composite: which photo (None = placeholder) and which sticker
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub image: Option<PathBuf>,
    pub sticker: Option<Sticker>,
}

/// A captured frame, already encoded
#[derive(Debug, Clone)]
pub struct CapturedImage {
    /// JPEG bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

/// Trait for scene capture implementations
pub trait CaptureService: Send + Sync {
    /// Render the scene to an encoded image at the fixed output size
    fn capture(&self, scene: &Scene) -> anyhow::Result<CapturedImage>;
}

/// Software compositor over the `image` crate
#[derive(Debug, Clone)]
pub struct Compositor {
    width: u32,
    height: u32,
    quality: u8,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            width: constants::capture::WIDTH,
            height: constants::capture::HEIGHT,
            quality: constants::capture::JPEG_QUALITY,
        }
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite the scene into an RGBA frame at the output size
    fn compose(&self, scene: &Scene) -> anyhow::Result<RgbaImage> {
        let mut frame = match &scene.image {
            Some(path) => {
                let photo = image::open(path)
                    .with_context(|| format!("failed to open photo {}", path.display()))?
                    .to_rgba8();
                cover_fit(&photo, self.width, self.height)
            }
            None => placeholder_image(self.width, self.height),
        };

        if let Some(sticker) = &scene.sticker {
            let raster = sticker.emoji.rasterize(sticker.size);
            imageops::overlay(&mut frame, &raster, sticker.x, sticker.y);
        }

        Ok(frame)
    }
}

impl CaptureService for Compositor {
    fn capture(&self, scene: &Scene) -> anyhow::Result<CapturedImage> {
        let frame = self.compose(scene)?;
        let rgb = image::DynamicImage::ImageRgba8(frame).to_rgb8();

        let mut data = Vec::new();
        let mut cursor = Cursor::new(&mut data);
        let mut encoder = JpegEncoder::new_with_quality(&mut cursor, self.quality);
        encoder
            .encode_image(&rgb)
            .context("failed to encode captured frame as JPEG")?;

        Ok(CapturedImage {
            data,
            width: self.width,
            height: self.height,
        })
    }
}

/// Scale the photo so it covers the output region, then center-crop
fn cover_fit(photo: &RgbaImage, out_w: u32, out_h: u32) -> RgbaImage {
    let (w, h) = photo.dimensions();
    let scale = (out_w as f32 / w as f32).max(out_h as f32 / h as f32);
    let scaled_w = ((w as f32 * scale).ceil() as u32).max(out_w);
    let scaled_h = ((h as f32 * scale).ceil() as u32).max(out_h);

    let resized = imageops::resize(photo, scaled_w, scaled_h, FilterType::Triangle);
    let x0 = (scaled_w - out_w) / 2;
    let y0 = (scaled_h - out_h) / 2;
    imageops::crop_imm(&resized, x0, y0, out_w, out_h).to_image()
}

/// Built-in placeholder shown before any photo is picked: a vertical
/// dark-slate-to-blue gradient matching the app palette.
pub fn placeholder_image(width: u32, height: u32) -> RgbaImage {
    let top = [23, 23, 31u8];
    let bottom = [45, 70, 121u8];

    RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / (height.max(1)) as f32;
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        image::Rgba([mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2]), 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticker::Emoji;

    #[test]
    fn captures_placeholder_scene_as_jpeg_at_fixed_size() {
        let compositor = Compositor::new();
        let captured = compositor.capture(&Scene::default()).unwrap();

        assert_eq!((captured.width, captured.height), (320, 440));
        // JPEG start-of-image marker
        assert_eq!(&captured.data[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&captured.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (320, 440));
    }

    #[test]
    fn cover_fit_crops_wide_and_tall_photos_to_output_size() {
        let wide = RgbaImage::new(1000, 200);
        assert_eq!(cover_fit(&wide, 320, 440).dimensions(), (320, 440));

        let tall = RgbaImage::new(200, 1000);
        assert_eq!(cover_fit(&tall, 320, 440).dimensions(), (320, 440));
    }

    #[test]
    fn sticker_overlay_changes_the_frame() {
        let compositor = Compositor::new();
        let plain = compositor
            .compose(&Scene::default())
            .unwrap();
        let stamped = compositor
            .compose(&Scene {
                image: None,
                sticker: Some(Sticker::new(Emoji::Smile)),
            })
            .unwrap();

        assert_ne!(plain.as_raw(), stamped.as_raw());
    }

    #[test]
    fn missing_photo_is_an_error() {
        let compositor = Compositor::new();
        let scene = Scene {
            image: Some(PathBuf::from("/nonexistent/photo.png")),
            sticker: None,
        };
        assert!(compositor.capture(&scene).is_err());
    }
}
