// sticker.rs - Emoji Sticker Catalog
//
// The sticker catalog is rasterized in-process: each emoji face is drawn into
// an RGBA buffer with soft-edged primitives, so there are no bundled image
// assets to ship. The same raster is used for the picker thumbnails, the
// on-screen overlay and the export compositor.

use image::RgbaImage;

use crate::constants;

/// Face fill (warm yellow)
const FACE: [u8; 4] = [255, 199, 58, 255];
/// Slightly darker rim around the face
const RIM: [u8; 4] = [222, 160, 30, 255];
/// Eyes / mouth
const DARK: [u8; 4] = [60, 47, 33, 255];
/// Teeth and highlights
const WHITE: [u8; 4] = [255, 255, 255, 255];
/// Heart eyes
const HEART: [u8; 4] = [232, 69, 90, 255];
/// Tear drop
const TEAR: [u8; 4] = [90, 160, 245, 255];
/// Sunglasses lenses
const SHADE: [u8; 4] = [35, 35, 42, 255];

/// The available emoji stickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emoji {
    Smile,
    Grin,
    Wink,
    HeartEyes,
    Cool,
    Sad,
}

impl Emoji {
    pub const ALL: [Emoji; 6] = [
        Emoji::Smile,
        Emoji::Grin,
        Emoji::Wink,
        Emoji::HeartEyes,
        Emoji::Cool,
        Emoji::Sad,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emoji::Smile => "Smile",
            Emoji::Grin => "Grin",
            Emoji::Wink => "Wink",
            Emoji::HeartEyes => "Heart Eyes",
            Emoji::Cool => "Cool",
            Emoji::Sad => "Sad",
        }
    }

    /// Rasterize this emoji into a square RGBA image with transparent
    /// background. `size` is the edge length in pixels.
    pub fn rasterize(&self, size: u32) -> RgbaImage {
        let mut img = RgbaImage::new(size, size);
        let s = size as f32;
        let cx = s * 0.5;
        let cy = s * 0.5;
        let face_r = s * 0.46;

        // Face disc with a darker rim
        fill_circle(&mut img, cx, cy, face_r, RIM);
        fill_circle(&mut img, cx, cy, face_r - s * 0.03, FACE);

        match self {
            Emoji::Smile => {
                eye(&mut img, s, 0.35, 0.40);
                eye(&mut img, s, 0.65, 0.40);
                smile_mouth(&mut img, s);
            }
            Emoji::Grin => {
                eye(&mut img, s, 0.35, 0.38);
                eye(&mut img, s, 0.65, 0.38);
                // Open mouth with a strip of teeth
                fill_half_disc(&mut img, cx, s * 0.56, s * 0.26, DARK, true);
                fill_rect(&mut img, s * 0.32, s * 0.56, s * 0.68, s * 0.63, WHITE);
            }
            Emoji::Wink => {
                // Closed left eye drawn as a thin bar
                fill_rect(&mut img, s * 0.28, s * 0.39, s * 0.42, s * 0.43, DARK);
                eye(&mut img, s, 0.65, 0.40);
                smile_mouth(&mut img, s);
            }
            Emoji::HeartEyes => {
                heart(&mut img, s, 0.35, 0.40);
                heart(&mut img, s, 0.65, 0.40);
                fill_half_disc(&mut img, cx, s * 0.58, s * 0.22, DARK, true);
            }
            Emoji::Cool => {
                // Sunglasses: one bar across both eyes
                fill_rect(&mut img, s * 0.22, s * 0.36, s * 0.78, s * 0.47, SHADE);
                smile_mouth(&mut img, s);
            }
            Emoji::Sad => {
                eye(&mut img, s, 0.35, 0.40);
                eye(&mut img, s, 0.65, 0.40);
                // Frown: upper half of a ring, pushed down
                fill_ring(&mut img, cx, s * 0.72, s * 0.26, s * 0.19, DARK, false);
                fill_circle(&mut img, s * 0.30, s * 0.54, s * 0.05, TEAR);
            }
        }

        img
    }
}

/// A sticker placed on the photo: which emoji, where, and how large.
/// Coordinates are the top-left corner in capture-region logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sticker {
    pub emoji: Emoji,
    pub x: i64,
    pub y: i64,
    pub size: u32,
}

impl Sticker {
    /// Place an emoji at the default spot: horizontally centered, in the
    /// lower half of the capture region.
    pub fn new(emoji: Emoji) -> Self {
        let size = constants::sticker::DEFAULT_SIZE;
        Self {
            emoji,
            x: ((constants::capture::WIDTH - size) / 2) as i64,
            y: (constants::capture::HEIGHT * 2 / 3 - size / 2) as i64,
            size,
        }
    }
}

// ============================================================================
// Drawing primitives
// ============================================================================

/// Alpha-blend `color` into the pixel at (x, y) with the given opacity
fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: [u8; 4], opacity: f32) {
    let px = img.get_pixel_mut(x, y);
    let a = opacity * (color[3] as f32 / 255.0);
    for c in 0..3 {
        let src = color[c] as f32;
        let dst = px.0[c] as f32;
        px.0[c] = (src * a + dst * (1.0 - a)).min(255.0) as u8;
    }
    let dst_a = px.0[3] as f32 / 255.0;
    px.0[3] = ((a + dst_a * (1.0 - a)) * 255.0).min(255.0) as u8;
}

/// Draw a filled circle with a softened edge
fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 4]) {
    let (w, h) = img.dimensions();
    let r2 = radius * radius;

    let min_x = ((cx - radius).floor().max(0.0)) as u32;
    let max_x = ((cx + radius).ceil().min(w as f32 - 1.0)) as u32;
    let min_y = ((cy - radius).floor().max(0.0)) as u32;
    let max_y = ((cy + radius).ceil().min(h as f32 - 1.0)) as u32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let dist2 = dx * dx + dy * dy;
            if dist2 <= r2 {
                // Edge softness (anti-aliasing)
                let edge_factor = if dist2 > r2 * 0.85 {
                    ((r2 - dist2) / (r2 * 0.15)).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                blend_pixel(img, x, y, color, edge_factor);
            }
        }
    }
}

/// Draw half of a filled disc: the lower half when `lower`, else the upper
fn fill_half_disc(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 4], lower: bool) {
    let (w, h) = img.dimensions();
    let r2 = radius * radius;

    let min_x = ((cx - radius).floor().max(0.0)) as u32;
    let max_x = ((cx + radius).ceil().min(w as f32 - 1.0)) as u32;
    let min_y = ((cy - radius).floor().max(0.0)) as u32;
    let max_y = ((cy + radius).ceil().min(h as f32 - 1.0)) as u32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if (lower && dy < 0.0) || (!lower && dy > 0.0) {
                continue;
            }
            let dist2 = dx * dx + dy * dy;
            if dist2 <= r2 {
                let edge_factor = if dist2 > r2 * 0.85 {
                    ((r2 - dist2) / (r2 * 0.15)).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                blend_pixel(img, x, y, color, edge_factor);
            }
        }
    }
}

/// Draw half of a ring (annulus). Lower half makes a smile, upper a frown.
fn fill_ring(
    img: &mut RgbaImage,
    cx: f32,
    cy: f32,
    outer: f32,
    inner: f32,
    color: [u8; 4],
    lower: bool,
) {
    let (w, h) = img.dimensions();
    let outer2 = outer * outer;
    let inner2 = inner * inner;

    let min_x = ((cx - outer).floor().max(0.0)) as u32;
    let max_x = ((cx + outer).ceil().min(w as f32 - 1.0)) as u32;
    let min_y = ((cy - outer).floor().max(0.0)) as u32;
    let max_y = ((cy + outer).ceil().min(h as f32 - 1.0)) as u32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if (lower && dy < 0.0) || (!lower && dy > 0.0) {
                continue;
            }
            let dist2 = dx * dx + dy * dy;
            if dist2 >= inner2 && dist2 <= outer2 {
                let edge_factor = if dist2 > outer2 * 0.85 {
                    ((outer2 - dist2) / (outer2 * 0.15)).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                blend_pixel(img, x, y, color, edge_factor);
            }
        }
    }
}

/// Axis-aligned filled rectangle (coordinates in pixels, end-exclusive)
fn fill_rect(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: [u8; 4]) {
    let (w, h) = img.dimensions();
    let min_x = (x0.max(0.0)) as u32;
    let max_x = (x1.min(w as f32)) as u32;
    let min_y = (y0.max(0.0)) as u32;
    let max_y = (y1.min(h as f32)) as u32;

    for y in min_y..max_y {
        for x in min_x..max_x {
            blend_pixel(img, x, y, color, 1.0);
        }
    }
}

/// Standard round eye at normalized face coordinates
fn eye(img: &mut RgbaImage, s: f32, nx: f32, ny: f32) {
    fill_circle(img, s * nx, s * ny, s * 0.065, DARK);
}

/// Standard lower-half-ring smile
fn smile_mouth(img: &mut RgbaImage, s: f32) {
    fill_ring(img, s * 0.5, s * 0.52, s * 0.28, s * 0.20, DARK, true);
}

/// Blobby heart: two lobes plus a lower point
fn heart(img: &mut RgbaImage, s: f32, nx: f32, ny: f32) {
    let cx = s * nx;
    let cy = s * ny;
    let lobe = s * 0.045;
    fill_circle(img, cx - lobe * 0.9, cy - lobe * 0.5, lobe, HEART);
    fill_circle(img, cx + lobe * 0.9, cy - lobe * 0.5, lobe, HEART);
    fill_circle(img, cx, cy + lobe * 0.6, lobe * 1.1, HEART);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_has_requested_dimensions() {
        for emoji in Emoji::ALL {
            let img = emoji.rasterize(64);
            assert_eq!(img.dimensions(), (64, 64), "{}", emoji.label());
        }
    }

    #[test]
    fn raster_is_transparent_at_corners_and_opaque_at_center() {
        for emoji in Emoji::ALL {
            let img = emoji.rasterize(96);
            assert_eq!(img.get_pixel(0, 0).0[3], 0, "{} corner", emoji.label());
            assert_eq!(img.get_pixel(95, 95).0[3], 0, "{} corner", emoji.label());
            assert!(
                img.get_pixel(48, 30).0[3] > 200,
                "{} face should be opaque",
                emoji.label()
            );
        }
    }

    #[test]
    fn default_sticker_sits_in_lower_half_of_capture_region() {
        let sticker = Sticker::new(Emoji::Smile);
        assert_eq!(sticker.size, crate::constants::sticker::DEFAULT_SIZE);
        let center_y = sticker.y + (sticker.size / 2) as i64;
        assert!(center_y > (crate::constants::capture::HEIGHT / 2) as i64);
        let center_x = sticker.x + (sticker.size / 2) as i64;
        assert_eq!(center_x, (crate::constants::capture::WIDTH / 2) as i64);
    }
}
