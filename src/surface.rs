use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

use crate::geometry;

/// A fully transparent pixel, the content of a freshly prepared surface
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Largest width or height a surface is allocated with
pub const MAX_SURFACE_DIMENSION: u32 = 8192;

/// The single mutable raster bitmap strokes are burned into.
///
/// Pixels are straight (unmultiplied) RGBA8. A new surface, and a surface
/// after [`Surface::clear`], is fully transparent.
#[derive(Clone)]
pub struct Surface {
    pixels: RgbaImage,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Create a blank surface. Each dimension is clamped to
    /// `1..=MAX_SURFACE_DIMENSION`.
    pub fn new(width: u32, height: u32) -> Self {
        let clamped = (clamp_dimension(width), clamp_dimension(height));
        if clamped != (width, height) {
            log::warn!(
                "Surface size {}x{} clamped to {}x{}",
                width,
                height,
                clamped.0,
                clamped.1
            );
        }
        Self {
            pixels: RgbaImage::from_pixel(clamped.0, clamped.1, TRANSPARENT),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// True if no pixel has been painted since the surface was blanked
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| *p == TRANSPARENT)
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Burn a round-capped segment into the surface.
    ///
    /// Every pixel whose centre lies within `width / 2` of the segment takes
    /// `color`. A zero-length segment paints a round dot.
    pub fn draw_segment(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32) {
        let radius = width.max(1.0) / 2.0;
        let bounds = geometry::segment_bounds(from, to, radius);

        let (w, h) = self.size();
        let min_x = bounds.min.x.floor().max(0.0) as u32;
        let min_y = bounds.min.y.floor().max(0.0) as u32;
        let max_x = bounds.max.x.ceil().min(w as f32);
        let max_y = bounds.max.y.ceil().min(h as f32);
        if max_x <= 0.0 || max_y <= 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as u32, max_y as u32);

        let rgba = to_rgba(color);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if geometry::distance_to_line_segment(centre, from, to) <= radius {
                    self.pixels.put_pixel(x, y, rgba);
                }
            }
        }
    }

    /// Overwrite the full pixel content with `image`.
    ///
    /// The surface is cleared first so no residual pixels survive, then the
    /// image is copied in. Dimensions must already match.
    pub(crate) fn replace_with(&mut self, image: &RgbaImage) {
        debug_assert_eq!(image.dimensions(), self.size());
        self.clear();
        image::imageops::replace(&mut self.pixels, image, 0, 0);
    }
}

/// Convert an egui colour to a straight-alpha image pixel
pub fn to_rgba(color: Color32) -> Rgba<u8> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba([r, g, b, a])
}

fn clamp_dimension(size: u32) -> u32 {
    size.clamp(1, MAX_SURFACE_DIMENSION)
}
