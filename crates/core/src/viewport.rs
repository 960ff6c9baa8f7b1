//! Device-pixel-scaled canvas dimensions.

use glam::Vec2;

/// Canvas size in physical pixels together with the pixel ratio it was
/// derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Creates a viewport with explicit physical dimensions.
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Computes the canvas size for a window of `inner_width` × `inner_height`
    /// CSS pixels.
    ///
    /// Products are truncated toward zero, matching how the browser converts
    /// values assigned to `canvas.width`/`canvas.height`. Negative or
    /// non-finite inputs produce a zero dimension.
    pub fn from_window(inner_width: f64, inner_height: f64, pixel_ratio: f64) -> Self {
        Self {
            width: scaled_dimension(inner_width, pixel_ratio),
            height: scaled_dimension(inner_height, pixel_ratio),
            pixel_ratio: pixel_ratio as f32,
        }
    }

    /// Width in physical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in physical pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ratio between physical and CSS pixels.
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Value for the `resolution` uniform.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

fn scaled_dimension(css_pixels: f64, pixel_ratio: f64) -> u32 {
    let scaled = css_pixels * pixel_ratio;
    if scaled.is_finite() && scaled > 0.0 {
        // `as` saturates at u32::MAX and truncates the fraction.
        scaled as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_window_scales_by_pixel_ratio() {
        let vp = Viewport::from_window(1280.0, 720.0, 2.0);
        assert_eq!(vp.width(), 2560);
        assert_eq!(vp.height(), 1440);
        assert_eq!(vp.resolution(), Vec2::new(2560.0, 1440.0));
    }

    #[test]
    fn fractional_products_truncate() {
        let vp = Viewport::from_window(333.0, 101.0, 1.5);
        assert_eq!(vp.width(), 499);
        assert_eq!(vp.height(), 151);
    }

    #[test]
    fn invalid_inputs_clamp_to_zero() {
        let vp = Viewport::from_window(-10.0, f64::NAN, 1.0);
        assert_eq!(vp.width(), 0);
        assert_eq!(vp.height(), 0);

        let vp = Viewport::from_window(100.0, 100.0, f64::INFINITY);
        assert_eq!(vp.width(), 0);
    }

    #[test]
    fn from_window_is_idempotent() {
        let a = Viewport::from_window(800.0, 600.0, 1.25);
        let b = Viewport::from_window(800.0, 600.0, 1.25);
        assert_eq!(a, b);
    }
}
