use serde::{Deserialize, Serialize};

/// Size and density of the drawable surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    width: u32,
    height: u32,
    device_pixel_ratio: f64,
}

impl ViewportState {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Width divided by height, recomputed on every call.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        on_resize(1, 1, 1.0)
    }
}

/// Build the viewport state for a new surface size.
///
/// Zero dimensions are clamped to 1 so the aspect ratio stays finite. A pixel
/// ratio that is not a positive finite number falls back to 1.0.
pub fn on_resize(width: u32, height: u32, device_pixel_ratio: f64) -> ViewportState {
    if width == 0 || height == 0 {
        tracing::debug!("degenerate viewport {width}x{height}, clamping to 1");
    }
    let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    ViewportState {
        width: width.max(1),
        height: height.max(1),
        device_pixel_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_is_width_over_height() {
        for (w, h) in [(800, 600), (1920, 1080), (1, 1), (3, 7), (4096, 17)] {
            let v = on_resize(w, h, 1.0);
            assert_eq!(v.aspect_ratio(), w as f32 / h as f32);
        }
    }

    #[test]
    fn resize_changes_aspect() {
        let before = on_resize(800, 600, 1.0);
        let after = on_resize(1920, 1080, 1.0);
        assert!((before.aspect_ratio() - 1.3333).abs() < 1e-4);
        assert!((after.aspect_ratio() - 1.7778).abs() < 1e-4);
    }

    #[test]
    fn zero_dimensions_clamp_to_one() {
        let v = on_resize(0, 0, 2.0);
        assert_eq!(v.width(), 1);
        assert_eq!(v.height(), 1);
        assert_eq!(v.aspect_ratio(), 1.0);

        let v = on_resize(640, 0, 1.0);
        assert_eq!(v.aspect_ratio(), 640.0);
    }

    #[test]
    fn invalid_pixel_ratio_falls_back() {
        assert_eq!(on_resize(10, 10, 0.0).device_pixel_ratio(), 1.0);
        assert_eq!(on_resize(10, 10, -2.0).device_pixel_ratio(), 1.0);
        assert_eq!(on_resize(10, 10, f64::NAN).device_pixel_ratio(), 1.0);
        assert_eq!(on_resize(10, 10, 1.5).device_pixel_ratio(), 1.5);
    }
}
