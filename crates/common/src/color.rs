use serde::{Deserialize, Serialize};

/// RGB color with components in `[0, 1]`, stored in sRGB space.
///
/// Colors are authored as `0xRRGGBB` hex literals. Shading happens in
/// linear space, so renderers call [`Color::to_linear`] before uploading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Convert from sRGB to linear using the piecewise sRGB transfer function.
    pub fn to_linear(self) -> Self {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Self::rgb(decode(self.r), decode(self.g), decode(self.b))
    }

    pub fn to_array(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_split() {
        let c = Color::from_hex(0xFF8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn hex_survives_conversion() {
        assert_eq!(Color::from_hex(0x44BBEE).to_hex(), 0x44BBEE);
        assert_eq!(Color::from_hex(0x1A1A1C).to_hex(), 0x1A1A1C);
    }

    #[test]
    fn linear_keeps_endpoints() {
        assert_eq!(Color::BLACK.to_linear(), Color::BLACK);
        let w = Color::WHITE.to_linear();
        assert!((w.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn linear_darkens_midtones() {
        let mid = Color::rgb(0.5, 0.5, 0.5).to_linear();
        assert!(mid.r < 0.5);
        assert!((mid.r - 0.214).abs() < 1e-3);
    }
}
