use viewstage_common::Color;

/// Which GPU adapter class to prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerPreference {
    #[default]
    HighPerformance,
    LowPower,
    None,
}

/// Color space of the final output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Srgb,
    Linear,
}

/// Options fixed when a renderer is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub power_preference: PowerPreference,
    pub antialias: bool,
    pub stencil: bool,
    pub depth: bool,
    pub clear_color: Color,
    pub output_color_space: ColorSpace,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            power_preference: PowerPreference::HighPerformance,
            antialias: false,
            stencil: false,
            depth: false,
            clear_color: Color::from_hex(crate::bootstrap::CLEAR_COLOR),
            output_color_space: ColorSpace::Srgb,
        }
    }
}

impl RendererConfig {
    /// MSAA sample count implied by `antialias`.
    pub fn sample_count(&self) -> u32 {
        if self.antialias { 4 } else { 1 }
    }

    /// Whether a depth/stencil attachment is needed at all.
    pub fn needs_depth_stencil(&self) -> bool {
        self.depth || self.stencil
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_bootstrap_options() {
        let cfg = RendererConfig::default();
        assert_eq!(cfg.power_preference, PowerPreference::HighPerformance);
        assert!(!cfg.antialias);
        assert!(!cfg.stencil);
        assert!(!cfg.depth);
        assert_eq!(cfg.clear_color.to_hex(), 0x1A1A1C);
        assert_eq!(cfg.output_color_space, ColorSpace::Srgb);
        assert_eq!(cfg.sample_count(), 1);
        assert!(!cfg.needs_depth_stencil());
    }

    #[test]
    fn antialias_and_depth_flags() {
        let cfg = RendererConfig {
            antialias: true,
            stencil: true,
            ..RendererConfig::default()
        };
        assert_eq!(cfg.sample_count(), 4);
        assert!(cfg.needs_depth_stencil());
    }
}
