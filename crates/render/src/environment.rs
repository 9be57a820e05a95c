//! Environment-map extension point.
//!
//! Image-based lighting is not implemented yet. The loader accepts a source
//! description so callers can be wired up now, and reports anything other
//! than [`EnvironmentSource::None`] as unsupported.

use std::path::PathBuf;

/// Where an environment map would come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvironmentSource {
    #[default]
    None,
    /// Equirectangular panorama on disk, used for image-based lighting.
    Equirectangular(PathBuf),
}

/// A loaded environment map.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 4]>,
}

#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("environment maps are not supported yet: {0}")]
    Unsupported(PathBuf),
}

impl EnvironmentSource {
    /// Load the environment map described by this source.
    pub fn load(&self) -> Result<Option<EnvironmentMap>, EnvironmentError> {
        match self {
            Self::None => Ok(None),
            Self::Equirectangular(path) => Err(EnvironmentError::Unsupported(path.clone())),
        }
    }
}

impl From<Option<PathBuf>> for EnvironmentSource {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::None, Self::Equirectangular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_loads_nothing() {
        assert!(EnvironmentSource::None.load().unwrap().is_none());
    }

    #[test]
    fn equirectangular_is_unsupported() {
        let src = EnvironmentSource::from(Some(PathBuf::from("studio.hdr")));
        let err = src.load().unwrap_err();
        assert!(err.to_string().contains("studio.hdr"));
    }
}
