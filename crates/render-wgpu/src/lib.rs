//! wgpu render backend for the stage.
//!
//! Draws every mesh in the scene as an instanced box lit by the scene's
//! directional lights, and provides orbit controls for the camera.
//!
//! # Invariants
//! - Renderer never mutates the scene or camera.
//! - `render` submits GPU work and returns without waiting for it to complete.
//! - Surface configuration always has non-zero dimensions.

mod controls;
mod error;
mod gpu;
mod shaders;

pub use controls::OrbitControls;
pub use error::RenderInitError;
pub use gpu::{SurfaceFrame, WgpuRenderer};
