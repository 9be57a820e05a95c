//! Rendering Adapter: scene graph, camera and renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate them.
//! - The camera projection is derived from its parameters on every query.
//! - Raycast hits are reported nearest first.

pub mod bootstrap;
mod camera;
mod config;
pub mod environment;
mod raycast;
mod renderer;
mod scene;

pub use camera::PerspectiveCamera;
pub use config::{ColorSpace, PowerPreference, RendererConfig};
pub use environment::{EnvironmentError, EnvironmentMap, EnvironmentSource};
pub use raycast::{Intersection, Ray, Raycaster};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{DirectionalLight, Geometry, Mesh, Node, NodeKind, Scene, StandardMaterial};
