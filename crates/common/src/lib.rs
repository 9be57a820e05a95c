//! Shared value types: node identifiers, transforms and colors.

pub mod color;
pub mod types;

pub use color::Color;
pub use types::{NodeId, Transform};
