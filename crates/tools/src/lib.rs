//! Developer Tooling: read-only inspection of the running stage.
//!
//! # Invariants
//! - Tools never mutate the stage.

pub mod inspector;

pub use inspector::{PickInfo, StageInspector, StageSummary};
