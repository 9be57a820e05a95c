//! Host input: viewport dimensions and pointer position in normalized device coordinates.
//!
//! # Invariants
//! - Viewport dimensions are always positive; the aspect ratio is derived, never stored.
//! - Pointer updates outside the viewport (boundary included) leave the state unchanged.
//! - Both state types are updated through pure functions returning the new value.

pub mod event;
pub mod pointer;
pub mod viewport;

pub use event::HostEvent;
pub use pointer::{PointerState, on_pointer_move};
pub use viewport::{ViewportState, on_resize};
