//! Stage Kernel: frame timing, render loop lifecycle and the controller that owns
//! viewport, pointer and scene state.
//!
//! # Invariants
//! - Each frame runs clock tick, picking, draw request, reschedule, in that order.
//! - Viewport, pointer and clock are written only through their own handlers.
//! - A stopped loop never reschedules and ignores host events.

pub mod clock;
pub mod render_loop;
pub mod stage;

pub use clock::{FixedStepTime, FrameClock, FrameTime, MonotonicTime, TimeSource};
pub use render_loop::{FrameRequests, FrameScheduler, LoopError, LoopState, RenderLoop};
pub use stage::{PickHandler, Stage};
