use serde::Serialize;
use viewstage_input::HostEvent;

/// Lifecycle of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopState {
    /// Constructed, not yet started.
    Idle,
    /// Rescheduling itself every frame.
    Running,
    /// Stopped for good. Listeners are deregistered.
    Stopped,
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("render loop is already running")]
    AlreadyRunning,
    #[error("render loop was stopped and cannot be restarted")]
    Stopped,
}

/// Requests that the next frame be run at the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that only counts requests. Drives headless loops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRequests(pub u64);

impl FrameScheduler for FrameRequests {
    fn request_frame(&mut self) {
        self.0 += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Listeners {
    resize: bool,
    pointer_move: bool,
}

/// Render loop state machine plus its event listener registrations.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    listeners: Listeners,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            listeners: Listeners::default(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames run since start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Register listeners and enter `Running`.
    pub fn start(&mut self) -> Result<(), LoopError> {
        match self.state {
            LoopState::Idle => {
                self.listeners = Listeners {
                    resize: true,
                    pointer_move: true,
                };
                self.state = LoopState::Running;
                tracing::info!("render loop started");
                Ok(())
            }
            LoopState::Running => Err(LoopError::AlreadyRunning),
            LoopState::Stopped => Err(LoopError::Stopped),
        }
    }

    /// Deregister listeners and stop rescheduling. Returns whether the state changed.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.listeners = Listeners::default();
        self.state = LoopState::Stopped;
        tracing::info!(frames = self.frames, "render loop stopped");
        true
    }

    /// Whether a listener is registered for this event.
    pub fn listens(&self, event: &HostEvent) -> bool {
        if event.is_resize() {
            self.listeners.resize
        } else {
            self.listeners.pointer_move
        }
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames += 1;
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESIZE: HostEvent = HostEvent::Resized {
        width: 10,
        height: 10,
    };
    const MOVE: HostEvent = HostEvent::PointerMoved { x: 1.0, y: 1.0 };

    #[test]
    fn idle_has_no_listeners() {
        let lp = RenderLoop::new();
        assert_eq!(lp.state(), LoopState::Idle);
        assert!(!lp.listens(&RESIZE));
        assert!(!lp.listens(&MOVE));
    }

    #[test]
    fn start_registers_listeners() {
        let mut lp = RenderLoop::new();
        lp.start().unwrap();
        assert!(lp.is_running());
        assert!(lp.listens(&RESIZE));
        assert!(lp.listens(&MOVE));
        assert!(lp.listens(&HostEvent::ScaleFactorChanged(2.0)));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut lp = RenderLoop::new();
        lp.start().unwrap();
        assert_eq!(lp.start(), Err(LoopError::AlreadyRunning));
    }

    #[test]
    fn stop_deregisters_and_is_final() {
        let mut lp = RenderLoop::new();
        lp.start().unwrap();
        assert!(lp.stop());
        assert!(!lp.stop());
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(!lp.listens(&RESIZE));
        assert!(!lp.listens(&MOVE));
        assert_eq!(lp.start(), Err(LoopError::Stopped));
    }

    #[test]
    fn stop_from_idle() {
        let mut lp = RenderLoop::new();
        assert!(lp.stop());
        assert_eq!(lp.start(), Err(LoopError::Stopped));
    }

    #[test]
    fn counting_scheduler() {
        let mut requests = FrameRequests::default();
        requests.request_frame();
        requests.request_frame();
        assert_eq!(requests, FrameRequests(2));
    }

    #[test]
    fn state_display() {
        assert_eq!(LoopState::Running.to_string(), "running");
    }
}
