/// A host window notification, reduced to what the stage consumes.
///
/// Platform layers (winit in the desktop app, scripted input in the CLI)
/// translate their own events into these before dispatching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The drawable surface changed size (physical pixels).
    Resized { width: u32, height: u32 },
    /// The device pixel ratio changed, e.g. the window moved to another monitor.
    ScaleFactorChanged(f64),
    /// The pointer moved to a raw position (physical pixels, origin top-left).
    PointerMoved { x: f64, y: f64 },
}

impl HostEvent {
    /// Whether this event is routed to the resize listener.
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::Resized { .. } | Self::ScaleFactorChanged(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_routing() {
        assert!(HostEvent::Resized { width: 1, height: 1 }.is_resize());
        assert!(HostEvent::ScaleFactorChanged(2.0).is_resize());
        assert!(!HostEvent::PointerMoved { x: 0.0, y: 0.0 }.is_resize());
    }
}
