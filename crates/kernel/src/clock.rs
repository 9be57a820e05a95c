use serde::Serialize;
use std::time::{Duration, Instant};

/// Monotonic time source for the frame clock.
pub trait TimeSource {
    /// Time since an arbitrary fixed origin. Must never go backwards.
    fn now(&mut self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Source that advances by a fixed step on every query after the first.
///
/// Used for headless simulation and tests, where frames must be reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepTime {
    step: Duration,
    now: Option<Duration>,
}

impl FixedStepTime {
    pub fn new(step: Duration) -> Self {
        Self { step, now: None }
    }
}

impl TimeSource for FixedStepTime {
    fn now(&mut self) -> Duration {
        let now = match self.now {
            None => Duration::ZERO,
            Some(t) => t + self.step,
        };
        self.now = Some(now);
        now
    }
}

/// Frame timing snapshot returned by [`FrameClock::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameTime {
    /// Seconds since the clock was created, summed over all ticks.
    pub elapsed: f64,
    /// Seconds since the previous tick.
    pub delta: f64,
    /// Number of ticks taken before this one.
    pub frame_index: u64,
}

/// Tracks elapsed time and per-frame delta.
///
/// Tick exactly once per rendered frame. The clock is never reset, so
/// `elapsed` only grows.
pub struct FrameClock {
    source: Box<dyn TimeSource>,
    last: Duration,
    current: FrameTime,
    ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }

    /// Clock driven by a custom time source. The source is sampled once here
    /// to set the baseline for the first delta.
    pub fn with_source(source: impl TimeSource + 'static) -> Self {
        let mut source: Box<dyn TimeSource> = Box::new(source);
        let last = source.now();
        Self {
            source,
            last,
            current: FrameTime::default(),
            ticks: 0,
        }
    }

    /// Advance the clock and return the new timing snapshot.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.source.now();
        let delta = now.saturating_sub(self.last);
        self.last = self.last.max(now);

        self.current = FrameTime {
            elapsed: self.current.elapsed + delta.as_secs_f64(),
            delta: delta.as_secs_f64(),
            frame_index: self.ticks,
        };
        self.ticks += 1;
        self.current
    }

    pub fn elapsed(&self) -> f64 {
        self.current.elapsed
    }

    pub fn last_delta(&self) -> f64 {
        self.current.delta
    }

    /// Number of ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn current(&self) -> FrameTime {
        self.current
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("current", &self.current)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a scripted list of timestamps, holding the last one.
    struct Scripted(Vec<Duration>, usize);

    impl TimeSource for Scripted {
        fn now(&mut self) -> Duration {
            let t = self.0[self.1.min(self.0.len() - 1)];
            self.1 += 1;
            t
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fixed_step_ticks() {
        let mut clock = FrameClock::with_source(FixedStepTime::new(ms(16)));
        let first = clock.tick();
        assert!((first.delta - 0.016).abs() < 1e-9);
        assert_eq!(first.frame_index, 0);

        let second = clock.tick();
        assert!((second.elapsed - 0.032).abs() < 1e-9);
        assert_eq!(second.frame_index, 1);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let mut clock = FrameClock::with_source(Scripted(
            vec![ms(0), ms(5), ms(5), ms(40), ms(41), ms(100)],
            0,
        ));
        let mut last = 0.0;
        for _ in 0..8 {
            let t = clock.tick();
            assert!(t.elapsed >= last);
            assert!(t.delta >= 0.0);
            last = t.elapsed;
        }
        assert!((clock.elapsed() - 0.1).abs() < 1e-9);
        assert_eq!(clock.last_delta(), 0.0);
    }

    #[test]
    fn backwards_source_yields_zero_delta() {
        let mut clock = FrameClock::with_source(Scripted(vec![ms(50), ms(80), ms(60), ms(90)], 0));
        assert!((clock.tick().delta - 0.030).abs() < 1e-9);
        assert_eq!(clock.tick().delta, 0.0);
        // Baseline stays at the high-water mark.
        assert!((clock.tick().delta - 0.010).abs() < 1e-9);
        assert!((clock.elapsed() - 0.040).abs() < 1e-9);
    }

    #[test]
    fn real_clock_advances() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        std::thread::sleep(ms(2));
        let b = clock.tick();
        assert!(b.elapsed >= a.elapsed);
        assert!(b.delta > 0.0);
    }
}
