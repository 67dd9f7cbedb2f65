//! Frame clock and loop bookkeeping
//!
//! The host calls back once per display refresh with a timestamp in
//! milliseconds. [`FrameClock`] turns those into clamped deltas, and
//! [`FrameLoop`] tracks which scheduled callback is the live one so a restart
//! can cancel the previous chain before starting a new one.

use crate::consts::{DEFAULT_FRAME_DT, MAX_FRAME_DT};

/// Measures elapsed time between frame callbacks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    /// Delta of the most recent frame (s)
    dt: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the delta to simulate (s)
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT),
            None => DEFAULT_FRAME_DT,
        };
        self.last_ms = Some(now_ms);
        self.dt = dt;
        dt
    }

    /// Delta of the most recent frame (s)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Forget the previous timestamp (after a restart or a long suspension)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.dt = 0.0;
    }
}

/// Identifier of one generation of the frame callback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopGeneration(u64);

/// Host handle for a pending frame request (`requestAnimationFrame` id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub i32);

/// Owns the cancellation handle for the frame callback chain
#[derive(Debug, Default)]
pub struct FrameLoop {
    generation: u64,
    pending: Option<FrameRequest>,
    running: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new callback chain
    ///
    /// Returns the new generation and the previous chain's pending request,
    /// which the caller must cancel with the host.
    pub fn begin(&mut self) -> (LoopGeneration, Option<FrameRequest>) {
        self.generation += 1;
        self.running = true;
        (LoopGeneration(self.generation), self.pending.take())
    }

    /// Remember the request scheduled for `generation`
    ///
    /// Returns false (and keeps nothing) if that generation is stale.
    pub fn armed(&mut self, generation: LoopGeneration, request: FrameRequest) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending = Some(request);
        true
    }

    /// A callback from `generation` fired. Returns true if it should run and re-arm.
    pub fn accept(&mut self, generation: LoopGeneration) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_current(&self, generation: LoopGeneration) -> bool {
        self.running && generation.0 == self.generation
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_uses_default_dt() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), DEFAULT_FRAME_DT);
        assert!((clock.advance(1250.0) - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(5_000.0), MAX_FRAME_DT);
        assert_eq!(clock.dt(), MAX_FRAME_DT);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(50.0), 0.0);
    }

    #[test]
    fn test_reset_forgets_timestamp() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), DEFAULT_FRAME_DT);
    }

    #[test]
    fn test_restart_cancels_previous_chain() {
        let mut frame_loop = FrameLoop::new();
        let (first, stale) = frame_loop.begin();
        assert_eq!(stale, None);
        assert!(frame_loop.armed(first, FrameRequest(1)));

        // Restart while frame 1 is still pending
        let (second, stale) = frame_loop.begin();
        assert_eq!(stale, Some(FrameRequest(1)));
        assert!(frame_loop.armed(second, FrameRequest(2)));

        // If the old callback fires anyway it must not run or re-arm
        assert!(!frame_loop.accept(first));
        assert!(!frame_loop.armed(first, FrameRequest(3)));
        assert_eq!(frame_loop.pending, Some(FrameRequest(2)));

        assert!(frame_loop.accept(second));
        assert_eq!(frame_loop.pending, None);
    }

    #[test]
    fn test_nothing_runs_before_begin() {
        let mut frame_loop = FrameLoop::new();
        assert!(!frame_loop.accept(LoopGeneration(0)));
        assert!(!frame_loop.armed(LoopGeneration(0), FrameRequest(7)));
        assert_eq!(frame_loop.pending, None);
    }

    proptest! {
        #[test]
        fn prop_delta_always_within_bounds(stamps in proptest::collection::vec(0.0f64..1e7, 1..64)) {
            let mut clock = FrameClock::new();
            for stamp in stamps {
                let dt = clock.advance(stamp);
                prop_assert!((0.0..=MAX_FRAME_DT).contains(&dt));
            }
        }
    }
}
