/// Fixed-step timing for the simulation
///
/// One simulation step is one rendered frame at 60 Hz. Wall-clock time is
/// accumulated and converted into a whole number of steps per frame so
/// gameplay timers (which count ticks, not seconds) stay consistent.
use std::time::{Duration, Instant};

/// Target simulation rate (60 steps per second)
pub const TICKS_PER_SECOND: u32 = 60;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Fixed-step accumulator
pub struct FixedTicker {
    /// Accumulated time not yet turned into steps
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Current frame number
    frame_count: u64,

    /// Total steps handed out
    step_count: u64,
}

impl FixedTicker {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Begin a new frame, returns the number of simulation steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop the backlog we refused to simulate
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::trace!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.step_count += steps as u64;
        steps
    }

    /// Duration of one simulation step
    pub fn step_duration(&self) -> Duration {
        FIXED_TIMESTEP_DURATION
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of steps handed out
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_ticker_creation() {
        let ticker = FixedTicker::new();
        assert_eq!(ticker.frame_count(), 0);
        assert_eq!(ticker.step_count(), 0);
    }

    #[test]
    fn test_step_duration_matches_rate() {
        let ticker = FixedTicker::new();
        let secs = ticker.step_duration().as_secs_f32();
        assert!((secs - 1.0 / TICKS_PER_SECOND as f32).abs() < 0.0001);
    }

    #[test]
    fn test_max_steps_limit() {
        let mut ticker = FixedTicker::new();

        // 300ms would allow 18 steps
        thread::sleep(Duration::from_millis(300));

        let steps = ticker.begin_frame();
        assert_eq!(steps, MAX_STEPS_PER_FRAME);
        assert_eq!(ticker.step_count(), MAX_STEPS_PER_FRAME as u64);

        // The rest of the backlog is dropped rather than carried over
        assert_eq!(ticker.begin_frame(), 0);
    }
}
