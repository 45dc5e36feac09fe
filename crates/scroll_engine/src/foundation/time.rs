//! Time management utilities

use std::time::Instant;

/// Counts rendered frames against wall-clock time
#[derive(Debug, Clone)]
pub struct Timer {
    started: Instant,
    frames: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Start measuring now
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
        }
    }

    /// Record one rendered frame
    pub fn tick(&mut self) {
        self.frames += 1;
    }

    /// Frames recorded so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames per wall-clock second since the timer started
    pub fn average_fps(&self) -> f32 {
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed > 0.0 {
            self.frames as f32 / elapsed
        } else {
            0.0
        }
    }
}

/// Fixed time step accumulator
///
/// Elapsed wall time is fed in with [`FixedTimestep::advance`], which returns
/// how many whole steps of `step` seconds are due. The remainder carries over
/// to the next call, so the simulation always advances in identical steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step length in seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps: 8,
        }
    }

    /// Cap the number of steps one call may return (spiral-of-death guard)
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Length of one step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add elapsed time and return the number of steps to run
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            log::debug!(
                "Fixed timestep fell behind, dropping {:.3}s",
                self.accumulator
            );
            self.accumulator %= self.step;
        }

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        assert_eq!(timer.frames(), 0);
        timer.tick();
        timer.tick();
        assert_eq!(timer.frames(), 2);
        assert!(timer.average_fps() >= 0.0);
    }

    #[test]
    fn test_fixed_timestep_carries_remainder() {
        let mut fixed = FixedTimestep::new(0.25);
        assert_eq!(fixed.advance(0.125), 0);
        assert_eq!(fixed.advance(0.25), 1);
        assert_eq!(fixed.advance(0.375), 2);
    }

    #[test]
    fn test_fixed_timestep_caps_steps() {
        let mut fixed = FixedTimestep::new(0.25).with_max_steps(2);
        assert_eq!(fixed.advance(10.0), 2);
        // Backlog was dropped
        assert_eq!(fixed.advance(0.0), 0);
    }

    #[test]
    fn test_fixed_timestep_ignores_negative_time() {
        let mut fixed = FixedTimestep::new(0.5);
        assert_eq!(fixed.advance(-3.0), 0);
        assert_eq!(fixed.advance(0.5), 1);
    }
}
