use anchor_lang::prelude::*;

use crate::{
    constants::{
        DRAW_DURATION_MS, INITIAL_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, SETTLE_GROWTH_MS,
        SETTLE_THRESHOLD,
    },
    error::RaffleError,
};

/// Speed curve of the draw animation.
///
/// Ticks start `initial_interval_ms` apart and speed up linearly with progress,
/// never dropping below `min_interval_ms`. Once progress reaches
/// `settle_threshold` they slow down again, growing by up to
/// `settle_growth_ms` by the end of the animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawTiming {
    duration_ms: u64,
    initial_interval_ms: u64,
    min_interval_ms: u64,
    settle_threshold: f64,
    settle_growth_ms: u64,
}

impl DrawTiming {
    /// # Errors
    /// - `InvalidConfig` if the duration or minimum interval is zero, or the
    ///   threshold is not strictly between 0 and 1
    pub fn new(
        duration_ms: u64,
        initial_interval_ms: u64,
        min_interval_ms: u64,
        settle_threshold: f64,
        settle_growth_ms: u64,
    ) -> Result<Self> {
        require!(duration_ms > 0, RaffleError::InvalidConfig);
        require!(min_interval_ms > 0, RaffleError::InvalidConfig);
        require!(
            settle_threshold > 0.0 && settle_threshold < 1.0,
            RaffleError::InvalidConfig
        );

        Ok(Self {
            duration_ms,
            initial_interval_ms,
            min_interval_ms,
            settle_threshold,
            settle_growth_ms,
        })
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Fraction of the animation covered after `elapsed_ms`, capped at 1.
    pub fn progress(&self, elapsed_ms: u64) -> f64 {
        (elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn is_settling(&self, progress: f64) -> bool {
        progress >= self.settle_threshold
    }

    /// Delay before the tick that follows one fired at `progress`, truncated
    /// to whole milliseconds.
    pub fn interval_ms(&self, progress: f64) -> u64 {
        let initial = self.initial_interval_ms as f64;
        let min = self.min_interval_ms as f64;

        let interval = if progress < self.settle_threshold {
            (initial - initial * progress).max(min)
        } else {
            let settled = (progress - self.settle_threshold) / (1.0 - self.settle_threshold);
            min + self.settle_growth_ms as f64 * settled
        };

        interval as u64
    }
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            duration_ms: DRAW_DURATION_MS,
            initial_interval_ms: INITIAL_TICK_INTERVAL_MS,
            min_interval_ms: MIN_TICK_INTERVAL_MS,
            settle_threshold: SETTLE_THRESHOLD,
            settle_growth_ms: SETTLE_GROWTH_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::expect_err;

    #[test]
    fn test_accelerating_phase() {
        let timing = DrawTiming::default();

        assert_eq!(timing.interval_ms(0.0), 100);
        assert_eq!(timing.interval_ms(0.25), 75);
        assert_eq!(timing.interval_ms(0.5), 50);
        assert!(!timing.is_settling(0.79));
    }

    #[test]
    fn test_settling_phase_slows_down() {
        let timing = DrawTiming::default();

        assert_eq!(timing.interval_ms(0.8), 20);
        assert!(timing.is_settling(0.8));

        let mid = timing.interval_ms(timing.progress(2_700));
        assert!((119..=120).contains(&mid));

        let samples: Vec<u64> = (2_400..=3_000)
            .step_by(100)
            .map(|elapsed| timing.interval_ms(timing.progress(elapsed)))
            .collect();
        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(*samples.last().unwrap() <= 220);
    }

    #[test]
    fn test_interval_never_below_minimum() {
        let timing = DrawTiming::new(3_000, 100, 40, 0.8, 200).unwrap();
        assert_eq!(timing.interval_ms(0.7), 40);
    }

    #[test]
    fn test_progress_is_capped() {
        let timing = DrawTiming::default();
        assert_eq!(timing.progress(1_500), 0.5);
        assert_eq!(timing.progress(9_000), 1.0);
    }

    #[test]
    fn test_new_rejects_degenerate_curves() {
        expect_err(DrawTiming::new(0, 100, 20, 0.8, 200), RaffleError::InvalidConfig);
        expect_err(DrawTiming::new(3_000, 100, 0, 0.8, 200), RaffleError::InvalidConfig);
        expect_err(DrawTiming::new(3_000, 100, 20, 1.0, 200), RaffleError::InvalidConfig);
    }
}
