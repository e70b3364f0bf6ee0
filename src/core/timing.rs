use super::errors::SimError;
use super::types::SimTime;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

/// Uniform duration window `[mean - spread, mean + spread]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingWindow {
    pub mean: SimTime,
    pub spread: SimTime,
}

impl TimingWindow {
    /// Create a validated window
    pub fn new(mean: SimTime, spread: SimTime) -> Result<Self, SimError> {
        let window = Self { mean, spread };
        window.validate("timing window")?;
        Ok(window)
    }

    /// A window that always yields `duration`
    pub fn fixed(duration: SimTime) -> Result<Self, SimError> {
        Self::new(duration, 0.0)
    }

    /// Check that both values are finite, non-negative and `spread <= mean`
    pub fn validate(&self, name: &str) -> Result<(), SimError> {
        if !self.mean.is_finite() || !self.spread.is_finite() {
            return Err(SimError::InvalidConfiguration(format!(
                "{} must be finite (mean={}, spread={})",
                name, self.mean, self.spread
            )));
        }
        if self.mean < 0.0 || self.spread < 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "{} must be non-negative (mean={}, spread={})",
                name, self.mean, self.spread
            )));
        }
        if self.spread > self.mean {
            return Err(SimError::InvalidConfiguration(format!(
                "{} spread {} exceeds mean {}",
                name, self.spread, self.mean
            )));
        }
        Ok(())
    }

    pub fn min(&self) -> SimTime {
        self.mean - self.spread
    }

    pub fn max(&self) -> SimTime {
        self.mean + self.spread
    }

    /// Draw one duration
    ///
    /// A zero spread returns the mean without consuming randomness, and so do
    /// negative or non-finite windows.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimTime {
        if self.spread <= 0.0 || !self.spread.is_finite() || !self.mean.is_finite() {
            return self.mean;
        }
        Uniform::new_inclusive(self.min(), self.max()).sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_inside_window() {
        let window = TimingWindow::new(30.0, 3.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = window.sample(&mut rng);
            assert!((27.0..=33.0).contains(&value), "{} outside window", value);
        }
    }

    #[test]
    fn test_unvalidated_window_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        let negative = TimingWindow {
            mean: 10.0,
            spread: -2.0,
        };
        assert_eq!(negative.sample(&mut rng), 10.0);
        let unbounded = TimingWindow {
            mean: 10.0,
            spread: f64::NAN,
        };
        assert_eq!(unbounded.sample(&mut rng), 10.0);
    }

    #[test]
    fn test_zero_spread_is_exact() {
        let window = TimingWindow::fixed(100.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(window.sample(&mut rng), 100.0);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let window = TimingWindow::new(720.0, 60.0).unwrap();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(window.sample(&mut a), window.sample(&mut b));
        }
    }

    #[test]
    fn test_rejects_bad_windows() {
        assert!(matches!(
            TimingWindow::new(5.0, 6.0),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(TimingWindow::new(-1.0, 0.0).is_err());
        assert!(TimingWindow::new(1.0, -0.5).is_err());
        assert!(TimingWindow::new(f64::INFINITY, 0.0).is_err());
        assert!(TimingWindow::new(0.0, 0.0).is_ok());
        assert!(TimingWindow::new(4.0, 4.0).is_ok());
    }
}
