//! Delays between requests.
//!
//! The pipeline sleeps through [`Sleeper`] so tests can run it with no real
//! waiting and inspect the requested durations.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Something that can wait
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeping on the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Inclusive range of whole seconds to wait between downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitRange {
    min_secs: u64,
    max_secs: u64,
}

impl WaitRange {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }

    /// No waiting at all
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Uniformly random duration in `[min, max]` seconds
    pub fn sample(&self) -> Duration {
        let secs = rand::rng().random_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_range() {
        let range = WaitRange::new(2, 5);
        for _ in 0..200 {
            let secs = range.sample().as_secs();
            assert!((2..=5).contains(&secs), "out of range: {}", secs);
        }
    }

    #[test]
    fn test_fixed_range() {
        assert_eq!(WaitRange::new(3, 3).sample(), Duration::from_secs(3));
        assert_eq!(WaitRange::none().sample(), Duration::ZERO);
    }

    #[test]
    fn test_inverted_bounds_are_normalized() {
        assert_eq!(WaitRange::new(5, 1), WaitRange::new(1, 5));
    }

    #[tokio::test]
    async fn test_tokio_sleeper_zero_returns() {
        TokioSleeper.sleep(Duration::ZERO).await;
    }
}
