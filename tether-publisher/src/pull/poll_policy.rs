use std::time::Duration;

/// Polling cadence for `GET answer`.
///
/// The delay starts at `interval`, grows by `multiplier` on every miss and is
/// capped at `max_interval`. The default is a fixed one second cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(1))
    }
}

impl PollPolicy {
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_interval: interval,
            multiplier: 1.0,
        }
    }

    pub fn next_delay(&self, previous: Duration) -> Duration {
        let ceiling = self.max_interval.max(self.interval);
        previous
            .mul_f64(self.multiplier.max(1.0))
            .clamp(self.interval, ceiling)
    }
}
