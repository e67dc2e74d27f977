use std::time::Duration;

use crate::foundation::config::DurationRange;
use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::random::UniformSource;

/// Positive animation lifetime in seconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
pub struct AnimationDuration(f64);

impl AnimationDuration {
    /// Validate a lifetime; it must be finite and strictly positive.
    pub fn new(secs: f64) -> WarpResult<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(WarpError::validation(format!(
                "animation duration must be finite and > 0, got {secs}"
            )));
        }
        Ok(Self(secs))
    }

    /// Lifetime in seconds.
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Lifetime as whole milliseconds (`secs * 1000`, rounded).
    pub fn as_millis(self) -> u64 {
        (self.0 * 1000.0).round() as u64
    }

    /// Lifetime as a timer delay.
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }
}

/// Return `explicit` unchanged, or sample uniformly in `range` rounded to two decimals.
pub fn sample_duration(
    range: DurationRange,
    explicit: Option<AnimationDuration>,
    rng: &mut dyn UniformSource,
) -> AnimationDuration {
    if let Some(d) = explicit {
        return d;
    }
    let raw = range.min + (range.max - range.min) * rng.next_unit();
    let rounded = (raw * 100.0).round() / 100.0;
    // Ranges below 0.005s would otherwise round to zero.
    AnimationDuration(rounded.max(0.01))
}

#[cfg(test)]
#[path = "../../tests/unit/generate/duration.rs"]
mod tests;
