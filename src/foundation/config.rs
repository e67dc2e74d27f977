use std::path::Path;
use std::time::Duration;

use crate::foundation::error::{WarpError, WarpResult};
use crate::generate::attributes::{AttributeTable, Family};

/// Inclusive range of randomized animation durations, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DurationRange {
    /// Shortest sampled duration.
    pub min: f64,
    /// Longest sampled duration.
    pub max: f64,
}

impl Default for DurationRange {
    fn default() -> Self {
        Self { min: 0.2, max: 0.4 }
    }
}

/// Percentage band a position axis is biased away from.
///
/// Membership is tested with exclusive bounds: `lower < v < upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExclusionZone {
    /// Lower bound, in percent.
    pub lower: u32,
    /// Upper bound, in percent.
    pub upper: u32,
}

impl ExclusionZone {
    /// Return `true` when `v` lies strictly inside the band.
    pub fn contains(self, v: u32) -> bool {
        self.lower < v && v < self.upper
    }
}

/// One exclusion zone per category family.
///
/// Both bands are centered near 47%, the value at which a streak renders centered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExclusionZones {
    /// Zone shared by the thin categories.
    pub thin: ExclusionZone,
    /// Wider zone for the thick category.
    pub thick: ExclusionZone,
}

impl ExclusionZones {
    /// Zone for a category family.
    pub fn for_family(&self, family: Family) -> ExclusionZone {
        match family {
            Family::Thin => self.thin,
            Family::Thick => self.thick,
        }
    }
}

impl Default for ExclusionZones {
    fn default() -> Self {
        Self {
            thin: ExclusionZone {
                lower: 37,
                upper: 57,
            },
            thick: ExclusionZone {
                lower: 32,
                upper: 62,
            },
        }
    }
}

/// Burst (acceleration ramp) parameters.
///
/// Waves run from `start_speed` down by `speed_step`, stopping before `stop_speed`. Each wave's
/// value doubles as the fixed animation duration of every streak it spawns.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BurstPhase {
    /// First wave value, in seconds.
    pub start_speed: f64,
    /// Decrement between waves, in seconds.
    pub speed_step: f64,
    /// Exclusive lower bound for wave values.
    pub stop_speed: f64,
    /// Streaks per wave.
    pub batch: usize,
}

impl Default for BurstPhase {
    fn default() -> Self {
        Self {
            start_speed: 1.0,
            speed_step: 0.1,
            stop_speed: 0.2,
            batch: 20,
        }
    }
}

impl BurstPhase {
    /// Largest wave count a config may imply.
    pub const MAX_WAVES: u64 = 10_000;

    /// Number of waves [`BurstPhase::wave_durations`] yields, computed without allocating.
    pub fn wave_count(&self) -> u64 {
        let start = to_cents(self.start_speed);
        let step = to_cents(self.speed_step);
        let stop = to_cents(self.stop_speed);
        if step <= 0 || start <= stop {
            return 0;
        }
        let span = start.saturating_sub(stop) as u64;
        span.div_ceil(step as u64)
    }

    /// Wave durations in emission order.
    ///
    /// Values are stepped in hundredths so repeated subtraction never drifts.
    pub fn wave_durations(&self) -> Vec<f64> {
        let start = to_cents(self.start_speed);
        let step = to_cents(self.speed_step);
        let stop = to_cents(self.stop_speed);
        if step <= 0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut v = start;
        while v > stop {
            out.push(v as f64 / 100.0);
            v -= step;
        }
        out
    }
}

fn to_cents(v: f64) -> i64 {
    (v * 100.0).round() as i64
}

/// Steady-state stream parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SteadyPhase {
    /// Delay from scheduler start before the first tick, in milliseconds.
    pub delay_ms: u64,
    /// Tick period, in milliseconds.
    pub period_ms: u64,
    /// Streaks per tick.
    pub batch: usize,
    /// Optional soft cap on live streaks. `None` keeps the stream unbounded.
    pub max_live: Option<usize>,
}

impl Default for SteadyPhase {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            period_ms: 1,
            batch: 5,
            max_live: None,
        }
    }
}

impl SteadyPhase {
    /// Start delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Tick period as a [`Duration`].
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Immutable configuration shared by the generators and the scheduler.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Randomized duration range.
    pub durations: DurationRange,
    /// Exclusion zones per family.
    pub zones: ExclusionZones,
    /// Cumulative category thresholds.
    pub categories: AttributeTable,
    /// Burst phase parameters.
    pub burst: BurstPhase,
    /// Steady phase parameters.
    pub steady: SteadyPhase,
    /// Selector handed to the renderer to resolve the root surface.
    pub root_selector: String,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            durations: DurationRange::default(),
            zones: ExclusionZones::default(),
            categories: AttributeTable::default(),
            burst: BurstPhase::default(),
            steady: SteadyPhase::default(),
            root_selector: "#container".to_string(),
        }
    }
}

impl WarpConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> WarpResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| WarpError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> WarpResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            WarpError::Other(anyhow::Error::new(e).context(format!(
                "read config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&raw)
    }

    /// Check every parameter for internal consistency.
    pub fn validate(&self) -> WarpResult<()> {
        let d = self.durations;
        if !(d.min.is_finite() && d.max.is_finite()) || d.min <= 0.0 {
            return Err(WarpError::validation(
                "durations must be finite and strictly positive",
            ));
        }
        if d.min < 0.01 {
            return Err(WarpError::validation(
                "durations.min must be >= 0.01 (durations are kept in hundredths)",
            ));
        }
        if d.min > d.max {
            return Err(WarpError::validation("durations.min must be <= durations.max"));
        }

        for (name, zone) in [("thin", self.zones.thin), ("thick", self.zones.thick)] {
            if zone.lower > zone.upper || zone.upper > 100 {
                return Err(WarpError::validation(format!(
                    "zones.{name} must satisfy lower <= upper <= 100"
                )));
            }
        }

        self.categories.validate()?;

        let b = self.burst;
        if !(b.start_speed.is_finite() && b.speed_step.is_finite() && b.stop_speed.is_finite()) {
            return Err(WarpError::validation("burst speeds must be finite"));
        }
        if to_cents(b.speed_step) <= 0 {
            return Err(WarpError::validation("burst.speed_step must be >= 0.01"));
        }
        if b.stop_speed < 0.0 {
            return Err(WarpError::validation("burst.stop_speed must be >= 0"));
        }
        if b.batch == 0 {
            return Err(WarpError::validation("burst.batch must be > 0"));
        }
        let waves = b.wave_count();
        if waves > BurstPhase::MAX_WAVES {
            return Err(WarpError::validation(format!(
                "burst implies {waves} waves, at most {} are allowed",
                BurstPhase::MAX_WAVES
            )));
        }

        let s = self.steady;
        if s.period_ms == 0 {
            return Err(WarpError::validation("steady.period_ms must be > 0"));
        }
        if s.batch == 0 {
            return Err(WarpError::validation("steady.batch must be > 0"));
        }

        if self.root_selector.trim().is_empty() {
            return Err(WarpError::validation("root_selector must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
