use crate::foundation::config::{ExclusionZone, ExclusionZones};
use crate::foundation::random::UniformSource;
use crate::generate::attributes::Category;

/// Starting position as container percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal offset, in percent.
    pub left: u32,
    /// Vertical offset, in percent.
    pub top: u32,
}

/// Sample a position for `category`, steering away from the center.
///
/// `left` is unrestricted. When it lands strictly inside the category's exclusion zone, `top`
/// is drawn from `[0, lower]` or `[upper, 100]` with equal odds, so both axes never sit inside
/// the zone at once.
pub fn sample_position(
    category: Category,
    zones: &ExclusionZones,
    rng: &mut dyn UniformSource,
) -> Position {
    let zone = zones.for_family(category.family());
    let left = sample_axis(rng, 0, 100);
    let top = if zone.contains(left) {
        sample_outside(zone, rng)
    } else {
        sample_axis(rng, 0, 100)
    };
    Position { left, top }
}

fn sample_outside(zone: ExclusionZone, rng: &mut dyn UniformSource) -> u32 {
    if rng.next_unit() * 100.0 < 50.0 {
        sample_axis(rng, 0, zone.lower)
    } else {
        sample_axis(rng, zone.upper, 100)
    }
}

// Truncates, so `max` itself is only reachable when `min == max`.
fn sample_axis(rng: &mut dyn UniformSource, min: u32, max: u32) -> u32 {
    let span = f64::from(max.saturating_sub(min));
    min + (span * rng.next_unit()) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/generate/position.rs"]
mod tests;
