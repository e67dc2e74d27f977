pub mod attributes;
pub mod duration;
pub mod position;
pub mod rotation;

use crate::foundation::config::WarpConfig;
use crate::foundation::random::UniformSource;
use attributes::StreakAttributes;
use duration::{AnimationDuration, sample_duration};
use position::{Position, sample_position};
use rotation::corrective_rotation;

/// Everything sampled for one streak before it is rendered.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StreakBlueprint {
    /// Category and render class.
    pub attributes: StreakAttributes,
    /// Starting position.
    pub position: Position,
    /// Animation lifetime.
    pub duration: AnimationDuration,
    /// Corrective tilt, in radians.
    pub rotation: f64,
}

impl StreakBlueprint {
    /// Run the generators in order: attributes, position, duration, rotation.
    ///
    /// Random draws are consumed in that order, which fixed-sequence tests rely on.
    pub fn generate(
        cfg: &WarpConfig,
        rng: &mut dyn UniformSource,
        explicit_duration: Option<AnimationDuration>,
    ) -> Self {
        let attributes = cfg.categories.select(rng);
        let position = sample_position(attributes.category, &cfg.zones, rng);
        let duration = sample_duration(cfg.durations, explicit_duration, rng);
        let rotation = corrective_rotation(position);
        Self {
            attributes,
            position,
            duration,
            rotation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/blueprint.rs"]
mod tests;
