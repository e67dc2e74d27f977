use std::f64::consts::FRAC_PI_2;

use crate::generate::position::Position;

/// Tilt, in radians, that keeps a streak legible given its offset from the center.
///
/// `atan((top - 50) / (left - 50))`. On the vertical center line the slope is undefined; the
/// result is then `±π/2` following the sign of `top - 50`, or `0` at the exact center.
pub fn corrective_rotation(pos: Position) -> f64 {
    let dx = f64::from(pos.left) - 50.0;
    let dy = f64::from(pos.top) - 50.0;
    if dx == 0.0 {
        return if dy == 0.0 { 0.0 } else { FRAC_PI_2.copysign(dy) };
    }
    (dy / dx).atan()
}

#[cfg(test)]
#[path = "../../tests/unit/generate/rotation.rs"]
mod tests;
