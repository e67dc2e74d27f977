use std::time::Duration;

use crate::foundation::error::{WarpError, WarpResult};

/// Absolute 0-based frame index in capture timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> WarpResult<Self> {
        if den == 0 {
            return Err(WarpError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WarpError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timeline offset of `frame`, rounded to whole microseconds.
    ///
    /// Integer arithmetic keeps frame times stable across long captures.
    pub fn frame_time(self, frame: FrameIndex) -> Duration {
        let micros = u128::from(frame.0) * u128::from(self.den) * 1_000_000 / u128::from(self.num);
        Duration::from_micros(micros.min(u128::from(u64::MAX)) as u64)
    }

    /// Number of whole frames covering `secs`, rounded up.
    ///
    /// Products within a millionth of a frame of an integer count as that integer.
    pub fn frames_for_secs(self, secs: f64) -> u64 {
        let frames = secs * self.as_f64();
        ((frames * 1e6).round() / 1e6).ceil().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated, non-empty canvas.
    pub fn new(width: u32, height: u32) -> WarpResult<Self> {
        if width == 0 || height == 0 {
            return Err(WarpError::validation("Canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
