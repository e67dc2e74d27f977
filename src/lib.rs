//! Warpstreak procedurally generates short-lived "streak" elements that together read as an
//! accelerating warp-speed effect.
//!
//! The crate is organized leaf to root:
//!
//! - [`generate`] samples a streak's category, position, duration and corrective rotation
//! - [`streak`] owns one streak's `Created -> Rendered -> Removed` lifecycle
//! - [`schedule`] drives population density with a burst phase followed by a steady stream
//! - [`render`] defines the [`Renderer`] contract plus recording and CPU raster implementations
//! - [`session`] drives a scheduler in virtual time (frame capture) or wall-clock time
#![forbid(unsafe_code)]

mod foundation;

/// Frame sinks for captured output.
pub mod encode;
/// Streak attribute, position, rotation and duration generators.
pub mod generate;
/// Renderer contract and built-in renderers.
pub mod render;
/// Two-phase spawn scheduler.
pub mod schedule;
/// Virtual-time and realtime drivers.
pub mod session;
/// Streak entity and lifecycle.
pub mod streak;
/// Deterministic single-threaded timer queue.
pub mod timer;

pub use crate::foundation::config::{
    BurstPhase, DurationRange, ExclusionZone, ExclusionZones, SteadyPhase, WarpConfig,
};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex};
pub use crate::foundation::error::{WarpError, WarpResult};
pub use crate::foundation::random::{SeededSource, SequenceSource, UniformSource};

pub use crate::encode::sink::{FrameSink, InMemorySink, PngDirSink, SinkConfig};
pub use crate::generate::attributes::{
    AttributeTable, Category, CategoryBand, Family, StreakAttributes,
};
pub use crate::generate::duration::{AnimationDuration, sample_duration};
pub use crate::generate::position::{Position, sample_position};
pub use crate::generate::rotation::corrective_rotation;
pub use crate::generate::StreakBlueprint;
pub use crate::render::backend::{
    ContainerHandle, FrameRGBA, FrameSource, OuterContainer, Renderer, RootHandle, RootSurface,
    VisualHandle,
};
pub use crate::render::raster::{RasterRenderer, RasterSettings};
pub use crate::render::recording::{RecordingRenderer, RenderEvent};
pub use crate::schedule::{PhaseScheduler, SchedulerStats};
pub use crate::session::{capture_frames, run_realtime};
pub use crate::streak::{LifecycleState, Streak, StreakId};
pub use crate::timer::{TimerHandle, TimerQueue};
