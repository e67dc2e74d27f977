use std::time::{Duration, Instant};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::WarpResult;
use crate::foundation::random::UniformSource;
use crate::render::backend::{FrameSource, Renderer};
use crate::schedule::PhaseScheduler;

/// Capture `frames` frames at `fps` in virtual time, pushing each into `sink`.
///
/// Starts the scheduler if needed. Frame `i` shows the state at `start + i / fps`.
#[tracing::instrument(skip(scheduler, sink))]
pub fn capture_frames<R, U>(
    scheduler: &mut PhaseScheduler<R, U>,
    fps: Fps,
    frames: u64,
    sink: &mut dyn FrameSink,
) -> WarpResult<()>
where
    R: Renderer + FrameSource,
    U: UniformSource,
{
    if !scheduler.is_started() {
        scheduler.start()?;
    }

    let canvas = scheduler.renderer().canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;

    let base = scheduler.now();
    for i in 0..frames {
        let idx = FrameIndex(i);
        scheduler.advance_to(base + fps.frame_time(idx))?;
        let frame = scheduler.renderer().rasterize()?;
        sink.push_frame(idx, &frame)?;
    }

    sink.end()
}

/// Drive `scheduler` against the wall clock for `span`.
///
/// Sleeps until the next due timer. Nothing is coalesced: every timer that came due while the
/// thread slept is dispatched on wake, in due order, so a late thread catches up in one burst
/// and the run matches a virtual-time run over the same span.
pub fn run_realtime<R, U>(scheduler: &mut PhaseScheduler<R, U>, span: Duration) -> WarpResult<()>
where
    R: Renderer,
    U: UniformSource,
{
    if !scheduler.is_started() {
        scheduler.start()?;
    }

    let base = scheduler.now();
    let end = base + span;
    let wall = Instant::now();
    loop {
        let now = (base + wall.elapsed()).min(end);
        scheduler.advance_to(now)?;
        if now >= end {
            break;
        }
        let next = scheduler.next_due().unwrap_or(end).min(end);
        if next > now {
            std::thread::sleep(next - now);
        }
    }

    tracing::info!(
        live = scheduler.live_count(),
        spawned = scheduler.stats().spawned,
        removed = scheduler.stats().removed,
        "realtime run finished"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
