use std::collections::BTreeMap;
use std::time::Duration;

use crate::foundation::config::WarpConfig;
use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::random::UniformSource;
use crate::generate::StreakBlueprint;
use crate::generate::duration::AnimationDuration;
use crate::render::backend::{OuterContainer, Renderer};
use crate::streak::{Streak, StreakId};
use crate::timer::{TimerHandle, TimerQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Expire(StreakId),
    BeginSteady,
    SteadyTick,
}

/// Running totals for one scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    /// Streaks created.
    pub spawned: u64,
    /// Streaks removed.
    pub removed: u64,
    /// Burst waves emitted.
    pub burst_waves: u64,
    /// Steady-phase ticks handled.
    pub steady_ticks: u64,
    /// Highest simultaneous live count observed.
    pub peak_live: u64,
    /// Steady spawns dropped by the live cap.
    pub skipped: u64,
}

/// Drives population density: a burst of fixed-duration waves, then an indefinite steady stream.
///
/// All work happens on the caller's thread inside [`PhaseScheduler::start`] and
/// [`PhaseScheduler::advance_to`]; the clock only moves when the caller moves it.
///
/// With the default config the steady stream is unbounded: live count settles where spawn rate
/// times mean lifetime balances removals, and grows further if the host coalesces ticks.
/// `steady.max_live` caps it.
pub struct PhaseScheduler<R, U> {
    cfg: WarpConfig,
    renderer: R,
    rng: U,
    outer: OuterContainer,
    timers: TimerQueue<Task>,
    live: BTreeMap<StreakId, Streak>,
    next_id: u64,
    now: Duration,
    started: bool,
    steady: Option<TimerHandle>,
    capped: bool,
    stats: SchedulerStats,
}

impl<R: Renderer, U: UniformSource> PhaseScheduler<R, U> {
    /// Validate `cfg` and capture the root surface. Fails if the root cannot be resolved.
    pub fn new(cfg: WarpConfig, mut renderer: R, rng: U) -> WarpResult<Self> {
        cfg.validate()?;
        let outer = OuterContainer::initialize(&mut renderer, &cfg.root_selector)?;
        Ok(Self {
            cfg,
            renderer,
            rng,
            outer,
            timers: TimerQueue::new(),
            live: BTreeMap::new(),
            next_id: 0,
            now: Duration::ZERO,
            started: false,
            steady: None,
            capped: false,
            stats: SchedulerStats::default(),
        })
    }

    /// Emit the burst phase at the current time and arm the steady phase.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> WarpResult<()> {
        if self.started {
            return Err(WarpError::validation("scheduler already started"));
        }
        self.started = true;
        self.renderer.advance_clock(self.now);

        let waves = self.cfg.burst.wave_durations();
        tracing::info!(
            waves = waves.len(),
            batch = self.cfg.burst.batch,
            "starting burst phase"
        );
        for (wave, secs) in waves.into_iter().enumerate() {
            let duration = AnimationDuration::new(secs)?;
            self.spawn_batch(self.cfg.burst.batch, Some(duration))?;
            self.stats.burst_waves += 1;
            tracing::debug!(wave, duration = secs, live = self.live.len(), "burst wave");
        }

        let delay = self.cfg.steady.delay();
        self.steady = Some(self.timers.schedule_once(self.now, delay, Task::BeginSteady));
        Ok(())
    }

    /// Dispatch every timer due at or before `t`, in due order, then set the clock to `t`.
    pub fn advance_to(&mut self, t: Duration) -> WarpResult<usize> {
        if t < self.now {
            return Err(WarpError::validation(format!(
                "clock cannot move backwards ({:?} -> {:?})",
                self.now, t
            )));
        }

        let mut dispatched = 0usize;
        while let Some(fired) = self.timers.pop_due(t) {
            self.now = fired.due;
            self.renderer.advance_clock(fired.due);
            self.dispatch(fired.payload)?;
            dispatched += 1;
        }

        self.now = t;
        self.renderer.advance_clock(t);
        Ok(dispatched)
    }

    /// [`PhaseScheduler::advance_to`] relative to the current clock.
    pub fn advance_by(&mut self, dt: Duration) -> WarpResult<usize> {
        self.advance_to(self.now + dt)
    }

    /// Cancel the steady phase, whether it is still pending or already ticking.
    ///
    /// Live streaks keep their removal timers. Returns `false` if there was nothing to stop.
    pub fn stop_steady(&mut self) -> bool {
        let Some(handle) = self.steady.take() else {
            return false;
        };
        let cancelled = self.timers.cancel(handle);
        if cancelled {
            tracing::info!(now_ms = self.now.as_millis() as u64, "steady phase stopped");
        }
        cancelled
    }

    /// Create `count` streaks now, optionally forcing their duration.
    pub fn spawn_batch(
        &mut self,
        count: usize,
        duration: Option<AnimationDuration>,
    ) -> WarpResult<Vec<StreakId>> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let id = StreakId(self.next_id);
            self.next_id += 1;

            let blueprint = StreakBlueprint::generate(&self.cfg, &mut self.rng, duration);
            let (streak, _) = Streak::spawn(
                id,
                blueprint,
                self.now,
                &mut self.renderer,
                &self.outer,
                &mut self.timers,
                Task::Expire(id),
            )?;
            self.live.insert(id, streak);
            self.stats.spawned += 1;
            ids.push(id);
        }
        self.stats.peak_live = self.stats.peak_live.max(self.live.len() as u64);
        Ok(ids)
    }

    fn dispatch(&mut self, task: Task) -> WarpResult<()> {
        match task {
            Task::Expire(id) => self.expire(id),
            Task::BeginSteady => {
                let s = self.cfg.steady;
                let handle = self.timers.schedule_repeating(
                    self.now,
                    s.period(),
                    s.period(),
                    Task::SteadyTick,
                )?;
                self.steady = Some(handle);
                tracing::info!(
                    now_ms = self.now.as_millis() as u64,
                    period_ms = s.period_ms,
                    batch = s.batch,
                    "steady phase started"
                );
                Ok(())
            }
            Task::SteadyTick => self.steady_tick(),
        }
    }

    fn steady_tick(&mut self) -> WarpResult<()> {
        let s = self.cfg.steady;
        let count = match s.max_live {
            Some(cap) => s.batch.min(cap.saturating_sub(self.live.len())),
            None => s.batch,
        };
        let dropped = s.batch - count;
        self.stats.skipped += dropped as u64;
        // Warn on entering the capped regime only; ticks run every few milliseconds.
        if dropped > 0 && !self.capped {
            tracing::warn!(
                live = self.live.len(),
                dropped,
                "steady tick truncated by live cap"
            );
        }
        self.capped = dropped > 0;

        self.spawn_batch(count, None)?;
        self.stats.steady_ticks += 1;
        tracing::debug!(tick = self.stats.steady_ticks, live = self.live.len(), "steady tick");
        Ok(())
    }

    // Removal runs at most once per streak: the entry leaves `live` before detaching.
    fn expire(&mut self, id: StreakId) -> WarpResult<()> {
        let Some(mut streak) = self.live.remove(&id) else {
            return Ok(());
        };
        if streak.remove(&mut self.renderer, &self.outer)? {
            self.stats.removed += 1;
        }
        Ok(())
    }

    /// Current host time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Return `true` once [`PhaseScheduler::start`] has run.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Return `true` while the steady phase is pending or ticking.
    pub fn is_steady_active(&self) -> bool {
        self.steady.is_some_and(|h| self.timers.is_pending(h))
    }

    /// Earliest pending timer.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Number of live (rendered, not yet removed) streaks.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Live streaks in id order.
    pub fn live_streaks(&self) -> impl Iterator<Item = &Streak> {
        self.live.values()
    }

    /// Running totals.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Active configuration.
    pub fn config(&self) -> &WarpConfig {
        &self.cfg
    }

    /// Root captured at construction.
    pub fn outer(&self) -> &OuterContainer {
        &self.outer
    }

    /// Borrow the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutably borrow the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consume the scheduler and return its renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
#[path = "../tests/unit/schedule.rs"]
mod tests;
