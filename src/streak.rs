use std::time::Duration;

use crate::foundation::error::{WarpError, WarpResult};
use crate::generate::StreakBlueprint;
use crate::render::backend::{ContainerHandle, OuterContainer, Renderer, VisualHandle};
use crate::timer::{TimerHandle, TimerQueue};

/// Identifier assigned by the scheduler, unique per process.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StreakId(pub u64);

/// Linear lifecycle; `Removed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LifecycleState {
    /// Sampled, not yet handed to the renderer.
    Created,
    /// Materialized and playing.
    Rendered,
    /// Detached from the root.
    Removed,
}

/// One transient streak and the render handles it owns.
#[derive(Clone, Debug)]
pub struct Streak {
    id: StreakId,
    blueprint: StreakBlueprint,
    created_at: Duration,
    state: LifecycleState,
    container: Option<ContainerHandle>,
    visual: Option<VisualHandle>,
}

impl Streak {
    /// A streak in the `Created` state.
    pub fn new(id: StreakId, blueprint: StreakBlueprint, created_at: Duration) -> Self {
        Self {
            id,
            blueprint,
            created_at,
            state: LifecycleState::Created,
            container: None,
            visual: None,
        }
    }

    /// Create, render and arm the one-shot removal timer in one step.
    ///
    /// The timer fires `expire` at `now + duration`.
    pub fn spawn<T: Clone>(
        id: StreakId,
        blueprint: StreakBlueprint,
        now: Duration,
        renderer: &mut dyn Renderer,
        outer: &OuterContainer,
        timers: &mut TimerQueue<T>,
        expire: T,
    ) -> WarpResult<(Self, TimerHandle)> {
        let mut streak = Self::new(id, blueprint, now);
        streak.render(renderer, outer)?;
        let handle = timers.schedule_once(now, streak.blueprint.duration.as_duration(), expire);
        tracing::trace!(
            id = id.0,
            class = streak.blueprint.attributes.render_class,
            left = streak.blueprint.position.left,
            top = streak.blueprint.position.top,
            duration = streak.blueprint.duration.secs(),
            "streak spawned"
        );
        Ok((streak, handle))
    }

    /// Streak id.
    pub fn id(&self) -> StreakId {
        self.id
    }

    /// Sampled attributes and geometry.
    pub fn blueprint(&self) -> &StreakBlueprint {
        &self.blueprint
    }

    /// Host time of creation.
    pub fn created_at(&self) -> Duration {
        self.created_at
    }

    /// Host time the removal timer fires.
    pub fn removal_due(&self) -> Duration {
        self.created_at + self.blueprint.duration.as_duration()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Container handle, once rendered.
    pub fn container(&self) -> Option<ContainerHandle> {
        self.container
    }

    /// Visual handle, once rendered.
    pub fn visual(&self) -> Option<VisualHandle> {
        self.visual
    }

    /// `Created -> Rendered`: materialize the container and visual, attach, and start playing.
    pub fn render(
        &mut self,
        renderer: &mut dyn Renderer,
        outer: &OuterContainer,
    ) -> WarpResult<()> {
        if self.state != LifecycleState::Created {
            return Err(WarpError::validation(format!(
                "streak {} cannot render from state {:?}",
                self.id.0, self.state
            )));
        }

        let bp = &self.blueprint;
        let container = renderer.create_container(bp.duration)?;
        self.container = Some(container);
        let visual = renderer.create_visual(
            container,
            bp.attributes.render_class,
            bp.position.left,
            bp.position.top,
            bp.rotation,
        )?;
        self.visual = Some(visual);
        renderer.attach(outer.root(), container)?;
        renderer.set_playing(container, true)?;

        self.state = LifecycleState::Rendered;
        Ok(())
    }

    /// `Rendered -> Removed`. Returns `false` when the streak was already removed.
    pub fn remove(
        &mut self,
        renderer: &mut dyn Renderer,
        outer: &OuterContainer,
    ) -> WarpResult<bool> {
        match self.state {
            LifecycleState::Removed => return Ok(false),
            LifecycleState::Created => {
                return Err(WarpError::validation(format!(
                    "streak {} cannot be removed before it is rendered",
                    self.id.0
                )));
            }
            LifecycleState::Rendered => {
                if let Some(container) = self.container {
                    renderer.detach(outer.root(), container)?;
                }
            }
        }
        self.state = LifecycleState::Removed;
        tracing::trace!(id = self.id.0, "streak removed");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../tests/unit/streak.rs"]
mod tests;
