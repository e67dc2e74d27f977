use std::collections::BTreeMap;
use std::time::Duration;

use crate::foundation::error::{WarpError, WarpResult};
use crate::generate::duration::AnimationDuration;
use crate::render::backend::{
    ContainerHandle, Renderer, RootHandle, RootSurface, VisualHandle,
};

/// One renderer call, as observed by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderEvent {
    /// `create_container`.
    CreateContainer {
        /// New container.
        container: ContainerHandle,
        /// Bound animation duration, in milliseconds.
        duration_ms: u64,
    },
    /// `create_visual`.
    CreateVisual {
        /// Parent container.
        container: ContainerHandle,
        /// New visual.
        visual: VisualHandle,
        /// Render class.
        render_class: String,
        /// Left, in percent.
        left: u32,
        /// Top, in percent.
        top: u32,
        /// Tilt, in radians.
        rotation: f64,
    },
    /// `attach`.
    Attach {
        /// Attached container.
        container: ContainerHandle,
    },
    /// `set_playing`.
    SetPlaying {
        /// Target container.
        container: ContainerHandle,
        /// New play state.
        playing: bool,
    },
    /// `detach`.
    Detach {
        /// Target container.
        container: ContainerHandle,
        /// `false` when the call was a redundant no-op.
        was_attached: bool,
    },
}

#[derive(Clone, Copy, Debug, Default)]
struct ContainerRecord {
    attached: bool,
    playing: bool,
    visual: Option<VisualHandle>,
}

/// In-memory renderer that records every call with the host time it happened at.
///
/// Container bookkeeping is dropped on detach, so it tracks the live set rather than history.
#[derive(Debug)]
pub struct RecordingRenderer {
    root: Option<(String, RootSurface)>,
    now: Duration,
    next_id: u64,
    containers: BTreeMap<ContainerHandle, ContainerRecord>,
    events: Vec<(Duration, RenderEvent)>,
    redundant_detaches: u64,
    record_events: bool,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    /// Renderer exposing a `#container` root with no perspective.
    pub fn new() -> Self {
        Self::with_root("#container", None)
    }

    /// Renderer exposing a root under `selector`.
    pub fn with_root(selector: impl Into<String>, perspective: Option<f64>) -> Self {
        let surface = RootSurface {
            handle: RootHandle(0),
            perspective,
        };
        Self {
            root: Some((selector.into(), surface)),
            ..Self::without_root()
        }
    }

    /// Renderer with no resolvable root.
    pub fn without_root() -> Self {
        Self {
            root: None,
            now: Duration::ZERO,
            next_id: 1,
            containers: BTreeMap::new(),
            events: Vec::new(),
            redundant_detaches: 0,
            record_events: true,
        }
    }

    /// Keep bookkeeping but drop the event log (long simulations).
    pub fn without_event_log(mut self) -> Self {
        self.record_events = false;
        self
    }

    /// Recorded events in call order.
    pub fn events(&self) -> &[(Duration, RenderEvent)] {
        &self.events
    }

    /// Number of containers currently attached to the root.
    pub fn attached_count(&self) -> usize {
        self.containers.values().filter(|c| c.attached).count()
    }

    /// Return `true` when `container` is attached.
    pub fn is_attached(&self, container: ContainerHandle) -> bool {
        self.containers.get(&container).is_some_and(|c| c.attached)
    }

    /// Return `true` when `container` has been set playing.
    pub fn is_playing(&self, container: ContainerHandle) -> bool {
        self.containers.get(&container).is_some_and(|c| c.playing)
    }

    /// Containers still tracked: created and not yet detached.
    pub fn retained_containers(&self) -> usize {
        self.containers.len()
    }

    /// Detach calls that found the container already detached.
    pub fn redundant_detaches(&self) -> u64 {
        self.redundant_detaches
    }

    /// Host clock last reported through [`Renderer::advance_clock`].
    pub fn now(&self) -> Duration {
        self.now
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push(&mut self, ev: RenderEvent) {
        if self.record_events {
            self.events.push((self.now, ev));
        }
    }

    fn check_root(&self, root: RootHandle) -> WarpResult<()> {
        match &self.root {
            Some((_, surface)) if surface.handle == root => Ok(()),
            _ => Err(WarpError::render(format!("unknown root {root:?}"))),
        }
    }

    fn record_mut(&mut self, container: ContainerHandle) -> WarpResult<&mut ContainerRecord> {
        self.containers
            .get_mut(&container)
            .ok_or_else(|| WarpError::render(format!("unknown container {container:?}")))
    }
}

impl Renderer for RecordingRenderer {
    fn resolve_root(&mut self, selector: &str) -> Option<RootSurface> {
        match &self.root {
            Some((name, surface)) if name == selector => Some(*surface),
            _ => None,
        }
    }

    fn advance_clock(&mut self, now: Duration) {
        self.now = now;
    }

    fn create_container(&mut self, duration: AnimationDuration) -> WarpResult<ContainerHandle> {
        let container = ContainerHandle(self.next_id());
        self.containers.insert(container, ContainerRecord::default());
        self.push(RenderEvent::CreateContainer {
            container,
            duration_ms: duration.as_millis(),
        });
        Ok(container)
    }

    fn create_visual(
        &mut self,
        container: ContainerHandle,
        render_class: &str,
        left: u32,
        top: u32,
        rotation: f64,
    ) -> WarpResult<VisualHandle> {
        let visual = VisualHandle(self.next_id());
        self.record_mut(container)?.visual = Some(visual);
        self.push(RenderEvent::CreateVisual {
            container,
            visual,
            render_class: render_class.to_string(),
            left,
            top,
            rotation,
        });
        Ok(visual)
    }

    fn attach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()> {
        self.check_root(root)?;
        self.record_mut(container)?.attached = true;
        self.push(RenderEvent::Attach { container });
        Ok(())
    }

    fn set_playing(&mut self, container: ContainerHandle, playing: bool) -> WarpResult<()> {
        self.record_mut(container)?.playing = playing;
        self.push(RenderEvent::SetPlaying { container, playing });
        Ok(())
    }

    fn detach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()> {
        self.check_root(root)?;
        // Handles below `next_id` were issued here; a missing record means already detached.
        let was_attached = match self.containers.get(&container) {
            Some(rec) => rec.attached,
            None if container.0 < self.next_id => false,
            None => return Err(WarpError::render(format!("unknown container {container:?}"))),
        };
        if was_attached {
            self.containers.remove(&container);
        } else {
            self.redundant_detaches += 1;
        }
        self.push(RenderEvent::Detach {
            container,
            was_attached,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
