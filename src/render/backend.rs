use std::time::Duration;

use crate::foundation::core::Canvas;
use crate::foundation::error::{WarpError, WarpResult};
use crate::generate::duration::AnimationDuration;

/// Opaque handle to the root surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct RootHandle(pub u64);

/// Opaque handle to a streak's animation container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ContainerHandle(pub u64);

/// Opaque handle to the styled visual nested in a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct VisualHandle(pub u64);

/// Root surface as resolved by a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootSurface {
    /// Handle used for attach/detach.
    pub handle: RootHandle,
    /// Ambient perspective of the surface, if the renderer exposes one.
    pub perspective: Option<f64>,
}

/// Root surface captured once at initialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OuterContainer {
    root: RootHandle,
    // Reserved for perspective-aware geometry; nothing reads it yet.
    perspective: Option<f64>,
}

impl OuterContainer {
    /// Resolve `selector` through `renderer`; a missing root aborts startup.
    pub fn initialize(renderer: &mut dyn Renderer, selector: &str) -> WarpResult<Self> {
        let surface = renderer.resolve_root(selector).ok_or_else(|| {
            WarpError::precondition(format!("root surface '{selector}' could not be resolved"))
        })?;
        Ok(Self {
            root: surface.handle,
            perspective: surface.perspective,
        })
    }

    /// Root handle streak containers attach to.
    pub fn root(&self) -> RootHandle {
        self.root
    }

    /// Perspective captured at initialization.
    pub fn perspective(&self) -> Option<f64> {
        self.perspective
    }
}

/// The rendering surface consumed by streaks.
///
/// Implementations own every visual node. Errors are surfaced to the caller unchanged.
pub trait Renderer {
    /// Resolve the root surface named by `selector`.
    fn resolve_root(&mut self, selector: &str) -> Option<RootSurface>;

    /// Inform the renderer of the host clock before an event is dispatched.
    fn advance_clock(&mut self, _now: Duration) {}

    /// Allocate a wrapper bound to an animation duration, initially not playing.
    fn create_container(&mut self, duration: AnimationDuration) -> WarpResult<ContainerHandle>;

    /// Allocate a styled visual under `container`, placed at `left`/`top` percent and tilted by
    /// `rotation` radians.
    fn create_visual(
        &mut self,
        container: ContainerHandle,
        render_class: &str,
        left: u32,
        top: u32,
        rotation: f64,
    ) -> WarpResult<VisualHandle>;

    /// Insert `container` into the root.
    fn attach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()>;

    /// Start or pause the container's animation.
    fn set_playing(&mut self, container: ContainerHandle, playing: bool) -> WarpResult<()>;

    /// Remove `container` from the root. Detaching an already detached container is a no-op.
    fn detach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn resolve_root(&mut self, selector: &str) -> Option<RootSurface> {
        (**self).resolve_root(selector)
    }

    fn advance_clock(&mut self, now: Duration) {
        (**self).advance_clock(now)
    }

    fn create_container(&mut self, duration: AnimationDuration) -> WarpResult<ContainerHandle> {
        (**self).create_container(duration)
    }

    fn create_visual(
        &mut self,
        container: ContainerHandle,
        render_class: &str,
        left: u32,
        top: u32,
        rotation: f64,
    ) -> WarpResult<VisualHandle> {
        (**self).create_visual(container, render_class, left, top, rotation)
    }

    fn attach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()> {
        (**self).attach(root, container)
    }

    fn set_playing(&mut self, container: ContainerHandle, playing: bool) -> WarpResult<()> {
        (**self).set_playing(container, playing)
    }

    fn detach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()> {
        (**self).detach(root, container)
    }
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// A renderer that can snapshot its live content into a frame.
pub trait FrameSource {
    /// Output canvas.
    fn canvas(&self) -> Canvas;

    /// Rasterize the current state.
    fn rasterize(&self) -> WarpResult<FrameRGBA>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
