use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use kurbo::{Line, Point, Vec2};

use crate::foundation::core::Canvas;
use crate::foundation::error::{WarpError, WarpResult};
use crate::generate::attributes::{Category, Family};
use crate::generate::duration::AnimationDuration;
use crate::render::backend::{
    ContainerHandle, FrameRGBA, FrameSource, Renderer, RootHandle, RootSurface, VisualHandle,
};

/// Settings for [`RasterRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RasterSettings {
    /// Output canvas.
    pub canvas: Canvas,
    /// Background color (straight RGBA8).
    pub clear_rgba: [u8; 4],
    /// Selector the root surface answers to.
    pub root_selector: String,
    /// Perspective reported with the root surface.
    pub perspective: Option<f64>,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 640,
                height: 360,
            },
            clear_rgba: [6, 8, 18, 255],
            root_selector: "#container".to_string(),
            perspective: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct RasterVisual {
    category: Category,
    left: u32,
    top: u32,
    rotation: f64,
}

#[derive(Clone, Copy, Debug)]
struct RasterContainer {
    duration_secs: f64,
    visual: Option<RasterVisual>,
    attached: bool,
    started_at: Option<Duration>,
}

/// CPU renderer that keeps attached streaks and rasterizes them on demand.
///
/// Each playing streak is drawn as an anti-aliased segment oriented by its corrective rotation.
/// It starts at its anchor position and accelerates away from the canvas center over its
/// duration, fading in and out.
#[derive(Debug)]
pub struct RasterRenderer {
    settings: RasterSettings,
    now: Duration,
    next_id: u64,
    containers: BTreeMap<ContainerHandle, RasterContainer>,
}

const ROOT: RootHandle = RootHandle(0);

impl RasterRenderer {
    /// Create a renderer; the canvas must be non-empty.
    pub fn new(settings: RasterSettings) -> WarpResult<Self> {
        Canvas::new(settings.canvas.width, settings.canvas.height)?;
        Ok(Self {
            settings,
            now: Duration::ZERO,
            next_id: 1,
            containers: BTreeMap::new(),
        })
    }

    /// Number of attached containers.
    pub fn attached_count(&self) -> usize {
        self.containers.values().filter(|c| c.attached).count()
    }

    fn container_mut(&mut self, container: ContainerHandle) -> WarpResult<&mut RasterContainer> {
        self.containers
            .get_mut(&container)
            .ok_or_else(|| WarpError::render(format!("unknown container {container:?}")))
    }

    fn progress(&self, c: &RasterContainer) -> Option<f64> {
        let started = c.started_at?;
        let elapsed = self.now.saturating_sub(started).as_secs_f64();
        Some((elapsed / c.duration_secs).clamp(0.0, 1.0))
    }
}

impl Renderer for RasterRenderer {
    fn resolve_root(&mut self, selector: &str) -> Option<RootSurface> {
        (selector == self.settings.root_selector).then_some(RootSurface {
            handle: ROOT,
            perspective: self.settings.perspective,
        })
    }

    fn advance_clock(&mut self, now: Duration) {
        self.now = now;
    }

    fn create_container(&mut self, duration: AnimationDuration) -> WarpResult<ContainerHandle> {
        let container = ContainerHandle(self.next_id);
        self.next_id += 1;
        self.containers.insert(
            container,
            RasterContainer {
                duration_secs: duration.secs(),
                visual: None,
                attached: false,
                started_at: None,
            },
        );
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
        let category = Category::from_render_class(render_class)
            .ok_or_else(|| WarpError::render(format!("unknown render class '{render_class}'")))?;
        let c = self.container_mut(container)?;
        c.visual = Some(RasterVisual {
            category,
            left,
            top,
            rotation,
        });
        Ok(VisualHandle(container.0))
    }

    fn attach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()> {
        if root != ROOT {
            return Err(WarpError::render(format!("unknown root {root:?}")));
        }
        self.container_mut(container)?.attached = true;
        Ok(())
    }

    fn set_playing(&mut self, container: ContainerHandle, playing: bool) -> WarpResult<()> {
        let now = self.now;
        let c = self.container_mut(container)?;
        c.started_at = if playing {
            Some(c.started_at.unwrap_or(now))
        } else {
            None
        };
        Ok(())
    }

    fn detach(&mut self, root: RootHandle, container: ContainerHandle) -> WarpResult<()> {
        if root != ROOT {
            return Err(WarpError::render(format!("unknown root {root:?}")));
        }
        if self.containers.remove(&container).is_none() && container.0 >= self.next_id {
            return Err(WarpError::render(format!("unknown container {container:?}")));
        }
        Ok(())
    }
}

impl FrameSource for RasterRenderer {
    fn canvas(&self) -> Canvas {
        self.settings.canvas
    }

    fn rasterize(&self) -> WarpResult<FrameRGBA> {
        let canvas = self.settings.canvas;
        let mut img =
            RgbaImage::from_pixel(canvas.width, canvas.height, Rgba(self.settings.clear_rgba));

        for (handle, c) in &self.containers {
            if !c.attached {
                continue;
            }
            let (Some(visual), Some(progress)) = (c.visual, self.progress(c)) else {
                continue;
            };
            let alpha = (PI * progress).sin().max(0.0);
            if alpha <= 0.0 {
                continue;
            }
            let line = streak_segment(canvas, &visual, progress);
            let width = match visual.category.family() {
                Family::Thin => 1.0,
                Family::Thick => 3.0,
            };
            stroke_segment(&mut img, line, width, alpha, |t| {
                streak_color(visual.category, handle.0, t)
            });
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: img.into_raw(),
            premultiplied: false,
        })
    }
}

fn streak_segment(canvas: Canvas, v: &RasterVisual, progress: f64) -> Line {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let center = Point::new(w * 0.5, h * 0.5);
    let anchor = Point::new(f64::from(v.left) / 100.0 * w, f64::from(v.top) / 100.0 * h);

    let axis = Vec2::from_angle(v.rotation);
    let outward = if axis.dot(anchor - center) < 0.0 {
        -axis
    } else {
        axis
    };

    let reach = 0.5 * w.hypot(h);
    let head = anchor + outward * (reach * progress * progress);
    let len = 4.0 + 0.15 * reach * progress;
    Line::new(head - outward * len, head)
}

fn stroke_segment(
    img: &mut RgbaImage,
    line: Line,
    width: f64,
    alpha: f64,
    color_at: impl Fn(f64) -> [u8; 3],
) {
    let r = width * 0.5;
    let pad = r + 1.0;
    let (w, h) = (img.width() as i64, img.height() as i64);
    let x0 = ((line.p0.x.min(line.p1.x) - pad).floor() as i64).max(0);
    let x1 = ((line.p0.x.max(line.p1.x) + pad).ceil() as i64).min(w - 1);
    let y0 = ((line.p0.y.min(line.p1.y) - pad).floor() as i64).max(0);
    let y1 = ((line.p0.y.max(line.p1.y) + pad).ceil() as i64).min(h - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let d = line.p1 - line.p0;
    let len_sq = d.hypot2();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let t = if len_sq > 0.0 {
                ((p - line.p0).dot(d) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist = (p - (line.p0 + d * t)).hypot();
            let coverage = (r + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            blend(img.get_pixel_mut(x as u32, y as u32), color_at(t), alpha * coverage);
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: [u8; 3], a: f64) {
    let a = a.clamp(0.0, 1.0);
    for (c, s) in dst.0.iter_mut().take(3).zip(src) {
        *c = (f64::from(*c) * (1.0 - a) + f64::from(s) * a).round() as u8;
    }
    let da = f64::from(dst.0[3]) / 255.0;
    dst.0[3] = ((a + da * (1.0 - a)) * 255.0).round() as u8;
}

const COLORFUL: [[u8; 3]; 5] = [
    [255, 120, 200],
    [255, 210, 90],
    [120, 255, 140],
    [110, 200, 255],
    [200, 140, 255],
];

// `t` runs from tail (0) to head (1).
fn streak_color(category: Category, id: u64, t: f64) -> [u8; 3] {
    match category {
        Category::ThinGreenBlue => lerp_rgb([40, 230, 160], [60, 120, 255], t),
        Category::ThinColorful => COLORFUL[(id % COLORFUL.len() as u64) as usize],
        Category::ThickRedBlueGreen => {
            if t < 0.5 {
                lerp_rgb([240, 70, 90], [70, 110, 255], t * 2.0)
            } else {
                lerp_rgb([70, 110, 255], [60, 230, 120], (t - 0.5) * 2.0)
            }
        }
    }
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| {
        (f64::from(a[i]) + (f64::from(b[i]) - f64::from(a[i])) * t).round() as u8
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
