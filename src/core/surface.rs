use crate::constants::FALLBACK_PIXEL_RATIO;
use crate::error::{FxError, FxResult};
use crate::host::Host;
use glam::DVec2;

/// Content-box size of a container in logical (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBox {
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when there is nothing to draw into yet (also catches NaN).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Logical size plus device scale. Draw code works in logical units; the
/// backing buffer is `logical * scale`, rounded to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    pub logical_width: f64,
    pub logical_height: f64,
    pub scale: f64,
}

impl SurfaceGeometry {
    pub fn new(content: ContentBox, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            FALLBACK_PIXEL_RATIO
        };
        Self {
            logical_width: content.width.max(0.0),
            logical_height: content.height.max(0.0),
            scale,
        }
    }

    #[inline]
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            (self.logical_width * self.scale).round() as u32,
            (self.logical_height * self.scale).round() as u32,
        )
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.logical_height * 0.5
    }
}

/// Drawing target. Coordinates are logical; `begin_frame` installs the
/// device scale and clears the previous frame.
pub trait Painter {
    fn buffer_size(&self) -> (u32, u32);
    fn set_buffer_size(&mut self, width: u32, height: u32);
    fn begin_frame(&mut self, geometry: &SurfaceGeometry);
    fn stroke_polyline(&mut self, points: &[DVec2], width: f64, color: &str);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str);
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: &str);
    fn set_alpha(&mut self, alpha: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attach {
    Ready,
    /// Container exists but has no area yet; retry on a later frame or resize.
    Deferred,
}

/// Owns the drawing surface created under a container and keeps its backing
/// buffer in step with the container's content box.
pub struct SurfaceManager<S> {
    surface: Option<S>,
    geometry: Option<SurfaceGeometry>,
}

impl<S: Painter> Default for SurfaceManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Painter> SurfaceManager<S> {
    pub fn new() -> Self {
        Self {
            surface: None,
            geometry: None,
        }
    }

    pub fn attach<H: Host<Surface = S>>(&mut self, host: &mut H) -> FxResult<Attach> {
        if self.surface.is_some() {
            return Err(FxError::AlreadyInitialized(host.describe()));
        }
        let content = host
            .content_box()
            .ok_or_else(|| FxError::MissingElement(host.describe()))?;
        if host.surface_exists() {
            return Err(FxError::AlreadyInitialized(host.describe()));
        }
        if content.is_empty() {
            log::debug!("[surface] {} has no area yet, deferring", host.describe());
            return Ok(Attach::Deferred);
        }
        // Hosts remove any partially created surface before reporting failure.
        let surface = host.create_surface()?;
        self.surface = Some(surface);
        self.apply(content, host.device_pixel_ratio());
        Ok(Attach::Ready)
    }

    /// Re-read the container's current content box and device ratio.
    /// Returns the new geometry, or `None` if there is no surface or the
    /// container is gone.
    pub fn resize<H: Host<Surface = S>>(&mut self, host: &H) -> Option<SurfaceGeometry> {
        self.surface.as_ref()?;
        let Some(content) = host.content_box() else {
            log::warn!("[surface] {} vanished during resize", host.describe());
            return None;
        };
        Some(self.apply(content, host.device_pixel_ratio()))
    }

    fn apply(&mut self, content: ContentBox, ratio: f64) -> SurfaceGeometry {
        let geometry = SurfaceGeometry::new(content, ratio);
        let (w, h) = geometry.buffer_size();
        if let Some(surface) = self.surface.as_mut() {
            // Assigning the size clears the buffer, so only do it on change.
            if surface.buffer_size() != (w, h) {
                surface.set_buffer_size(w, h);
            }
        }
        self.geometry = Some(geometry);
        geometry
    }

    pub fn release<H: Host<Surface = S>>(&mut self, host: &mut H) {
        if let Some(surface) = self.surface.take() {
            host.release_surface(surface);
        }
        self.geometry = None;
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        self.geometry
    }

    pub fn painter(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn painter_mut(&mut self) -> Option<(&mut S, SurfaceGeometry)> {
        let geometry = self.geometry?;
        self.surface.as_mut().map(|s| (s, geometry))
    }
}
