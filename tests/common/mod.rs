// Recording stand-ins for the browser: a painter that logs draw calls and a
// host whose container size, frame queue and observer state tests can drive.

#![allow(dead_code)]

use canvas_motion::core::{ContentBox, Painter, SurfaceGeometry};
use canvas_motion::{Controller, FrameToken, FxError, FxResult, Host};
use canvas_motion::renderers::Renderer;
use glam::DVec2;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Begin { scale: f64 },
    Polyline { points: Vec<DVec2>, width: f64, color: String },
    Circle { center: DVec2, radius: f64, color: String },
    Rect { origin: DVec2, size: DVec2, color: String },
    Alpha(f64),
}

#[derive(Default)]
pub struct RecordingPainter {
    pub buffer: (u32, u32),
    pub resizes: usize,
    pub ops: Vec<Op>,
}

impl RecordingPainter {
    /// Ops grouped per `begin_frame`.
    pub fn frames(&self) -> Vec<&[Op]> {
        let starts: Vec<usize> = self
            .ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, Op::Begin { .. }))
            .map(|(i, _)| i)
            .collect();
        starts
            .iter()
            .enumerate()
            .map(|(n, &s)| {
                let end = starts.get(n + 1).copied().unwrap_or(self.ops.len());
                &self.ops[s..end]
            })
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }

    pub fn last_frame(&self) -> &[Op] {
        self.frames().last().copied().unwrap_or(&[])
    }

    pub fn last_polyline(&self) -> Option<&Vec<DVec2>> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Polyline { points, .. } => Some(points),
            _ => None,
        })
    }
}

impl Painter for RecordingPainter {
    fn buffer_size(&self) -> (u32, u32) {
        self.buffer
    }

    fn set_buffer_size(&mut self, width: u32, height: u32) {
        self.buffer = (width, height);
        self.resizes += 1;
    }

    fn begin_frame(&mut self, geometry: &SurfaceGeometry) {
        self.ops.push(Op::Begin {
            scale: geometry.scale,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], width: f64, color: &str) {
        self.ops.push(Op::Polyline {
            points: points.to_vec(),
            width,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str) {
        self.ops.push(Op::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: &str) {
        self.ops.push(Op::Rect {
            origin,
            size,
            color: color.to_string(),
        });
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::Alpha(alpha));
    }
}

pub struct RecordingHost {
    pub content: Option<ContentBox>,
    pub ratio: f64,
    pub foreign_surface: bool,
    pub context_available: bool,
    pub created: usize,
    pub released: usize,
    pub observing: bool,
    pub pending: Vec<FrameToken>,
    pub requested: usize,
    pub cancelled: usize,
    next_token: i32,
}

impl RecordingHost {
    pub fn new(width: f64, height: f64, ratio: f64) -> Self {
        Self {
            content: Some(ContentBox::new(width, height)),
            ratio,
            foreign_surface: false,
            context_available: true,
            created: 0,
            released: 0,
            observing: false,
            pending: Vec::new(),
            requested: 0,
            cancelled: 0,
            next_token: 1,
        }
    }

    pub fn missing() -> Self {
        let mut host = Self::new(0.0, 0.0, 1.0);
        host.content = None;
        host
    }

    /// Pop the outstanding frame, as the browser would before calling back.
    pub fn take_frame(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Host for RecordingHost {
    type Surface = RecordingPainter;

    fn describe(&self) -> String {
        "#test".to_string()
    }

    fn content_box(&self) -> Option<ContentBox> {
        self.content
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.ratio
    }

    fn surface_exists(&self) -> bool {
        self.foreign_surface
    }

    fn create_surface(&mut self) -> FxResult<RecordingPainter> {
        if !self.context_available {
            return Err(FxError::SurfaceAcquisitionFailure("no 2d context".into()));
        }
        self.created += 1;
        Ok(RecordingPainter::default())
    }

    fn release_surface(&mut self, _surface: RecordingPainter) {
        self.released += 1;
    }

    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.requested += 1;
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
        self.cancelled += 1;
    }

    fn observe_resize(&mut self) {
        self.observing = true;
    }

    fn unobserve_resize(&mut self) {
        self.observing = false;
    }
}

/// Deliver the pending frame (if any) at `now_ms`. Returns whether one ran.
pub fn pump<R: Renderer>(c: &mut Controller<RecordingHost, R>, now_ms: f64) -> bool {
    if c.host_mut().take_frame().is_some() {
        c.on_frame(now_ms);
        true
    } else {
        false
    }
}

/// Deliver frames every `step_ms` until `until_ms` (inclusive) or the loop stops.
pub fn run_until<R: Renderer>(c: &mut Controller<RecordingHost, R>, start_ms: f64, step_ms: f64, until_ms: f64) {
    let mut t = start_ms;
    while t <= until_ms && pump(c, t) {
        t += step_ms;
    }
}

pub fn painter<R: Renderer>(c: &Controller<RecordingHost, R>) -> &RecordingPainter {
    c.painter().expect("surface attached")
}
