use super::{finite, positive_finite, Frame, Renderer};
use crate::constants::*;
use crate::core::{Painter, ParamDefault, ParamSpec, ParameterStore, SurfaceGeometry};
use crate::error::{FxError, FxResult};
use glam::DVec2;
use std::f64::consts::TAU;

pub const LINE_THICKNESS: &str = "lineThickness";
pub const LINE_COLOR: &str = "lineColor";
pub const WAVE_AMPLITUDE_PARAM: &str = "waveAmplitude";
pub const SPATIAL_FREQUENCY: &str = "spatialFrequency";
pub const ANIMATION_SPEED: &str = "animationSpeed";

pub static WAVE_SCHEMA: &[ParamSpec] = &[
    ParamSpec {
        name: LINE_THICKNESS,
        default: ParamDefault::Number(WAVE_LINE_THICKNESS),
    },
    ParamSpec {
        name: LINE_COLOR,
        default: ParamDefault::Text(WAVE_LINE_COLOR),
    },
    ParamSpec {
        name: WAVE_AMPLITUDE_PARAM,
        default: ParamDefault::Number(WAVE_AMPLITUDE),
    },
    ParamSpec {
        name: SPATIAL_FREQUENCY,
        default: ParamDefault::Number(WAVE_SPATIAL_FREQUENCY),
    },
    ParamSpec {
        name: ANIMATION_SPEED,
        default: ParamDefault::Number(WAVE_ANIMATION_SPEED),
    },
];

/// Vertical position of the standing wave at logical column `x`.
///
/// `y = center + amplitude * sin(x/width * frequency * 2π) * cos(phase)`
#[inline]
pub fn standing_wave_y(
    x: f64,
    width: f64,
    center_y: f64,
    amplitude: f64,
    frequency: f64,
    phase: f64,
) -> f64 {
    if width <= 0.0 {
        return center_y;
    }
    let spatial = ((x / width) * frequency * TAU).sin();
    let temporal = phase.cos();
    center_y + amplitude * spatial * temporal
}

/// Fill `out` with one sample per pixel column in `[0, width)` followed by
/// the vertical center at the right edge. Every point lies inside
/// `[0, W) x [0, H)`; samples past the top or bottom are flattened onto it.
pub fn standing_wave_path(
    out: &mut Vec<DVec2>,
    geometry: &SurfaceGeometry,
    amplitude: f64,
    frequency: f64,
    phase: f64,
) {
    out.clear();
    let width = geometry.logical_width;
    let center_y = geometry.center_y();
    if width <= 0.0 {
        return;
    }
    let max_x = (width - SURFACE_EDGE_INSET).max(0.0);
    let max_y = (geometry.logical_height - SURFACE_EDGE_INSET).max(0.0);
    let columns = width.ceil() as usize;
    out.reserve(columns + 1);
    for col in 0..columns {
        let x = (col as f64).min(max_x);
        let y = standing_wave_y(x, width, center_y, amplitude, frequency, phase);
        out.push(DVec2::new(x, y.clamp(0.0, max_y)));
    }
    out.push(DVec2::new(max_x, center_y.min(max_y)));
}

/// Single standing-wave line, phase advanced by `animationSpeed` per frame.
#[derive(Default)]
pub struct StandingWave {
    path: Vec<DVec2>,
}

impl StandingWave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples of the most recent draw.
    pub fn last_path(&self) -> &[DVec2] {
        &self.path
    }
}

impl Renderer for StandingWave {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn schema(&self) -> &'static [ParamSpec] {
        WAVE_SCHEMA
    }

    fn validate(&self, params: &ParameterStore) -> FxResult<()> {
        positive_finite(params, LINE_THICKNESS)?;
        finite(params, WAVE_AMPLITUDE_PARAM)?;
        finite(params, SPATIAL_FREQUENCY)?;
        finite(params, ANIMATION_SPEED)?;
        if params.text(LINE_COLOR).trim().is_empty() {
            return Err(FxError::InvalidConfiguration(format!(
                "`{}` must not be empty",
                LINE_COLOR
            )));
        }
        Ok(())
    }

    // Per frame, not per elapsed time.
    fn step(&self, params: &ParameterStore, _dt_ms: f64) -> f64 {
        params.number(ANIMATION_SPEED)
    }

    fn draw<P: Painter>(&mut self, painter: &mut P, frame: &Frame<'_>) {
        let p = frame.params;
        standing_wave_path(
            &mut self.path,
            &frame.geometry,
            p.number(WAVE_AMPLITUDE_PARAM),
            p.number(SPATIAL_FREQUENCY),
            frame.phase,
        );
        painter.stroke_polyline(&self.path, p.number(LINE_THICKNESS), p.text(LINE_COLOR));
    }

    fn reset(&mut self) {
        self.path.clear();
    }
}

/// Built-in presets, completed from the configured base values on registration.
pub fn builtin_modes() -> [(&'static str, [(&'static str, f64); 3]); 2] {
    let preset = |(amp, freq, speed): (f64, f64, f64)| {
        [
            (WAVE_AMPLITUDE_PARAM, amp),
            (SPATIAL_FREQUENCY, freq),
            (ANIMATION_SPEED, speed),
        ]
    };
    [
        ("idle", preset(WAVE_IDLE_PRESET)),
        ("active", preset(WAVE_ACTIVE_PRESET)),
    ]
}
