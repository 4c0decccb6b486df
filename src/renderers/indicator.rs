use super::{finite, positive_finite, Frame, Renderer};
use crate::constants::*;
use crate::core::{Easing, Painter, ParamDefault, ParamSpec, ParameterStore};
use crate::error::{FxError, FxResult};
use glam::DVec2;
use smallvec::SmallVec;
use std::f64::consts::FRAC_PI_2;

pub const CELL_COUNT: &str = "cellCount";
pub const STEP_DURATION: &str = "stepDuration";
pub const WAVE_ENABLED: &str = "waveEnabled";
pub const RIPPLE_AMPLITUDE: &str = "waveAmplitude";
pub const WAVE_EASING: &str = "waveEasing";
pub const DOT_RADIUS: &str = "dotRadius";
pub const ACTIVE_COLOR: &str = "activeColor";
pub const INACTIVE_COLOR: &str = "inactiveColor";
pub const REPEAT: &str = "repeat";

pub static INDICATOR_SCHEMA: &[ParamSpec] = &[
    ParamSpec {
        name: CELL_COUNT,
        default: ParamDefault::Number(INDICATOR_CELL_COUNT),
    },
    ParamSpec {
        name: STEP_DURATION,
        default: ParamDefault::Number(INDICATOR_STEP_MS),
    },
    ParamSpec {
        name: WAVE_ENABLED,
        default: ParamDefault::Flag(false),
    },
    ParamSpec {
        name: RIPPLE_AMPLITUDE,
        default: ParamDefault::Number(INDICATOR_WAVE_AMPLITUDE),
    },
    ParamSpec {
        name: WAVE_EASING,
        default: ParamDefault::Text(INDICATOR_WAVE_EASING),
    },
    ParamSpec {
        name: DOT_RADIUS,
        default: ParamDefault::Number(INDICATOR_DOT_RADIUS),
    },
    ParamSpec {
        name: ACTIVE_COLOR,
        default: ParamDefault::Text(INDICATOR_ACTIVE_COLOR),
    },
    ParamSpec {
        name: INACTIVE_COLOR,
        default: ParamDefault::Text(INDICATOR_INACTIVE_COLOR),
    },
    ParamSpec {
        name: REPEAT,
        default: ParamDefault::Flag(INDICATOR_REPEAT),
    },
];

/// `clamp(floor(elapsed / step), 0, cells - 1)`.
#[inline]
pub fn active_index(elapsed_ms: f64, step_ms: f64, cells: usize) -> usize {
    if cells == 0 {
        return 0;
    }
    let raw = (elapsed_ms / step_ms).floor();
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    let last = (cells - 1) as f64;
    raw.min(last) as usize
}

/// Shorter of the clockwise and counter-clockwise distance around `cells`.
#[inline]
pub fn circular_distance(a: usize, b: usize, cells: usize) -> usize {
    if cells == 0 {
        return 0;
    }
    let d = a.abs_diff(b) % cells;
    d.min(cells - d)
}

/// Lift of a cell `distance` steps away from the active one. Largest on the
/// active cell and decaying along a quarter cosine towards the far side.
#[inline]
pub fn ripple_offset(distance: usize, cells: usize, amplitude: f64, envelope: f64) -> f64 {
    let half = (cells / 2) as f64;
    amplitude * (distance as f64 * FRAC_PI_2 / (half + 1.0)).cos() * envelope
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellState {
    pub active: bool,
    pub offset: f64,
}

/// Fixed-length stepped timeline of `step * cells`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    pub step_ms: f64,
    pub cells: usize,
    pub repeat: bool,
    pub wave: bool,
}

impl Timeline {
    pub fn from_params(params: &ParameterStore) -> Self {
        Self {
            step_ms: params.number(STEP_DURATION),
            cells: cell_count(params),
            repeat: params.flag(REPEAT),
            wave: params.flag(WAVE_ENABLED),
        }
    }

    pub fn total_ms(&self) -> f64 {
        self.step_ms * self.cells as f64
    }

    /// Position inside the current pass of the timeline.
    pub fn local_time(&self, elapsed_ms: f64) -> f64 {
        let total = self.total_ms();
        if self.repeat && total > 0.0 {
            elapsed_ms.rem_euclid(total)
        } else {
            elapsed_ms
        }
    }

    pub fn active_at(&self, elapsed_ms: f64) -> usize {
        active_index(self.local_time(elapsed_ms), self.step_ms, self.cells)
    }

    /// Fraction of the active step already elapsed, in [0, 1].
    pub fn step_progress(&self, elapsed_ms: f64) -> f64 {
        let local = self.local_time(elapsed_ms);
        let idx = active_index(local, self.step_ms, self.cells) as f64;
        ((local - idx * self.step_ms) / self.step_ms).clamp(0.0, 1.0)
    }
}

fn cell_count(params: &ParameterStore) -> usize {
    let n = params.number(CELL_COUNT);
    if n.is_finite() && n >= 1.0 {
        (n.floor() as usize).min(INDICATOR_MAX_CELLS)
    } else {
        0
    }
}

/// Row of dots where exactly one is active, stepping on wall-clock time.
#[derive(Default)]
pub struct SteppedIndicator {
    timeline: Option<Timeline>,
    cells: SmallVec<[CellState; 8]>,
}

impl SteppedIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn active(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.active)
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    fn timeline_for(&mut self, params: &ParameterStore) -> Timeline {
        match self.timeline {
            Some(t) => t,
            None => {
                self.rebuild(params);
                Timeline::from_params(params)
            }
        }
    }

    fn update_cells(&mut self, timeline: &Timeline, elapsed_ms: f64, params: &ParameterStore) {
        let n = timeline.cells;
        self.cells.resize(n, CellState::default());
        if n == 0 {
            return;
        }
        let active = timeline.active_at(elapsed_ms);
        let amplitude = params.number(RIPPLE_AMPLITUDE);
        let envelope = if timeline.wave {
            let easing = params.text(WAVE_EASING).parse().unwrap_or(Easing::Linear);
            easing.apply(1.0 - timeline.step_progress(elapsed_ms))
        } else {
            0.0
        };
        for (i, cell) in self.cells.iter_mut().enumerate() {
            cell.active = i == active;
            cell.offset = if timeline.wave {
                ripple_offset(circular_distance(i, active, n), n, amplitude, envelope)
            } else {
                0.0
            };
        }
    }

    fn paint<P: Painter>(&self, painter: &mut P, frame: &Frame<'_>, neutral: bool) {
        let n = self.cells.len();
        if n == 0 {
            return;
        }
        let p = frame.params;
        let spacing = frame.geometry.logical_width / n as f64;
        let cy = frame.geometry.center_y();
        let radius = p.number(DOT_RADIUS);
        for (i, cell) in self.cells.iter().enumerate() {
            let center = DVec2::new(spacing * (i as f64 + 0.5), cy - cell.offset);
            let color = if cell.active && !neutral {
                p.text(ACTIVE_COLOR)
            } else {
                p.text(INACTIVE_COLOR)
            };
            painter.fill_circle(center, radius, color);
        }
    }
}

impl Renderer for SteppedIndicator {
    fn name(&self) -> &'static str {
        "indicator"
    }

    fn schema(&self) -> &'static [ParamSpec] {
        INDICATOR_SCHEMA
    }

    fn validate(&self, params: &ParameterStore) -> FxResult<()> {
        positive_finite(params, STEP_DURATION)?;
        let n = params.number(CELL_COUNT);
        if !(n.is_finite() && n.fract() == 0.0 && n >= 1.0 && n as usize <= INDICATOR_MAX_CELLS) {
            return Err(FxError::InvalidConfiguration(format!(
                "`{}` must be a whole number between 1 and {}, got {}",
                CELL_COUNT, INDICATOR_MAX_CELLS, n
            )));
        }
        positive_finite(params, DOT_RADIUS)?;
        finite(params, RIPPLE_AMPLITUDE)?;
        params.text(WAVE_EASING).parse::<Easing>()?;
        Ok(())
    }

    fn step(&self, _params: &ParameterStore, dt_ms: f64) -> f64 {
        dt_ms
    }

    fn draw<P: Painter>(&mut self, painter: &mut P, frame: &Frame<'_>) {
        let timeline = self.timeline_for(frame.params);
        self.update_cells(&timeline, frame.phase, frame.params);
        self.paint(painter, frame, false);
    }

    fn draw_stopped<P: Painter>(&mut self, painter: &mut P, frame: &Frame<'_>) {
        self.reset();
        self.paint(painter, frame, true);
    }

    fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = CellState::default();
        }
    }

    // The timeline length is `step * cells`, so these rebuild it.
    fn restarts_on(&self, name: &str) -> bool {
        matches!(name, CELL_COUNT | STEP_DURATION | WAVE_ENABLED | REPEAT)
    }

    fn rebuild(&mut self, params: &ParameterStore) {
        let timeline = Timeline::from_params(params);
        log::debug!(
            "[indicator] timeline rebuilt: {} cells x {} ms",
            timeline.cells,
            timeline.step_ms
        );
        self.cells.clear();
        self.cells.resize(timeline.cells, CellState::default());
        self.timeline = Some(timeline);
    }

    fn is_finished(&self, phase: f64, _params: &ParameterStore) -> bool {
        match &self.timeline {
            Some(t) => !t.repeat && phase >= t.total_ms(),
            None => false,
        }
    }
}
