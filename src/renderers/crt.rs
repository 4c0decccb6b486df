use super::{finite, positive_finite, Frame, Renderer};
use crate::constants::*;
use crate::core::{Painter, ParamDefault, ParamSpec, ParameterStore, SurfaceGeometry};
use crate::error::{FxError, FxResult};
use glam::DVec2;
use rand::prelude::*;

pub const REVEAL_DURATION: &str = "revealDuration";
pub const SCANLINE_SPACING: &str = "scanlineSpacing";
pub const NOISE_INTENSITY: &str = "noiseIntensity";
pub const GLOW_COLOR: &str = "glowColor";
pub const BACKGROUND_COLOR: &str = "backgroundColor";
pub const SEED: &str = "seed";

pub static CRT_SCHEMA: &[ParamSpec] = &[
    ParamSpec {
        name: REVEAL_DURATION,
        default: ParamDefault::Number(CRT_REVEAL_MS),
    },
    ParamSpec {
        name: SCANLINE_SPACING,
        default: ParamDefault::Number(CRT_SCANLINE_SPACING),
    },
    ParamSpec {
        name: NOISE_INTENSITY,
        default: ParamDefault::Number(CRT_NOISE_INTENSITY),
    },
    ParamSpec {
        name: GLOW_COLOR,
        default: ParamDefault::Text(CRT_GLOW_COLOR),
    },
    ParamSpec {
        name: BACKGROUND_COLOR,
        default: ParamDefault::Text(CRT_BACKGROUND_COLOR),
    },
    ParamSpec {
        name: SEED,
        default: ParamDefault::Number(CRT_SEED),
    },
];

#[inline]
pub fn reveal_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 || !elapsed_ms.is_finite() {
        return 0.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Vertical extent `(top, height)` of the revealed band. Before the band has
/// any height a thin beam is kept across the middle.
pub fn reveal_band(geometry: &SurfaceGeometry, progress: f64) -> (f64, f64) {
    let h = geometry.logical_height;
    let band = (h * progress).max(CRT_BEAM_HEIGHT.min(h));
    ((h - band) * 0.5, band)
}

/// Speck rectangles for one noise frame, all inside the revealed band.
pub fn noise_specks(
    geometry: &SurfaceGeometry,
    band: (f64, f64),
    intensity: f64,
    seed: u64,
    frame_index: u64,
) -> Vec<(DVec2, DVec2, f64)> {
    let count = (CRT_NOISE_SPECKS * intensity).round().max(0.0) as usize;
    let (top, height) = band;
    let w = geometry.logical_width;
    if count == 0 || w <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed ^ frame_index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    (0..count)
        .map(|_| {
            let size = DVec2::new(rng.gen_range(1.0..3.0), 1.0);
            let x = rng.gen_range(0.0..w).min((w - size.x).max(0.0));
            let y = top + rng.gen_range(0.0..height).min((height - size.y).max(0.0));
            let alpha = rng.gen_range(0.2..1.0) * intensity;
            (DVec2::new(x, y), size, alpha)
        })
        .collect()
}

/// Scanline-textured band opening from the center over `revealDuration`.
#[derive(Default)]
pub struct CrtReveal;

impl CrtReveal {
    pub fn new() -> Self {
        CrtReveal
    }

    fn paint_background<P: Painter>(painter: &mut P, frame: &Frame<'_>) {
        let g = &frame.geometry;
        painter.fill_rect(
            DVec2::ZERO,
            DVec2::new(g.logical_width, g.logical_height),
            frame.params.text(BACKGROUND_COLOR),
        );
    }
}

impl Renderer for CrtReveal {
    fn name(&self) -> &'static str {
        "crt"
    }

    fn schema(&self) -> &'static [ParamSpec] {
        CRT_SCHEMA
    }

    fn validate(&self, params: &ParameterStore) -> FxResult<()> {
        positive_finite(params, REVEAL_DURATION)?;
        if positive_finite(params, SCANLINE_SPACING)? < 1.0 {
            return Err(FxError::InvalidConfiguration(format!(
                "`{}` must be at least 1",
                SCANLINE_SPACING
            )));
        }
        let noise = finite(params, NOISE_INTENSITY)?;
        if !(0.0..=1.0).contains(&noise) {
            return Err(FxError::InvalidConfiguration(format!(
                "`{}` must be within [0, 1], got {}",
                NOISE_INTENSITY, noise
            )));
        }
        if finite(params, SEED)? < 0.0 {
            return Err(FxError::InvalidConfiguration(format!(
                "`{}` must not be negative",
                SEED
            )));
        }
        Ok(())
    }

    fn step(&self, _params: &ParameterStore, dt_ms: f64) -> f64 {
        dt_ms
    }

    fn draw<P: Painter>(&mut self, painter: &mut P, frame: &Frame<'_>) {
        let p = frame.params;
        let g = &frame.geometry;
        Self::paint_background(painter, frame);

        let progress = reveal_progress(frame.phase, p.number(REVEAL_DURATION));
        let (top, height) = reveal_band(g, progress);
        let glow = p.text(GLOW_COLOR);

        painter.set_alpha(CRT_GLOW_ALPHA);
        painter.fill_rect(DVec2::new(0.0, top), DVec2::new(g.logical_width, height), glow);

        painter.set_alpha(CRT_SCANLINE_ALPHA);
        let spacing = p.number(SCANLINE_SPACING);
        let mut y = top;
        while y < top + height {
            painter.fill_rect(DVec2::new(0.0, y), DVec2::new(g.logical_width, 1.0), glow);
            y += spacing;
        }

        let frame_index = (frame.phase / CRT_NOISE_FRAME_MS).floor().max(0.0) as u64;
        let seed = p.number(SEED) as u64;
        let specks = noise_specks(g, (top, height), p.number(NOISE_INTENSITY), seed, frame_index);
        for (origin, size, alpha) in specks {
            painter.set_alpha(alpha);
            painter.fill_rect(origin, size, glow);
        }
        painter.set_alpha(1.0);
    }

    fn draw_stopped<P: Painter>(&mut self, painter: &mut P, frame: &Frame<'_>) {
        Self::paint_background(painter, frame);
    }

    fn is_finished(&self, phase: f64, params: &ParameterStore) -> bool {
        phase >= params.number(REVEAL_DURATION)
    }
}
