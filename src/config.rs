//! Typed construction-time configuration for each controller kind.
//!
//! Every field has a documented default, so an empty object (or no object at
//! all) mounts a working animation. Field names are camelCase to match the
//! plain JS objects they are decoded from.

use crate::constants::*;
use crate::core::{ParamValue, ParameterStore};
use crate::error::FxResult;
use crate::renderers::crt::{self, CrtReveal, CRT_SCHEMA};
use crate::renderers::indicator::{self, SteppedIndicator, INDICATOR_SCHEMA};
use crate::renderers::wave::{self, StandingWave, WAVE_SCHEMA};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A named preset. Parameters it leaves out take the configured base value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ModePreset {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, ParamValue>,
}

/// Renderer plus validated parameters, ready to hand to `Controller::attach`.
pub struct Mount<R> {
    pub renderer: R,
    pub params: ParameterStore,
    pub autoplay: bool,
}

fn register_modes(
    params: &mut ParameterStore,
    modes: &[ModePreset],
    initial_mode: Option<&str>,
) -> FxResult<()> {
    for mode in modes {
        params.register_mode(
            mode.name.clone(),
            mode.values.iter().map(|(k, v)| (k.as_str(), v.clone())),
        )?;
    }
    if let Some(name) = initial_mode {
        params.apply_mode(name)?;
    }
    Ok(())
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaveConfig {
    /// Stroke width in logical px. Default 2.
    pub line_thickness: f64,
    /// Any CSS color. Default white.
    pub line_color: String,
    /// Peak displacement from the center line in logical px. Default 20.
    pub wave_amplitude: f64,
    /// Full periods across the width. Default 2.
    pub spatial_frequency: f64,
    /// Phase advance per frame in radians. Default 0.05.
    pub animation_speed: f64,
    /// Start playing once attached. Default false.
    pub autoplay: bool,
    /// Extra presets on top of the built-in `idle` and `active`.
    pub modes: Vec<ModePreset>,
    pub initial_mode: Option<String>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            line_thickness: WAVE_LINE_THICKNESS,
            line_color: WAVE_LINE_COLOR.to_string(),
            wave_amplitude: WAVE_AMPLITUDE,
            spatial_frequency: WAVE_SPATIAL_FREQUENCY,
            animation_speed: WAVE_ANIMATION_SPEED,
            autoplay: false,
            modes: Vec::new(),
            initial_mode: None,
        }
    }
}

impl WaveConfig {
    pub fn build(self) -> FxResult<Mount<StandingWave>> {
        let mut params = ParameterStore::with_values(
            WAVE_SCHEMA,
            [
                (wave::LINE_THICKNESS, ParamValue::from(self.line_thickness)),
                (wave::LINE_COLOR, ParamValue::from(self.line_color)),
                (wave::WAVE_AMPLITUDE_PARAM, ParamValue::from(self.wave_amplitude)),
                (wave::SPATIAL_FREQUENCY, ParamValue::from(self.spatial_frequency)),
                (wave::ANIMATION_SPEED, ParamValue::from(self.animation_speed)),
            ],
        )?;
        for (name, values) in wave::builtin_modes() {
            params.register_mode(name, values.map(|(k, v)| (k, ParamValue::Number(v))))?;
        }
        register_modes(&mut params, &self.modes, self.initial_mode.as_deref())?;
        Ok(Mount {
            renderer: StandingWave::new(),
            params,
            autoplay: self.autoplay,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorConfig {
    /// Number of dots, 1 to 64. Default 5.
    pub cell_count: f64,
    /// Time each dot stays active, in ms. Must be positive. Default 500.
    pub step_duration: f64,
    /// Cosine ripple around the active dot. Default off.
    pub wave_enabled: bool,
    /// Ripple lift of the active dot in logical px. Default 6.
    pub wave_amplitude: f64,
    /// One of `linear`, `easeInQuad`, `easeOutQuad`, `easeInOutSine`,
    /// `easeOutCubic`. Default `easeOutQuad`.
    pub wave_easing: String,
    /// Dot radius in logical px. Default 4.
    pub dot_radius: f64,
    pub active_color: String,
    pub inactive_color: String,
    /// Loop back to the first dot after the last. Default false: the last
    /// dot stays active and the run finishes paused.
    pub repeat: bool,
    pub autoplay: bool,
    pub modes: Vec<ModePreset>,
    pub initial_mode: Option<String>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            cell_count: INDICATOR_CELL_COUNT,
            step_duration: INDICATOR_STEP_MS,
            wave_enabled: false,
            wave_amplitude: INDICATOR_WAVE_AMPLITUDE,
            wave_easing: INDICATOR_WAVE_EASING.to_string(),
            dot_radius: INDICATOR_DOT_RADIUS,
            active_color: INDICATOR_ACTIVE_COLOR.to_string(),
            inactive_color: INDICATOR_INACTIVE_COLOR.to_string(),
            repeat: INDICATOR_REPEAT,
            autoplay: false,
            modes: Vec::new(),
            initial_mode: None,
        }
    }
}

impl IndicatorConfig {
    pub fn build(self) -> FxResult<Mount<SteppedIndicator>> {
        let mut params = ParameterStore::with_values(
            INDICATOR_SCHEMA,
            [
                (indicator::CELL_COUNT, ParamValue::from(self.cell_count)),
                (indicator::STEP_DURATION, ParamValue::from(self.step_duration)),
                (indicator::WAVE_ENABLED, ParamValue::from(self.wave_enabled)),
                (indicator::RIPPLE_AMPLITUDE, ParamValue::from(self.wave_amplitude)),
                (indicator::WAVE_EASING, ParamValue::from(self.wave_easing)),
                (indicator::DOT_RADIUS, ParamValue::from(self.dot_radius)),
                (indicator::ACTIVE_COLOR, ParamValue::from(self.active_color)),
                (indicator::INACTIVE_COLOR, ParamValue::from(self.inactive_color)),
                (indicator::REPEAT, ParamValue::from(self.repeat)),
            ],
        )?;
        register_modes(&mut params, &self.modes, self.initial_mode.as_deref())?;
        Ok(Mount {
            renderer: SteppedIndicator::new(),
            params,
            autoplay: self.autoplay,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrtConfig {
    /// Time for the band to open fully, in ms. Default 1200.
    pub reveal_duration: f64,
    /// Distance between scanlines in logical px, at least 1. Default 3.
    pub scanline_spacing: f64,
    /// Flicker noise in [0, 1]. Default 0.35.
    pub noise_intensity: f64,
    pub glow_color: String,
    pub background_color: String,
    /// Seed for the flicker pattern. Default 7.
    pub seed: f64,
    /// Default true: the reveal is an intro and runs as soon as it can.
    pub autoplay: bool,
    pub modes: Vec<ModePreset>,
    pub initial_mode: Option<String>,
}

impl Default for CrtConfig {
    fn default() -> Self {
        Self {
            reveal_duration: CRT_REVEAL_MS,
            scanline_spacing: CRT_SCANLINE_SPACING,
            noise_intensity: CRT_NOISE_INTENSITY,
            glow_color: CRT_GLOW_COLOR.to_string(),
            background_color: CRT_BACKGROUND_COLOR.to_string(),
            seed: CRT_SEED,
            autoplay: true,
            modes: Vec::new(),
            initial_mode: None,
        }
    }
}

impl CrtConfig {
    pub fn build(self) -> FxResult<Mount<CrtReveal>> {
        let mut params = ParameterStore::with_values(
            CRT_SCHEMA,
            [
                (crt::REVEAL_DURATION, ParamValue::from(self.reveal_duration)),
                (crt::SCANLINE_SPACING, ParamValue::from(self.scanline_spacing)),
                (crt::NOISE_INTENSITY, ParamValue::from(self.noise_intensity)),
                (crt::GLOW_COLOR, ParamValue::from(self.glow_color)),
                (crt::BACKGROUND_COLOR, ParamValue::from(self.background_color)),
                (crt::SEED, ParamValue::from(self.seed)),
            ],
        )?;
        register_modes(&mut params, &self.modes, self.initial_mode.as_deref())?;
        Ok(Mount {
            renderer: CrtReveal::new(),
            params,
            autoplay: self.autoplay,
        })
    }
}
