/// Default parameter values and tuning constants for the renderers.
///
/// Kept free of crate imports so host-side tests can `include!` this file.
// Standing wave defaults
pub const WAVE_LINE_THICKNESS: f64 = 2.0;
pub const WAVE_LINE_COLOR: &str = "#ffffff";
pub const WAVE_AMPLITUDE: f64 = 20.0;
pub const WAVE_SPATIAL_FREQUENCY: f64 = 2.0;
pub const WAVE_ANIMATION_SPEED: f64 = 0.05; // radians of phase per frame

// Built-in wave presets (amplitude, frequency, speed)
pub const WAVE_IDLE_PRESET: (f64, f64, f64) = (6.0, 1.5, 0.02);
pub const WAVE_ACTIVE_PRESET: (f64, f64, f64) = (24.0, 3.0, 0.09);

// Stepped indicator defaults
pub const INDICATOR_CELL_COUNT: f64 = 5.0;
pub const INDICATOR_STEP_MS: f64 = 500.0;
pub const INDICATOR_DOT_RADIUS: f64 = 4.0;
pub const INDICATOR_WAVE_AMPLITUDE: f64 = 6.0; // logical px lift of the active cell
pub const INDICATOR_WAVE_EASING: &str = "easeOutQuad";
pub const INDICATOR_ACTIVE_COLOR: &str = "#ffffff";
pub const INDICATOR_INACTIVE_COLOR: &str = "rgba(255,255,255,0.3)";
pub const INDICATOR_MAX_CELLS: usize = 64;
pub const INDICATOR_REPEAT: bool = false; // hold the last cell once the row is done

// CRT reveal defaults
pub const CRT_REVEAL_MS: f64 = 1200.0;
pub const CRT_SCANLINE_SPACING: f64 = 3.0;
pub const CRT_NOISE_INTENSITY: f64 = 0.35;
pub const CRT_GLOW_COLOR: &str = "#9fffb0";
pub const CRT_BACKGROUND_COLOR: &str = "#050805";
pub const CRT_SEED: f64 = 7.0;

// CRT texture tuning
pub const CRT_NOISE_FRAME_MS: f64 = 16.0; // noise pattern changes once per nominal frame
pub const CRT_NOISE_SPECKS: f64 = 160.0; // specks at full intensity
pub const CRT_SCANLINE_ALPHA: f64 = 0.45;
pub const CRT_GLOW_ALPHA: f64 = 0.12;
pub const CRT_BEAM_HEIGHT: f64 = 2.0; // collapsed beam thickness before the band opens

// Surface
pub const SURFACE_MARKER_ATTR: &str = "data-canvas-motion";
pub const SURFACE_EDGE_INSET: f64 = 1e-6; // keeps coordinates strictly below W and H
pub const FALLBACK_PIXEL_RATIO: f64 = 1.0;
