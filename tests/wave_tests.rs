// Host-side tests for the standing-wave curve and its renderer.

mod common;

use canvas_motion::constants::SURFACE_EDGE_INSET;
use canvas_motion::core::{ContentBox, SurfaceGeometry};
use canvas_motion::renderers::wave::{self, standing_wave_path, standing_wave_y};
use canvas_motion::{Controller, ControllerState, WaveConfig};
use common::{painter, pump, RecordingHost};
use glam::DVec2;

const EPS: f64 = 1e-9;

fn mount(host: RecordingHost, config: WaveConfig) -> Controller<RecordingHost, wave::StandingWave> {
    let m = config.build().unwrap();
    Controller::attach(host, m.renderer, m.params, m.autoplay).unwrap()
}

#[test]
fn curve_is_centered_at_the_left_edge() {
    for phase in [0.0, 0.7, 3.0] {
        let y = standing_wave_y(0.0, 200.0, 50.0, 9.0, 3.0, phase);
        assert!((y - 50.0).abs() < EPS);
    }
}

#[test]
fn curve_peaks_at_quarter_period() {
    let width = 200.0;
    let freq = 3.0;
    let y = standing_wave_y(width / (4.0 * freq), width, 50.0, 9.0, freq, 0.0);
    assert!((y - 59.0).abs() < EPS);
}

#[test]
fn curve_stays_within_amplitude() {
    let amp = 12.5;
    for i in 0..400 {
        let x = i as f64 * 0.5;
        let phase = i as f64 * 0.37;
        let y = standing_wave_y(x, 200.0, 40.0, amp, 2.5, phase);
        assert!(y >= 40.0 - amp - EPS && y <= 40.0 + amp + EPS, "x={} y={}", x, y);
    }
}

#[test]
fn cos_phase_flattens_the_curve() {
    let y = standing_wave_y(37.0, 200.0, 50.0, 20.0, 2.0, std::f64::consts::FRAC_PI_2);
    assert!((y - 50.0).abs() < 1e-6);
}

#[test]
fn degenerate_width_returns_center() {
    assert_eq!(standing_wave_y(5.0, 0.0, 12.0, 9.0, 3.0, 0.0), 12.0);
}

#[test]
fn path_covers_every_column_and_ends_centered() {
    let g = SurfaceGeometry::new(ContentBox::new(120.5, 60.0), 2.0);
    let mut path = Vec::new();
    standing_wave_path(&mut path, &g, 10.0, 2.0, 0.0);

    assert_eq!(path.len(), 121 + 1);
    assert_eq!(path[0], DVec2::new(0.0, 30.0));
    assert_eq!(*path.last().unwrap(), DVec2::new(120.5 - SURFACE_EDGE_INSET, 30.0));
}

#[test]
fn path_stays_on_the_surface() {
    let g = SurfaceGeometry::new(ContentBox::new(200.0, 30.0), 2.0);
    let mut path = Vec::new();
    for phase in [0.0, 1.0, std::f64::consts::PI] {
        standing_wave_path(&mut path, &g, 20.0, 2.0, phase);
        for p in &path {
            assert!(p.x >= 0.0 && p.x < 200.0, "x={}", p.x);
            assert!(p.y >= 0.0 && p.y < 30.0, "y={}", p.y);
        }
    }
}

#[test]
fn tall_wave_on_a_short_container_is_flattened() {
    let mut c = mount(RecordingHost::new(200.0, 30.0, 1.0), WaveConfig::default());
    c.play().unwrap();
    for t in 0..40 {
        pump(&mut c, t as f64 * 16.0);
        let path = painter(&c).last_polyline().unwrap();
        let lowest = path.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let highest = path.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert!(lowest >= 0.0 && highest < 30.0, "y range [{}, {}]", lowest, highest);
    }
}

#[test]
fn path_is_independent_of_scale() {
    let mut low = Vec::new();
    let mut high = Vec::new();
    standing_wave_path(&mut low, &SurfaceGeometry::new(ContentBox::new(200.0, 100.0), 1.0), 9.0, 3.0, 0.4);
    standing_wave_path(&mut high, &SurfaceGeometry::new(ContentBox::new(200.0, 100.0), 3.0), 9.0, 3.0, 0.4);
    assert_eq!(low, high);
}

#[test]
fn end_to_end_wave_on_a_scaled_container() {
    let config = WaveConfig {
        wave_amplitude: 9.0,
        spatial_frequency: 3.0,
        ..WaveConfig::default()
    };
    let c = mount(RecordingHost::new(200.0, 100.0, 2.0), config);

    assert_eq!(c.state(), ControllerState::Paused);
    assert_eq!(painter(&c).buffer, (400, 200));

    let path = painter(&c).last_polyline().unwrap();
    assert!((path[0].y - 50.0).abs() < EPS);
    // Nearest column to the first peak at x = 200/12.
    let peak = path[17].y;
    assert!(peak > 58.9 && peak <= 59.0, "peak {}", peak);
    assert!(path.iter().all(|p| p.y >= 41.0 - EPS && p.y <= 59.0 + EPS));
}

#[test]
fn phase_advances_by_speed_per_frame() {
    let mut c = mount(RecordingHost::new(100.0, 40.0, 1.0), WaveConfig::default());
    c.play().unwrap();
    // Frame timing does not matter for the wave.
    pump(&mut c, 0.0);
    pump(&mut c, 500.0);
    pump(&mut c, 501.0);
    assert!((c.phase() - 0.15).abs() < EPS);
}

#[test]
fn builtin_mode_switches_all_three_values() {
    let mut c = mount(RecordingHost::new(100.0, 40.0, 1.0), WaveConfig::default());
    c.set_mode("active").unwrap();
    let p = c.params();
    assert_eq!(p.number(wave::WAVE_AMPLITUDE_PARAM), 24.0);
    assert_eq!(p.number(wave::SPATIAL_FREQUENCY), 3.0);
    assert_eq!(p.number(wave::ANIMATION_SPEED), 0.09);
    assert_eq!(p.active_mode(), Some("active"));
}

#[test]
fn thickness_and_color_reach_the_stroke() {
    let config = WaveConfig {
        line_thickness: 3.5,
        line_color: "rgb(10, 20, 30)".into(),
        ..WaveConfig::default()
    };
    let c = mount(RecordingHost::new(50.0, 20.0, 1.0), config);
    let stroke = painter(&c).last_frame().iter().find_map(|op| match op {
        common::Op::Polyline { width, color, .. } => Some((*width, color.clone())),
        _ => None,
    });
    assert_eq!(stroke, Some((3.5, "rgb(10, 20, 30)".to_string())));
}

#[test]
fn non_positive_thickness_stops_the_wave() {
    let mut c = mount(RecordingHost::new(50.0, 20.0, 1.0), WaveConfig::default());
    assert!(c.update_parameter(wave::LINE_THICKNESS, 0.0).is_err());
    assert_eq!(c.state(), ControllerState::Stopped);
}
