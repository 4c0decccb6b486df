// Host-side tests for the CRT reveal intro.

mod common;

use canvas_motion::core::{ContentBox, SurfaceGeometry};
use canvas_motion::renderers::crt::{self, noise_specks, reveal_band, reveal_progress, CrtReveal};
use canvas_motion::{Controller, ControllerState, CrtConfig};
use common::{painter, pump, run_until, Op, RecordingHost};

fn mount(config: CrtConfig) -> Controller<RecordingHost, CrtReveal> {
    let m = config.build().unwrap();
    Controller::attach(RecordingHost::new(160.0, 90.0, 1.0), m.renderer, m.params, m.autoplay)
        .unwrap()
}

#[test]
fn progress_is_clamped() {
    assert_eq!(reveal_progress(0.0, 1200.0), 0.0);
    assert_eq!(reveal_progress(600.0, 1200.0), 0.5);
    assert_eq!(reveal_progress(5000.0, 1200.0), 1.0);
    assert_eq!(reveal_progress(-5.0, 1200.0), 0.0);
    assert_eq!(reveal_progress(100.0, 0.0), 0.0);
}

#[test]
fn band_opens_from_the_middle() {
    let g = SurfaceGeometry::new(ContentBox::new(160.0, 90.0), 2.0);

    let (top, height) = reveal_band(&g, 0.0);
    assert!(height > 0.0, "a thin beam is visible before the reveal");
    assert!((top + height * 0.5 - 45.0).abs() < 1e-9);

    assert_eq!(reveal_band(&g, 0.5), (22.5, 45.0));
    assert_eq!(reveal_band(&g, 1.0), (0.0, 90.0));
}

#[test]
fn noise_is_deterministic_and_inside_the_band() {
    let g = SurfaceGeometry::new(ContentBox::new(160.0, 90.0), 1.0);
    let band = (20.0, 50.0);
    let a = noise_specks(&g, band, 0.5, 7, 3);
    let b = noise_specks(&g, band, 0.5, 7, 3);
    assert_eq!(a, b);
    assert_eq!(a.len(), 80);
    assert_ne!(a, noise_specks(&g, band, 0.5, 7, 4));

    for (origin, size, alpha) in &a {
        assert!(origin.x >= 0.0 && origin.x + size.x <= 160.0);
        assert!(origin.y >= 20.0 && origin.y + size.y <= 70.0);
        assert!(*alpha > 0.0 && *alpha <= 0.5);
    }
    assert!(noise_specks(&g, band, 0.0, 7, 3).is_empty());
}

#[test]
fn autoplays_then_finishes_paused() {
    let mut c = mount(CrtConfig::default());
    assert_eq!(c.state(), ControllerState::Playing);

    run_until(&mut c, 0.0, 16.0, 5000.0);
    assert_eq!(c.state(), ControllerState::Paused);
    assert!(c.phase() >= 1200.0);
    assert!(c.host().pending.is_empty());

    // The last frame shows the fully open band.
    let glow = painter(&c).last_frame().iter().find_map(|op| match op {
        Op::Rect { origin, size, color } if color == "#9fffb0" => Some((origin.y, size.y)),
        _ => None,
    });
    assert_eq!(glow, Some((0.0, 90.0)));
}

#[test]
fn play_after_finish_replays_from_the_start() {
    let mut c = mount(CrtConfig {
        reveal_duration: 100.0,
        ..CrtConfig::default()
    });
    run_until(&mut c, 0.0, 20.0, 1000.0);
    assert_eq!(c.state(), ControllerState::Paused);

    c.play().unwrap();
    assert_eq!(c.state(), ControllerState::Playing);
    pump(&mut c, 2000.0);
    assert_eq!(c.phase(), 0.0);
}

#[test]
fn noise_out_of_range_stops() {
    let mut c = mount(CrtConfig {
        autoplay: false,
        ..CrtConfig::default()
    });
    assert!(c.update_parameter(crt::NOISE_INTENSITY, 1.5).is_err());
    assert_eq!(c.state(), ControllerState::Stopped);

    // Stopped shows only the background.
    let frame = painter(&c).last_frame();
    assert_eq!(frame.len(), 2);
    assert!(matches!(&frame[1], Op::Rect { color, .. } if color == "#050805"));
}
