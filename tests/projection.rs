#![cfg(not(target_arch = "wasm32"))]

use glam::{Mat4, Vec4};

use particle_landing::config::CameraConfig;
use particle_landing::viewport::{Rotation, Viewport};

fn to_ndc(m: Mat4, p: (f32, f32, f32)) -> (f32, f32) {
    let clip = m * Vec4::new(p.0, p.1, p.2, 1.0);
    (clip.x / clip.w, clip.y / clip.w)
}

fn approx_eq2(a: (f32, f32), b: (f32, f32), eps: f32) -> bool {
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

#[test]
fn field_centre_lands_on_screen_centre() {
    let camera = CameraConfig::default();
    for res in [(1920.0, 1080.0), (1080.0, 1920.0), (640.0, 640.0)] {
        let viewport = Viewport::new(res.0, res.1, 0.05);
        let p = to_ndc(viewport.view_projection(&camera), (0.0, 0.0, 0.0));
        assert!(approx_eq2(p, (0.0, 0.0), 1e-6), "res={res:?} p={p:?}");
    }
}

#[test]
fn vertical_extent_ignores_aspect() {
    let camera = CameraConfig::default();
    let wide = Viewport::new(1920.0, 1080.0, 0.05).view_projection(&camera);
    let tall = Viewport::new(1080.0, 1920.0, 0.05).view_projection(&camera);

    let samples = [(0.0, 100.0, 0.0), (0.0, -250.0, 100.0), (0.0, 40.0, -300.0)];
    for &p in &samples {
        let a = to_ndc(wide, p);
        let b = to_ndc(tall, p);
        assert!(approx_eq2(a, b, 1e-6), "a={a:?} b={b:?}");
    }

    // Horizontal extent shrinks with the aspect ratio.
    let a = to_ndc(wide, (100.0, 0.0, 0.0));
    let b = to_ndc(tall, (100.0, 0.0, 0.0));
    let ratio = (1920.0 / 1080.0) / (1080.0 / 1920.0);
    assert!((b.0 / a.0 - ratio).abs() < 1e-4, "a={a:?} b={b:?}");
}

#[test]
fn camera_sits_at_configured_distance() {
    let camera = CameraConfig::default();
    let viewport = Viewport::new(1000.0, 1000.0, 0.05);
    let m = viewport.view_projection(&camera);

    // Half the vertical field of view at the origin's depth.
    let half_height = camera.distance * (camera.fov_y_degrees.to_radians() / 2.0).tan();
    let top = to_ndc(m, (0.0, half_height, 0.0));
    assert!(approx_eq2(top, (0.0, 1.0), 1e-4), "top={top:?}");
}

#[test]
fn degenerate_viewport_keeps_a_finite_projection() {
    let camera = CameraConfig::default();
    let mut viewport = Viewport::new(800.0, 600.0, 0.05);
    viewport.resize(800.0, 0.0);
    assert_eq!(viewport.aspect(), 1.0);
    assert!(viewport.view_projection(&camera).is_finite());
}

#[test]
fn model_rotation_turns_the_field() {
    let quarter = std::f64::consts::FRAC_PI_2;
    let around_y = Rotation { x: 0.0, y: quarter }.model_matrix();
    let p = around_y * Vec4::new(1.0, 0.0, 0.0, 1.0);
    assert!((p.x).abs() < 1e-6 && (p.z + 1.0).abs() < 1e-6, "p={p:?}");

    let around_x = Rotation { x: quarter, y: 0.0 }.model_matrix();
    let p = around_x * Vec4::new(0.0, 1.0, 0.0, 1.0);
    assert!((p.y).abs() < 1e-6 && (p.z - 1.0).abs() < 1e-6, "p={p:?}");
}
