#![cfg(target_arch = "wasm32")]

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use particle_landing::burst::{BurstFrame, BurstId};
use particle_landing::choreography::Layout;
use particle_landing::config::LandingConfig;
use particle_landing::controls::Theme;
use particle_landing::surface::{Stat, UiSurface};
use particle_landing::wasm::dom::DomSurface;
use particle_landing::wasm::render::WebGlPoints;
use particle_landing::wasm::{mount, teardown};
use particle_landing::LandingError;

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
    <canvas id="bgCanvas"></canvas>
    <header class="floating-header"><span id="portDisplay"></span></header>
    <section class="card"><div class="card-icon"></div><div class="cube"></div></section>
    <section class="card"><div class="card-icon"></div><div class="cube"></div></section>
    <button id="toggleAnim" class="btn"></button>
    <button id="changeTheme" class="btn"></button>
    <button id="explodeBtn" class="btn"></button>
    <span id="fps"></span><span id="time"></span><span id="particles"></span>
"#;

fn document_with(html: &str) -> web_sys::Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(html);
    document
}

#[wasm_bindgen_test]
fn locate_counts_the_page() {
    let document = document_with(PAGE);
    let surface = DomSurface::locate(&document).unwrap();
    assert_eq!(
        surface.layout(),
        Layout {
            header: true,
            cards: 2,
            buttons: 3,
            cubes: 2,
            pause_button: Some(0),
            theme_button: Some(1),
            burst_button: Some(2),
        }
    );
    assert!(surface.canvas().is_ok());
}

#[wasm_bindgen_test]
fn missing_control_is_reported() {
    let document = document_with(&PAGE.replace("explodeBtn", "somethingElse"));
    match DomSurface::locate(&document) {
        Err(LandingError::MissingElement(what)) => assert!(what.contains("explodeBtn")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("located a page without a burst button"),
    }
}

#[wasm_bindgen_test]
fn surface_writes_stats_and_controls() {
    let document = document_with(PAGE);
    let mut surface = DomSurface::locate(&document).unwrap();

    surface.set_stat(Stat::Fps, "42");
    surface.set_stat(Stat::Particles, "1,550");
    surface.show_port("8080");
    let text = |id: &str| document.get_element_by_id(id).unwrap().text_content().unwrap();
    assert_eq!(text("fps"), "42");
    assert_eq!(text("particles"), "1,550");
    assert_eq!(text("portDisplay"), "8080");

    surface.set_paused(true);
    let pause = document.get_element_by_id("toggleAnim").unwrap();
    assert!(pause.inner_html().contains("Resume"));

    surface.apply_theme(Theme::Dark);
    let theme = document.get_element_by_id("changeTheme").unwrap();
    assert!(theme.inner_html().contains("Light Theme"));
}

#[wasm_bindgen_test]
fn burst_particles_come_and_go() {
    let document = document_with(PAGE);
    let mut surface = DomSurface::locate(&document).unwrap();
    let frame = BurstFrame {
        position: DVec2::new(100.0, 100.0),
        translate: DVec2::ZERO,
        opacity: 1.0,
        scale: 1.0,
    };
    let count = || document.query_selector_all(".explosion-particle").unwrap().length();

    surface.spawn_burst(BurstId(1), &frame);
    surface.spawn_burst(BurstId(2), &frame);
    assert_eq!(count(), 2);

    surface.remove_burst(BurstId(1));
    assert_eq!(count(), 1);
    surface.remove_burst(BurstId(2));
    assert_eq!(count(), 0);
}

#[wasm_bindgen_test]
fn renderer_starts_or_reports_unavailable() {
    let document = document_with(PAGE);
    let surface = DomSurface::locate(&document).unwrap();
    match WebGlPoints::new(surface.canvas().unwrap(), &LandingConfig::default()) {
        Ok(_) | Err(LandingError::RendererUnavailable(_)) => {}
        Err(other) => panic!("unexpected renderer error: {other}"),
    }
}

#[wasm_bindgen_test]
fn teardown_unhooks_the_page() {
    let document = document_with(PAGE);
    mount().unwrap();

    let burst = document
        .get_element_by_id("explodeBtn")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    let count = || document.query_selector_all(".explosion-particle").unwrap().length();
    let particles = || {
        document
            .get_element_by_id("particles")
            .unwrap()
            .text_content()
            .unwrap_or_default()
    };

    burst.click();
    assert_eq!(count(), 50);

    teardown();
    assert_eq!(count(), 0);
    let shown = particles();

    burst.click();
    assert_eq!(count(), 0);
    assert_eq!(particles(), shown);
}
