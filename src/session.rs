//! The landing page session: sole owner of all animation state.
//!
//! The browser runtime (or a test) drives a [`Session`] through three entry
//! points that mirror the page's timing sources: [`Session::frame`] once per
//! display refresh, [`Session::sample_stats`] on the stats timer, and
//! [`Session::dispatch`] for discrete UI events.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::choreography::{Control, Layout, Stage};
use crate::clock::FrameClock;
use crate::config::LandingConfig;
use crate::controls::InteractionController;
use crate::error::Result;
use crate::field::ParticleField;
use crate::stats::{StatsAggregator, StatsSnapshot};
use crate::surface::{PointRenderer, Stat, UiSurface};
use crate::tween::Timeline;
use crate::viewport::{Rotation, Viewport};

/// A discrete input from the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    /// Pointer position in client coordinates.
    PointerMoved { x: f64, y: f64 },
    Resized { width: f64, height: f64 },
    TogglePause,
    ToggleTheme,
    /// Burst out of a screen-space point.
    Burst { x: f64, y: f64 },
    CardHover { index: usize, entered: bool },
}

pub struct Session<R, U> {
    config: LandingConfig,
    clock: FrameClock,
    timeline: Timeline,
    field: ParticleField,
    viewport: Viewport,
    rotation: Rotation,
    stats: StatsAggregator,
    controls: InteractionController,
    stage: Stage,
    renderer: Option<R>,
    surface: U,
    rng: SmallRng,
}

impl<R: PointRenderer, U: UiSurface> Session<R, U> {
    /// Build the particle field and schedule the entrance animations.
    ///
    /// A renderer that failed to start is not fatal: the surface gets a
    /// static background and the rest of the page animates as usual.
    pub fn start(
        config: LandingConfig,
        renderer: Result<R>,
        mut surface: U,
        layout: Layout,
        (width, height): (f64, f64),
        now_ms: f64,
        seed: u64,
    ) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);

        let renderer = match renderer {
            Ok(mut renderer) => {
                renderer.resize(width, height);
                Some(renderer)
            }
            Err(error) => {
                log::warn!("{error}; using the static background");
                surface.show_fallback_background();
                None
            }
        };

        let field = ParticleField::scatter(
            config.particle_count,
            config.bounding_extent,
            config.drift,
            &mut rng,
        );
        log::info!("particle field ready with {} particles", field.len());

        let controls = InteractionController::new(config.burst);
        surface.apply_theme(controls.theme());
        surface.set_paused(controls.is_paused());

        let timeline = Timeline::new();
        let stage = Stage::choreograph(layout, timeline.time());

        Self {
            clock: FrameClock::new(now_ms),
            viewport: Viewport::new(width, height, config.spin.cursor_scale),
            stats: StatsAggregator::new(config.stats, now_ms),
            rotation: Rotation::default(),
            timeline,
            field,
            controls,
            stage,
            renderer,
            surface,
            rng,
            config,
        }
    }

    /// Advance and draw one frame.
    ///
    /// The field is fully updated before the renderer sees it. While paused
    /// nothing advances and the last state is redrawn.
    pub fn frame(&mut self, now_ms: f64) {
        let tick = self.clock.tick(now_ms);

        if !self.timeline.is_paused() {
            self.timeline.advance(tick.delta_secs);
            self.rotation
                .advance(self.viewport.cursor_offset(), &self.config.spin);
            self.field.update(tick.elapsed_secs);

            let time = self.timeline.time();
            for (target, transform) in self.stage.advance(time) {
                self.surface.apply_transform(target, &transform);
            }
            for id in self.controls.bursts_mut().expire(time) {
                self.surface.remove_burst(id);
            }
            for (id, frame) in self.controls.bursts().frames(time) {
                self.surface.place_burst(id, &frame);
            }
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(
                &self.field,
                self.viewport.view_projection(&self.config.camera),
                self.rotation.model_matrix(),
            );
        }
        self.stats.record_frame();
    }

    /// Refresh the stats panel.
    pub fn sample_stats(&mut self, now_ms: f64) -> StatsSnapshot {
        let snapshot = self.stats.sample(now_ms);
        self.surface.set_stat(Stat::Fps, &snapshot.fps.to_string());
        self.surface
            .set_stat(Stat::Elapsed, &snapshot.elapsed_seconds.to_string());
        self.surface
            .set_stat(Stat::Particles, &snapshot.particles_label());
        snapshot
    }

    pub fn dispatch(&mut self, event: UiEvent, now_ms: f64) {
        let time = self.timeline.time();
        match event {
            UiEvent::PointerMoved { x, y } => self.viewport.pointer_moved(x, y),
            UiEvent::Resized { width, height } => {
                self.viewport.resize(width, height);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(width, height);
                }
            }
            UiEvent::TogglePause => {
                let paused = self.controls.toggle_pause();
                if paused {
                    self.timeline.pause();
                } else {
                    self.timeline.play();
                }
                self.surface.set_paused(paused);
                self.stage.press_feedback(Control::Pause, time);
                log::debug!("animations {}", if paused { "paused" } else { "resumed" });
            }
            UiEvent::ToggleTheme => {
                let theme = self.controls.toggle_theme();
                self.surface.apply_theme(theme);
                self.stage.theme_shift(time);
                log::debug!("theme switched to {theme:?}");
            }
            UiEvent::Burst { x, y } => {
                let spawned = self.controls.burst(DVec2::new(x, y), time, &mut self.rng);
                if let Some(&first) = spawned.first() {
                    for (id, frame) in self.controls.bursts().frames(time) {
                        if id >= first {
                            self.surface.spawn_burst(id, &frame);
                        }
                    }
                }
                self.stage.shake(Control::Burst, time, &mut self.rng);
                self.stats.bump_displayed(self.config.burst.count_bump);
                self.sample_stats(now_ms);
                log::debug!("burst of {} at ({x:.0}, {y:.0})", spawned.len());
            }
            UiEvent::CardHover { index, entered } => {
                self.stage.card_hover(index, entered, time);
            }
        }
    }

    /// Release the renderer and clear any burst particles still on screen.
    pub fn teardown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.release();
        }
        for id in self.controls.bursts_mut().clear() {
            self.surface.remove_burst(id);
        }
        log::info!("session torn down");
    }

    pub fn is_rendering(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.controls.is_paused()
    }

    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn controls(&self) -> &InteractionController {
        &self.controls
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }
}
