//! Pause, theme and burst buttons.

use glam::DVec2;
use rand::Rng;

use crate::burst::{BurstId, Bursts};
use crate::config::BurstConfig;

/// Background palettes the theme button switches between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Nebula,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Nebula => Theme::Dark,
            Theme::Dark => Theme::Nebula,
        }
    }

    /// CSS `background` for the page body.
    pub fn background(self) -> &'static str {
        match self {
            Theme::Nebula => "linear-gradient(135deg, #0f0c29, #302b63, #24243e)",
            Theme::Dark => "linear-gradient(135deg, #0a0a0a, #1a1a1a)",
        }
    }

    /// Label for the theme button, offering the other theme.
    pub fn button_html(self) -> &'static str {
        match self {
            Theme::Nebula => r#"<i class="fas fa-moon"></i> Dark Theme"#,
            Theme::Dark => r#"<i class="fas fa-sun"></i> Light Theme"#,
        }
    }
}

/// Background shown on the canvas when the particle renderer cannot start.
pub const FALLBACK_BACKGROUND: &str = "radial-gradient(circle, #0f0c29, #302b63)";

/// Label for the pause button.
pub fn pause_button_html(paused: bool) -> &'static str {
    if paused {
        r#"<i class="fas fa-pause"></i> Resume Animations"#
    } else {
        r#"<i class="fas fa-play"></i> Pause Animations"#
    }
}

/// State behind the interactive buttons.
#[derive(Clone, Debug)]
pub struct InteractionController {
    paused: bool,
    theme: Theme,
    bursts: Bursts,
}

impl InteractionController {
    pub fn new(burst: BurstConfig) -> Self {
        Self {
            paused: false,
            theme: Theme::default(),
            bursts: Bursts::new(burst),
        }
    }

    /// Returns whether animation is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        origin: DVec2,
        now: f64,
        rng: &mut R,
    ) -> Vec<BurstId> {
        self.bursts.spawn(origin, now, rng)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn bursts(&self) -> &Bursts {
        &self.bursts
    }

    pub fn bursts_mut(&mut self) -> &mut Bursts {
        &mut self.bursts
    }
}
