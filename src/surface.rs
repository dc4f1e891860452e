//! Seams to the browser: the point-cloud renderer and the page's DOM.
//!
//! The session talks to both only through these traits, which keeps the core
//! testable off the browser with recording fakes.

use glam::Mat4;

use crate::burst::{BurstFrame, BurstId};
use crate::choreography::Target;
use crate::controls::Theme;
use crate::field::ParticleField;
use crate::motion::Transform;

/// Draws the particle field as a point cloud.
pub trait PointRenderer {
    /// Match the drawing surface to a new window size, in CSS pixels.
    fn resize(&mut self, width: f64, height: f64);

    /// Draw every particle with the given camera and whole-field rotation.
    fn draw(&mut self, field: &ParticleField, view_projection: Mat4, model: Mat4);

    /// Free GPU resources. Nothing is drawn afterwards.
    fn release(&mut self);
}

/// Text slots in the stats panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stat {
    Fps,
    Elapsed,
    Particles,
}

/// Everything the session writes to the page besides the canvas.
pub trait UiSurface {
    fn set_stat(&mut self, stat: Stat, text: &str);

    fn apply_theme(&mut self, theme: Theme);

    fn set_paused(&mut self, paused: bool);

    fn apply_transform(&mut self, target: Target, transform: &Transform);

    fn spawn_burst(&mut self, id: BurstId, frame: &BurstFrame);

    fn place_burst(&mut self, id: BurstId, frame: &BurstFrame);

    fn remove_burst(&mut self, id: BurstId);

    /// Replace the particle canvas with a static background.
    fn show_fallback_background(&mut self);
}
