//! Tunable constants for the landing page.
//!
//! Every number the page animates with lives here so the browser runtime and
//! the host tests build sessions from the same values.

/// Per-frame displacement applied to every particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    /// Peak displacement per frame, in world units.
    pub amplitude: f64,
    /// How strongly the particle's own coordinate shifts the phase.
    pub frequency: f64,
}

impl Default for Drift {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: 0.01,
        }
    }
}

/// Perspective camera looking down -z at the particle field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the camera to the field's origin.
    pub distance: f32,
    /// Device pixel ratio is clamped to this before sizing the canvas.
    pub max_pixel_ratio: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 1.0,
            far: 1000.0,
            distance: 500.0,
            max_pixel_ratio: 2.0,
        }
    }
}

/// Rotation applied to the whole field every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinConfig {
    /// Ambient angular increment around x, radians per frame.
    pub ambient_x: f64,
    /// Ambient angular increment around y, radians per frame.
    pub ambient_y: f64,
    /// Pointer distance from the viewport centre is multiplied by this.
    pub cursor_scale: f64,
    /// Cursor offset is multiplied by this before joining the rotation.
    pub cursor_rotation: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            ambient_x: 0.001,
            ambient_y: 0.002,
            cursor_scale: 0.05,
            cursor_rotation: 0.0001,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsConfig {
    /// Period of the stats timer.
    pub interval_ms: i32,
    /// fps is only recomputed once this much wall time has passed.
    pub fps_window_ms: f64,
    /// Value shown before the first window closes.
    pub initial_fps: u32,
    pub displayed_baseline: f64,
    pub displayed_amplitude: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            fps_window_ms: 1000.0,
            initial_fps: 60,
            displayed_baseline: 1500.0,
            displayed_amplitude: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstConfig {
    /// Ephemeral particles spawned per click.
    pub count: usize,
    pub lifetime_secs: f64,
    /// Half-width of the square each particle flies into, in CSS pixels.
    pub spread: f64,
    /// Added to the displayed particle count per burst.
    pub count_bump: i64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 50,
            lifetime_secs: 1.5,
            spread: 200.0,
            count_bump: 50,
        }
    }
}

/// Everything a [`Session`](crate::session::Session) needs to start.
#[derive(Clone, Debug, PartialEq)]
pub struct LandingConfig {
    pub particle_count: usize,
    /// Side of the cube particles are scattered in.
    pub bounding_extent: f32,
    pub point_size: f32,
    pub point_opacity: f32,
    pub drift: Drift,
    pub camera: CameraConfig,
    pub spin: SpinConfig,
    pub stats: StatsConfig,
    pub burst: BurstConfig,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            particle_count: 1500,
            bounding_extent: 1000.0,
            point_size: 4.0,
            point_opacity: 0.8,
            drift: Drift::default(),
            camera: CameraConfig::default(),
            spin: SpinConfig::default(),
            stats: StatsConfig::default(),
            burst: BurstConfig::default(),
        }
    }
}

/// Port shown on the page and used by the server when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;
