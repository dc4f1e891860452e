//! Camera/viewport adapter: window size and pointer position in, projection
//! and field rotation out.

use glam::{DVec2, EulerRot, Mat4, Vec3};

use crate::config::{CameraConfig, SpinConfig};

/// Window dimensions plus the pointer's scaled offset from the centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    half_width: f64,
    half_height: f64,
    cursor_offset: DVec2,
    cursor_scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, cursor_scale: f64) -> Self {
        Self {
            width,
            height,
            half_width: width / 2.0,
            half_height: height / 2.0,
            cursor_offset: DVec2::ZERO,
            cursor_scale,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.half_width = width / 2.0;
        self.half_height = height / 2.0;
    }

    /// Record a pointer position in client coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.cursor_offset = DVec2::new(
            (x - self.half_width) * self.cursor_scale,
            (y - self.half_height) * self.cursor_scale,
        );
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn half_extent(&self) -> DVec2 {
        DVec2::new(self.half_width, self.half_height)
    }

    pub fn cursor_offset(&self) -> DVec2 {
        self.cursor_offset
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Perspective projection times the camera's view transform.
    pub fn view_projection(&self, camera: &CameraConfig) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(
            camera.fov_y_degrees.to_radians(),
            self.aspect(),
            camera.near,
            camera.far,
        );
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -camera.distance));
        projection * view
    }
}

/// Accumulated rotation of the whole particle field.
///
/// Integrated every unpaused frame; never reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

impl Rotation {
    /// One frame's worth of ambient spin plus the pointer's pull.
    ///
    /// Vertical pointer offset turns the field around x, horizontal around y.
    pub fn advance(&mut self, cursor_offset: DVec2, spin: &SpinConfig) {
        self.x += spin.ambient_x + cursor_offset.y * spin.cursor_rotation;
        self.y += spin.ambient_y + cursor_offset.x * spin.cursor_rotation;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.x as f32, self.y as f32, 0.0)
    }
}
