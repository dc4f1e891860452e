//! The particle background: a fixed-size point cloud that drifts every frame.

use rand::Rng;

use crate::config::Drift;

/// Flat position and color buffers, three floats per particle.
///
/// Layout matches what a GPU vertex buffer expects, so the renderer can upload
/// the slices directly. Particles are identified by index and live for the
/// whole session.
#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<f32>,
    colors: Vec<f32>,
    drift: Drift,
}

impl ParticleField {
    /// Scatter `count` particles uniformly in a cube of side `extent` centred
    /// on the origin, with uniformly random colors.
    pub fn scatter<R: Rng + ?Sized>(count: usize, extent: f32, drift: Drift, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        for _ in 0..count * 3 {
            positions.push((rng.random::<f32>() - 0.5) * extent);
            colors.push(rng.random::<f32>());
        }
        Self {
            positions,
            colors,
            drift,
        }
    }

    /// Build a field from existing buffers.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in length or are not a multiple of three.
    pub fn from_buffers(positions: Vec<f32>, colors: Vec<f32>, drift: Drift) -> Self {
        assert_eq!(positions.len(), colors.len(), "buffer length mismatch");
        assert_eq!(positions.len() % 3, 0, "buffers must hold xyz triples");
        Self {
            positions,
            colors,
            drift,
        }
    }

    /// Advance every particle to time `t` (seconds since the frame clock's
    /// epoch). Only x and y move.
    pub fn update(&mut self, t: f64) {
        for p in self.positions.chunks_exact_mut(3) {
            let (x, y) = drift(t, f64::from(p[0]), f64::from(p[1]), &self.drift);
            p[0] = x as f32;
            p[1] = y as f32;
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let start = index.checked_mul(3)?;
        self.positions
            .get(start..start.checked_add(3)?)
            .map(|p| [p[0], p[1], p[2]])
    }
}

/// Displacement of a single particle at time `t`.
pub fn drift(t: f64, x: f64, y: f64, drift: &Drift) -> (f64, f64) {
    (
        x + (t + x * drift.frequency).sin() * drift.amplitude,
        y + (t + y * drift.frequency).cos() * drift.amplitude,
    )
}
