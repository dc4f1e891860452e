//! Short-lived particles thrown out of the burst button.

use glam::DVec2;
use rand::Rng;

use crate::config::BurstConfig;
use crate::tween::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurstId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParticle {
    pub id: BurstId,
    pub origin: DVec2,
    /// Where the particle ends up, relative to `origin`.
    pub offset: DVec2,
    /// Timeline time of the spawn.
    pub born: f64,
}

/// Placement of one burst particle at one instant, in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstFrame {
    pub position: DVec2,
    /// Translation from the spawn point, for CSS transforms.
    pub translate: DVec2,
    pub opacity: f64,
    pub scale: f64,
}

impl BurstParticle {
    pub fn age(&self, now: f64) -> f64 {
        now - self.born
    }

    pub fn frame(&self, now: f64, lifetime: f64) -> BurstFrame {
        let progress = if lifetime > 0.0 {
            (self.age(now) / lifetime).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = Ease::Power2Out.apply(progress);
        let translate = self.offset * eased;
        BurstFrame {
            position: self.origin + translate,
            translate,
            opacity: 1.0 - eased,
            scale: 1.0 - eased,
        }
    }
}

/// The live set of burst particles.
#[derive(Clone, Debug)]
pub struct Bursts {
    config: BurstConfig,
    live: Vec<BurstParticle>,
    next_id: u64,
}

impl Bursts {
    pub fn new(config: BurstConfig) -> Self {
        Self {
            config,
            live: Vec::new(),
            next_id: 0,
        }
    }

    /// Throw `config.count` particles out of `origin`, each aimed at a random
    /// point in a square of half-width `config.spread`.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        origin: DVec2,
        now: f64,
        rng: &mut R,
    ) -> Vec<BurstId> {
        let spread = self.config.spread;
        let mut spawned = Vec::with_capacity(self.config.count);
        for _ in 0..self.config.count {
            let id = BurstId(self.next_id);
            self.next_id += 1;
            let offset = DVec2::new(
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
            );
            self.live.push(BurstParticle {
                id,
                origin,
                offset,
                born: now,
            });
            spawned.push(id);
        }
        spawned
    }

    /// Remove every particle whose lifetime has run out, returning their ids.
    pub fn expire(&mut self, now: f64) -> Vec<BurstId> {
        let lifetime = self.config.lifetime_secs;
        let mut expired = Vec::new();
        self.live.retain(|particle| {
            let alive = particle.age(now) < lifetime;
            if !alive {
                expired.push(particle.id);
            }
            alive
        });
        expired
    }

    pub fn frames(&self, now: f64) -> impl Iterator<Item = (BurstId, BurstFrame)> + '_ {
        let lifetime = self.config.lifetime_secs;
        self.live
            .iter()
            .map(move |particle| (particle.id, particle.frame(now, lifetime)))
    }

    /// Forget every particle, returning the ids that were still alive.
    pub fn clear(&mut self) -> Vec<BurstId> {
        self.live.drain(..).map(|particle| particle.id).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BurstParticle> {
        self.live.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_creates_configured_count_within_spread() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut bursts = Bursts::new(BurstConfig::default());
        let ids = bursts.spawn(DVec2::new(300.0, 200.0), 0.0, &mut rng);
        assert_eq!(ids.len(), 50);
        assert_eq!(bursts.len(), 50);
        assert!(bursts
            .iter()
            .all(|p| p.offset.x.abs() <= 200.0 && p.offset.y.abs() <= 200.0));
    }

    #[test]
    fn ids_are_unique_across_bursts() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut bursts = Bursts::new(BurstConfig::default());
        let mut ids = bursts.spawn(DVec2::ZERO, 0.0, &mut rng);
        ids.extend(bursts.spawn(DVec2::ZERO, 0.1, &mut rng));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn particles_fade_out_and_expire() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut bursts = Bursts::new(BurstConfig::default());
        bursts.spawn(DVec2::new(10.0, 10.0), 1.0, &mut rng);

        let (_, start) = bursts.frames(1.0).next().unwrap();
        assert_eq!(start.opacity, 1.0);
        assert_eq!(start.position, DVec2::new(10.0, 10.0));

        assert!(bursts.expire(2.4).is_empty());
        let (_, late) = bursts.frames(2.4).next().unwrap();
        assert!(late.opacity < 0.01 && late.scale < 0.01);

        assert_eq!(bursts.expire(2.5 + 1e-6).len(), 50);
        assert!(bursts.is_empty());
    }

    #[test]
    fn final_frame_lands_on_the_offset() {
        let particle = BurstParticle {
            id: BurstId(0),
            origin: DVec2::new(100.0, 100.0),
            offset: DVec2::new(-200.0, 150.0),
            born: 0.0,
        };
        let frame = particle.frame(1.5, 1.5);
        assert_eq!(frame.position, DVec2::new(-100.0, 250.0));
        assert_eq!(frame.opacity, 0.0);
    }
}
