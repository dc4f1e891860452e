//! Animated transforms for page elements.
//!
//! A [`Motion`] is a stack of tweens, each driving one [`Property`] of an
//! element. Later tracks win over earlier ones for the same property, and a
//! finished track is folded into the resting transform so long sessions do
//! not accumulate dead tracks.

use crate::tween::{Ease, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Horizontal translation in CSS pixels.
    X,
    /// Vertical translation in CSS pixels.
    Y,
    Scale,
    /// In-plane rotation in degrees.
    Rotation,
    RotationX,
    RotationY,
    Opacity,
    /// 0 for a resting card shadow, 1 for the raised hover shadow.
    Lift,
    /// Horizontal `background-position` in CSS pixels.
    BackgroundX,
}

/// Visual state of one element at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub opacity: f64,
    pub lift: f64,
    pub background_x: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            opacity: 1.0,
            lift: 0.0,
            background_x: 0.0,
        }
    }
}

impl Transform {
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::RotationX => self.rotation_x,
            Property::RotationY => self.rotation_y,
            Property::Opacity => self.opacity,
            Property::Lift => self.lift,
            Property::BackgroundX => self.background_x,
        }
    }

    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation = value,
            Property::RotationX => self.rotation_x = value,
            Property::RotationY => self.rotation_y = value,
            Property::Opacity => self.opacity = value,
            Property::Lift => self.lift = value,
            Property::BackgroundX => self.background_x = value,
        }
    }

    /// CSS `transform` value.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4}) rotate({:.2}deg) rotateX({:.2}deg) rotateY({:.2}deg)",
            self.x, self.y, self.scale, self.rotation, self.rotation_x, self.rotation_y
        )
    }

    /// CSS `background-position` value.
    pub fn css_background_position(&self) -> String {
        format!("{:.2}px 0px", self.background_x)
    }

    /// CSS `box-shadow` blended between the resting and raised card shadows.
    pub fn css_box_shadow(&self) -> String {
        let t = self.lift.clamp(0.0, 1.0);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        format!(
            "0 {:.1}px {:.1}px rgba(0,0,0,{:.3})",
            lerp(10.0, 25.0),
            lerp(30.0, 50.0),
            lerp(0.3, 0.5)
        )
    }
}

#[derive(Clone, Debug)]
struct Track {
    property: Property,
    tween: Tween,
    /// Timeline time the tween was scheduled at.
    start: f64,
    /// Show the start value before the delay elapses.
    immediate: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Motion {
    base: Transform,
    tracks: Vec<Track>,
}

impl Motion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tween `property` using the tween's own `from`, taking effect once its
    /// delay has passed.
    pub fn add(&mut self, property: Property, tween: Tween, start: f64) {
        self.tracks.push(Track {
            property,
            tween,
            start,
            immediate: false,
        });
    }

    /// Like [`add`](Self::add), but the start value shows right away, so an
    /// element can wait hidden through its delay.
    pub fn add_from(&mut self, property: Property, tween: Tween, start: f64) {
        self.tracks.push(Track {
            property,
            tween,
            start,
            immediate: true,
        });
    }

    /// Tween `property` from wherever it is at `now` to `to`, replacing any
    /// tween already driving it.
    pub fn tween_to(&mut self, property: Property, to: f64, duration: f64, ease: Ease, now: f64) {
        let current = self.value(property, now);
        self.base.set(property, current);
        self.tracks.retain(|track| track.property != property);
        self.add(property, Tween::new(current, to, duration).ease(ease), now);
    }

    pub fn value(&self, property: Property, now: f64) -> f64 {
        self.sample(now).get(property)
    }

    pub fn sample(&self, now: f64) -> Transform {
        let mut transform = self.base;
        for track in &self.tracks {
            let elapsed = now - track.start;
            if track.immediate || track.tween.has_started(elapsed) {
                transform.set(track.property, track.tween.value_at(elapsed));
            }
        }
        transform
    }

    /// Fold completed tracks into the resting transform.
    pub fn settle(&mut self, now: f64) {
        let mut i = 0;
        while i < self.tracks.len() {
            let track = &self.tracks[i];
            if track.tween.is_complete(now - track.start) {
                let property = track.property;
                let end = track.tween.end_value();
                self.tracks.remove(i);
                // A later track on the same property still overrides this.
                self.base.set(property, end);
            } else {
                i += 1;
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::Repeat;

    #[test]
    fn later_track_overrides_earlier() {
        let mut motion = Motion::new();
        motion.add(Property::X, Tween::new(0.0, 10.0, 1.0), 0.0);
        motion.add(Property::X, Tween::new(50.0, 60.0, 1.0), 0.0);
        assert_eq!(motion.value(Property::X, 0.5), 55.0);
    }

    #[test]
    fn delayed_track_waits_unless_immediate() {
        let mut motion = Motion::new();
        motion.add(Property::Y, Tween::new(100.0, 0.0, 1.0).delay(1.0), 0.0);
        assert_eq!(motion.value(Property::Y, 0.5), 0.0);

        let mut motion = Motion::new();
        motion.add_from(Property::Y, Tween::new(100.0, 0.0, 1.0).delay(1.0), 0.0);
        assert_eq!(motion.value(Property::Y, 0.5), 100.0);
    }

    #[test]
    fn tween_to_starts_from_current_value() {
        let mut motion = Motion::new();
        motion.tween_to(Property::Scale, 2.0, 1.0, Ease::None, 0.0);
        assert_eq!(motion.value(Property::Scale, 0.5), 1.5);

        motion.tween_to(Property::Scale, 1.0, 1.0, Ease::None, 0.5);
        assert_eq!(motion.track_count(), 1);
        assert_eq!(motion.value(Property::Scale, 0.5), 1.5);
        assert_eq!(motion.value(Property::Scale, 1.0), 1.25);
        assert_eq!(motion.value(Property::Scale, 2.0), 1.0);
    }

    #[test]
    fn settle_keeps_final_values() {
        let mut motion = Motion::new();
        motion.add(Property::Opacity, Tween::new(0.0, 0.4, 1.0), 0.0);
        motion.add(Property::RotationY, Tween::new(0.0, 360.0, 20.0).repeat(Repeat::Forever), 0.0);
        motion.settle(2.0);
        assert_eq!(motion.track_count(), 1);
        assert_eq!(motion.value(Property::Opacity, 2.0), 0.4);
        assert!(!motion.is_idle());
    }

    #[test]
    fn box_shadow_blends_between_rest_and_lift() {
        let mut transform = Transform::default();
        assert_eq!(transform.css_box_shadow(), "0 10.0px 30.0px rgba(0,0,0,0.300)");
        transform.lift = 1.0;
        assert_eq!(transform.css_box_shadow(), "0 25.0px 50.0px rgba(0,0,0,0.500)");
    }

    #[test]
    fn background_position_follows_offset() {
        let mut transform = Transform::default();
        transform.set(Property::BackgroundX, 150.0);
        assert_eq!(transform.css_background_position(), "150.00px 0px");
    }
}
