//! Entrance, hover and feedback animations for the page's UI elements.

use std::collections::BTreeMap;

use rand::Rng;

use crate::motion::{Motion, Property, Transform};
use crate::tween::{Ease, Repeat, Tween};

/// An animated element on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// The page body, whose background slides on theme changes.
    Body,
    Header,
    Card(usize),
    CardIcon(usize),
    Button(usize),
    Cube(usize),
}

/// The three interactive buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Pause,
    Theme,
    Burst,
}

/// What the page contains, as counted by the DOM surface at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub header: bool,
    pub cards: usize,
    pub buttons: usize,
    pub cubes: usize,
    /// Position of each control among the `.btn` elements, if it is one.
    pub pause_button: Option<usize>,
    pub theme_button: Option<usize>,
    pub burst_button: Option<usize>,
}

impl Layout {
    pub fn button_for(&self, control: Control) -> Option<usize> {
        match control {
            Control::Pause => self.pause_button,
            Control::Theme => self.theme_button,
            Control::Burst => self.burst_button,
        }
    }
}

const HOVER_SECS: f64 = 0.3;
const THEME_SHIFT_PX: f64 = 100.0;
const THEME_SHIFT_SECS: f64 = 1.0;

/// Every animated element's motion, rendered together each frame.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    layout: Layout,
    motions: BTreeMap<Target, Motion>,
}

impl Stage {
    /// Schedule the page's entrance animations starting at timeline time `now`.
    pub fn choreograph(layout: Layout, now: f64) -> Self {
        let mut motions = BTreeMap::new();
        motions.insert(Target::Body, Motion::new());

        if layout.header {
            let mut header = Motion::new();
            let drop_in = Tween::new(-50.0, 0.0, 1.2).ease(Ease::Power3Out);
            let fade_in = Tween::new(0.0, 1.0, 1.2).ease(Ease::Power3Out);
            header.add_from(Property::Y, drop_in, now);
            header.add_from(Property::Opacity, fade_in, now);
            header.add(
                Property::Scale,
                Tween::new(1.0, 1.1, 0.5)
                    .delay(2.0)
                    .ease(Ease::Power2InOut)
                    .repeat(Repeat::Times(1))
                    .yoyo(true),
                now,
            );
            motions.insert(Target::Header, header);
        }

        for i in 0..layout.cards {
            let delay = 0.5 + 0.2 * i as f64;
            let ease = Ease::BackOut(1.7);
            let rise = Tween::new(100.0, 0.0, 1.5).delay(delay).ease(ease);
            let fade_in = Tween::new(0.0, 1.0, 1.5).delay(delay).ease(ease);
            let mut card = Motion::new();
            card.add_from(Property::Y, rise, now);
            card.add_from(Property::Opacity, fade_in, now);
            motions.insert(Target::Card(i), card);
            motions.insert(Target::CardIcon(i), Motion::new());
        }

        for i in 0..layout.buttons {
            let delay = 1.0 + 0.1 * i as f64;
            let ease = Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            };
            let appear = Tween::new(0.0, 1.0, 1.0).delay(delay).ease(ease);
            let mut button = Motion::new();
            button.add_from(Property::Scale, appear, now);
            button.add_from(Property::Opacity, appear, now);
            motions.insert(Target::Button(i), button);
        }

        for i in 0..layout.cubes {
            let spin = Tween::new(0.0, 360.0, 20.0).repeat(Repeat::Forever);
            let tilt = Tween::new(0.0, 180.0, 20.0).repeat(Repeat::Forever);
            let mut cube = Motion::new();
            cube.add(Property::RotationY, spin, now);
            cube.add(Property::RotationX, tilt, now);
            motions.insert(Target::Cube(i), cube);
        }

        Self { layout, motions }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn motion(&self, target: Target) -> Option<&Motion> {
        self.motions.get(&target)
    }

    pub fn sample(&self, target: Target, now: f64) -> Option<Transform> {
        self.motions.get(&target).map(|motion| motion.sample(now))
    }

    /// Raise a card and spin its icon, or put both back.
    pub fn card_hover(&mut self, index: usize, entered: bool, now: f64) {
        if let Some(card) = self.motions.get_mut(&Target::Card(index)) {
            let (scale, lift) = if entered { (1.05, 1.0) } else { (1.0, 0.0) };
            card.tween_to(Property::Scale, scale, HOVER_SECS, Ease::Power2Out, now);
            card.tween_to(Property::Lift, lift, HOVER_SECS, Ease::Power2Out, now);
        }
        if let Some(icon) = self.motions.get_mut(&Target::CardIcon(index)) {
            let (scale, rotation, ease) = if entered {
                (1.3, 360.0, Ease::BackOut(2.0))
            } else {
                (1.0, 0.0, Ease::Power2Out)
            };
            icon.tween_to(Property::Scale, scale, HOVER_SECS, ease, now);
            icon.tween_to(Property::Rotation, rotation, HOVER_SECS, ease, now);
        }
    }

    /// Slide the page background a further 100px, relative to wherever it
    /// is now.
    pub fn theme_shift(&mut self, now: f64) {
        if let Some(body) = self.motions.get_mut(&Target::Body) {
            let to = body.value(Property::BackgroundX, now) + THEME_SHIFT_PX;
            body.tween_to(Property::BackgroundX, to, THEME_SHIFT_SECS, Ease::Power2InOut, now);
        }
    }

    /// Quick squeeze-and-release on a pressed control.
    pub fn press_feedback(&mut self, control: Control, now: f64) {
        if let Some(button) = self.control_motion(control) {
            let from = button.value(Property::Scale, now);
            button.add(
                Property::Scale,
                Tween::new(from, 0.9, 0.2)
                    .ease(Ease::Power2InOut)
                    .repeat(Repeat::Times(1))
                    .yoyo(true),
                now,
            );
        }
    }

    /// Jitter a control to a random offset a few times, then ease it home.
    pub fn shake<R: Rng + ?Sized>(&mut self, control: Control, now: f64, rng: &mut R) {
        let Some(button) = self.control_motion(control) else {
            return;
        };
        for property in [Property::X, Property::Y] {
            let offset = rng.random_range(-10.0..10.0);
            let shake = Tween::new(0.0, offset, 0.2)
                .ease(Ease::Power1InOut)
                .repeat(Repeat::Times(5));
            let settle_at = shake.total_duration().unwrap_or_default();
            button.add(property, shake, now);
            button.add(property, Tween::new(offset, 0.0, 0.2).delay(settle_at), now);
        }
    }

    /// Sample every motion at `now`, dropping finished tracks.
    pub fn advance(&mut self, now: f64) -> Vec<(Target, Transform)> {
        self.motions
            .iter_mut()
            .map(|(target, motion)| {
                let transform = motion.sample(now);
                motion.settle(now);
                (*target, transform)
            })
            .collect()
    }

    fn control_motion(&mut self, control: Control) -> Option<&mut Motion> {
        let index = self.layout.button_for(control)?;
        self.motions.get_mut(&Target::Button(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn layout() -> Layout {
        Layout {
            header: true,
            cards: 3,
            buttons: 3,
            cubes: 2,
            pause_button: Some(0),
            theme_button: Some(1),
            burst_button: Some(2),
        }
    }

    #[test]
    fn cards_start_hidden_and_land_in_place() {
        let stage = Stage::choreograph(layout(), 0.0);
        let hidden = stage.sample(Target::Card(2), 0.0).unwrap();
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.y, 100.0);

        // The last card's stagger ends at 0.5 + 0.4 + 1.5.
        let landed = stage.sample(Target::Card(2), 2.5).unwrap();
        assert_eq!(landed.opacity, 1.0);
        assert_eq!(landed.y, 0.0);
    }

    #[test]
    fn header_pulses_after_entrance() {
        let stage = Stage::choreograph(layout(), 0.0);
        assert_eq!(stage.sample(Target::Header, 1.0).unwrap().scale, 1.0);
        assert!((stage.sample(Target::Header, 2.5).unwrap().scale - 1.1).abs() < 1e-9);
        assert_eq!(stage.sample(Target::Header, 3.5).unwrap().scale, 1.0);
    }

    #[test]
    fn cubes_spin_forever() {
        let mut stage = Stage::choreograph(layout(), 0.0);
        stage.advance(500.0);
        let cube = stage.sample(Target::Cube(1), 505.0).unwrap();
        assert!((cube.rotation_y - 90.0).abs() < 1e-6);
        assert!((cube.rotation_x - 45.0).abs() < 1e-6);
    }

    #[test]
    fn hover_raises_and_restores() {
        let mut stage = Stage::choreograph(layout(), 0.0);
        stage.advance(5.0);
        stage.card_hover(0, true, 5.0);
        let raised = stage.sample(Target::Card(0), 5.4).unwrap();
        assert_eq!(raised.scale, 1.05);
        assert_eq!(raised.lift, 1.0);
        assert_eq!(stage.sample(Target::CardIcon(0), 5.4).unwrap().rotation, 360.0);

        stage.card_hover(0, false, 5.4);
        let rested = stage.sample(Target::Card(0), 5.8).unwrap();
        assert_eq!(rested.scale, 1.0);
        assert_eq!(rested.lift, 0.0);
    }

    #[test]
    fn shake_returns_home() {
        let mut stage = Stage::choreograph(layout(), 0.0);
        stage.advance(3.0);
        let mut rng = SmallRng::seed_from_u64(3);
        stage.shake(Control::Burst, 3.0, &mut rng);
        let home = stage.sample(Target::Button(2), 4.5).unwrap();
        assert_eq!((home.x, home.y), (0.0, 0.0));
    }

    #[test]
    fn theme_shift_accumulates() {
        let mut stage = Stage::choreograph(layout(), 0.0);
        stage.theme_shift(3.0);
        let halfway = stage.sample(Target::Body, 3.5).unwrap().background_x;
        assert!((halfway - 50.0).abs() < 1e-9);
        assert_eq!(stage.sample(Target::Body, 4.0).unwrap().background_x, 100.0);

        // A second toggle mid-slide continues from the current offset.
        stage.theme_shift(3.5);
        assert_eq!(stage.sample(Target::Body, 4.5).unwrap().background_x, 150.0);
    }

    #[test]
    fn press_feedback_without_button_is_ignored() {
        let mut layout = layout();
        layout.pause_button = None;
        let mut stage = Stage::choreograph(layout, 0.0);
        stage.press_feedback(Control::Pause, 0.0);
        assert_eq!(stage.motion(Target::Button(0)).unwrap().track_count(), 2);
    }
}
