//! Time-bounded interpolation of a single value, plus the pausable timeline
//! every tween on the page is measured against.

use std::f64::consts::PI;

/// Easing curves used on the page. `apply` maps progress in `[0, 1]` onto
/// eased progress with `apply(0) == 0` and `apply(1) == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    None,
    Power1InOut,
    Power2Out,
    Power2InOut,
    Power3Out,
    /// Overshoots past the goal before settling; the parameter sets how far.
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        if p == 0.0 || p == 1.0 {
            return p;
        }
        match self {
            Ease::None => p,
            Ease::Power1InOut => in_out(p, 2),
            Ease::Power2Out => 1.0 - (1.0 - p).powi(3),
            Ease::Power2InOut => in_out(p, 3),
            Ease::Power3Out => 1.0 - (1.0 - p).powi(4),
            Ease::BackOut(overshoot) => {
                let q = p - 1.0;
                q * q * ((overshoot + 1.0) * q + overshoot) + 1.0
            }
            Ease::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * p) * ((p - shift) * 2.0 * PI / period).sin() + 1.0
            }
        }
    }
}

fn in_out(p: f64, power: i32) -> f64 {
    if p < 0.5 {
        (2.0 * p).powi(power) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - p)).powi(power) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Extra cycles after the first one.
    Times(u32),
    Forever,
}

/// Interpolation of one number from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
    pub repeat: Repeat,
    /// Alternate cycles play backwards.
    pub yoyo: bool,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease: Ease::None,
            repeat: Repeat::Times(0),
            yoyo: false,
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Delay plus every cycle; `None` for endless tweens.
    pub fn total_duration(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Times(n) => Some(self.delay + self.duration * f64::from(n + 1)),
            Repeat::Forever => None,
        }
    }

    pub fn has_started(&self, elapsed: f64) -> bool {
        elapsed >= self.delay
    }

    pub fn is_complete(&self, elapsed: f64) -> bool {
        self.total_duration().is_some_and(|total| elapsed >= total)
    }

    /// The value once every cycle has played.
    pub fn end_value(&self) -> f64 {
        match self.repeat {
            Repeat::Times(n) if self.yoyo && n % 2 == 1 => self.from,
            _ => self.to,
        }
    }

    /// Value `elapsed` seconds after the tween was scheduled.
    pub fn value_at(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        if self.is_complete(elapsed) || self.duration <= 0.0 {
            return self.end_value();
        }
        let cycle = (local / self.duration).floor();
        let mut progress = (local - cycle * self.duration) / self.duration;
        if self.yoyo && cycle as u64 % 2 == 1 {
            progress = 1.0 - progress;
        }
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }
}

/// Animation time. Only moves while playing, so pausing freezes every tween
/// sampled against it and resuming picks up where it stopped.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    time: f64,
    paused: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, delta_secs: f64) {
        if !self.paused {
            self.time += delta_secs.max(0.0);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}
