//! Rolling frame-rate, session clock and the decorative particle counter.

use crate::config::StatsConfig;

/// Values shown in the stats panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub fps: u32,
    pub elapsed_seconds: u64,
    /// Cosmetic: oscillates around a baseline and is unrelated to the real
    /// particle count.
    pub displayed_particles: i64,
}

impl StatsSnapshot {
    /// Displayed count with thousands separators, e.g. `1,500`.
    pub fn particles_label(&self) -> String {
        group_thousands(self.displayed_particles)
    }
}

/// Counts frames as they render and turns them into a snapshot whenever the
/// stats timer fires.
#[derive(Clone, Debug)]
pub struct StatsAggregator {
    config: StatsConfig,
    session_start_ms: f64,
    fps_anchor_ms: f64,
    frame_count: u32,
    fps: u32,
    elapsed_seconds: u64,
    displayed_bonus: i64,
}

impl StatsAggregator {
    pub fn new(config: StatsConfig, now_ms: f64) -> Self {
        Self {
            fps: config.initial_fps,
            config,
            session_start_ms: now_ms,
            fps_anchor_ms: now_ms,
            frame_count: 0,
            elapsed_seconds: 0,
            displayed_bonus: 0,
        }
    }

    pub fn record_frame(&mut self) {
        self.frame_count = self.frame_count.saturating_add(1);
    }

    pub fn sample(&mut self, now_ms: f64) -> StatsSnapshot {
        let window = now_ms - self.fps_anchor_ms;
        if window >= self.config.fps_window_ms {
            self.fps = (f64::from(self.frame_count) * 1000.0 / window).round() as u32;
            self.frame_count = 0;
            self.fps_anchor_ms = now_ms;
        }

        let elapsed = ((now_ms - self.session_start_ms) / 1000.0).floor().max(0.0) as u64;
        self.elapsed_seconds = self.elapsed_seconds.max(elapsed);

        let wave = (self.config.displayed_baseline
            + (now_ms / 1000.0).sin() * self.config.displayed_amplitude)
            .floor() as i64;

        StatsSnapshot {
            fps: self.fps,
            elapsed_seconds: self.elapsed_seconds,
            displayed_particles: wave + self.displayed_bonus,
        }
    }

    /// Permanently raise the displayed count.
    pub fn bump_displayed(&mut self, amount: i64) {
        self.displayed_bonus += amount;
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn pending_frames(&self) -> u32 {
        self.frame_count
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> StatsAggregator {
        StatsAggregator::new(StatsConfig::default(), 0.0)
    }

    #[test]
    fn sixty_frames_in_one_second_is_sixty_fps() {
        let mut stats = aggregator();
        for _ in 0..60 {
            stats.record_frame();
        }
        assert_eq!(stats.sample(1000.0).fps, 60);
        assert_eq!(stats.pending_frames(), 0);
    }

    #[test]
    fn fps_is_stable_inside_a_window() {
        let mut stats = aggregator();
        for _ in 0..30 {
            stats.record_frame();
        }
        for now in [100.0, 200.0, 500.0, 999.0] {
            assert_eq!(stats.sample(now).fps, 60);
        }
        assert_eq!(stats.pending_frames(), 30);

        assert_eq!(stats.sample(1000.0).fps, 30);
        for now in [1100.0, 1500.0, 1999.0] {
            stats.record_frame();
            assert_eq!(stats.sample(now).fps, 30);
        }
    }

    #[test]
    fn fps_rounds_over_long_windows() {
        let mut stats = aggregator();
        for _ in 0..91 {
            stats.record_frame();
        }
        // 91 frames over 1.5 s is 60.67 fps.
        assert_eq!(stats.sample(1500.0).fps, 61);
    }

    #[test]
    fn elapsed_seconds_never_decreases() {
        let mut stats = aggregator();
        assert_eq!(stats.sample(2500.0).elapsed_seconds, 2);
        assert_eq!(stats.sample(1200.0).elapsed_seconds, 2);
        assert_eq!(stats.sample(3000.0).elapsed_seconds, 3);
    }

    #[test]
    fn displayed_count_oscillates_around_baseline() {
        let mut stats = aggregator();
        assert_eq!(stats.sample(0.0).displayed_particles, 1500);
        let peak = stats.sample(std::f64::consts::FRAC_PI_2 * 1000.0);
        assert_eq!(peak.displayed_particles, 1700);
    }

    #[test]
    fn bursts_bump_the_displayed_count_for_good() {
        let mut stats = aggregator();
        stats.bump_displayed(50);
        stats.bump_displayed(50);
        assert_eq!(stats.sample(0.0).displayed_particles, 1600);
        assert_eq!(stats.sample(0.0).displayed_particles, 1600);
    }

    #[test]
    fn label_groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1500), "1,500");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1300), "-1,300");
    }
}
