use super::reels::{REEL_COUNT, STOP_INDEX};

/// Height of one reel entry in CSS pixels
pub const ITEM_HEIGHT: f64 = 96.0;
/// Reel `i` spins for `BASE_SPIN_SECS + i` seconds
pub const BASE_SPIN_SECS: f64 = 4.0;
pub const MAX_BLUR_PX: f64 = 12.0;
/// Blur pixels per px/ms of reel speed
pub const BLUR_PER_VELOCITY: f64 = 1.5;

pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Derivative of `ease_out_quart` with respect to `t`
fn ease_out_quart_slope(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    4.0 * (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelFrame {
    /// Distance scrolled from the top of the strip, in pixels
    pub offset: f64,
    pub blur: f64,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelAnimation {
    pub reel: usize,
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
}

impl ReelAnimation {
    pub fn sample(&self, elapsed_ms: f64) -> ReelFrame {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        let distance = self.to - self.from;
        let velocity = (distance * ease_out_quart_slope(progress) / self.duration_ms).abs();

        ReelFrame {
            offset: self.from + distance * ease_out_quart(progress),
            blur: (velocity * BLUR_PER_VELOCITY).min(MAX_BLUR_PX),
            done: progress >= 1.0,
        }
    }
}

/// The whole spin: one animation per reel, started together, finishing
/// one second apart.
#[derive(Debug, Clone, PartialEq)]
pub struct RollTimeline {
    pub reels: [ReelAnimation; REEL_COUNT],
}

impl RollTimeline {
    pub fn new() -> Self {
        Self::to_index(STOP_INDEX)
    }

    pub fn to_index(stop_index: usize) -> Self {
        let reels = std::array::from_fn(|reel| ReelAnimation {
            reel,
            from: 0.0,
            to: stop_index as f64 * ITEM_HEIGHT,
            duration_ms: (BASE_SPIN_SECS + reel as f64) * 1000.0,
        });
        Self { reels }
    }

    pub fn sample(&self, elapsed_ms: f64) -> [ReelFrame; REEL_COUNT] {
        std::array::from_fn(|i| self.reels[i].sample(elapsed_ms))
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.reels.iter().map(|r| r.duration_ms).fold(0.0, f64::max)
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.total_duration_ms()
    }
}

impl Default for RollTimeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reels_are_staggered_by_one_second() {
        let timeline = RollTimeline::new();
        let durations: Vec<f64> = timeline.reels.iter().map(|r| r.duration_ms).collect();
        assert_eq!(durations, vec![4000.0, 5000.0, 6000.0]);
        assert_eq!(timeline.total_duration_ms(), 6000.0);
    }

    #[test]
    fn every_reel_stops_on_the_pay_line() {
        let timeline = RollTimeline::new();
        let frames = timeline.sample(6000.0);
        for frame in frames {
            assert!(frame.done);
            assert_eq!(frame.offset, STOP_INDEX as f64 * ITEM_HEIGHT);
            assert_eq!(frame.blur, 0.0);
        }
        assert!(timeline.is_complete(6000.0));
        assert!(!timeline.is_complete(5999.0));
    }

    #[test]
    fn first_reel_finishes_before_the_last() {
        let frames = RollTimeline::new().sample(4500.0);
        assert!(frames[0].done);
        assert!(!frames[1].done);
        assert!(!frames[2].done);
    }

    #[test]
    fn blur_tracks_velocity() {
        let reel = RollTimeline::new().reels[0];
        let early = reel.sample(100.0).blur;
        let late = reel.sample(3500.0).blur;
        assert!(early > late);
        assert!(early <= MAX_BLUR_PX);
        assert!(late > 0.0);
    }

    #[test]
    fn offsets_never_go_backwards() {
        let reel = RollTimeline::new().reels[2];
        let mut last = 0.0;
        for step in 0..=60 {
            let offset = reel.sample(step as f64 * 100.0).offset;
            assert!(offset >= last);
            last = offset;
        }
    }
}
