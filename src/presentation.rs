//! Presentation boundary
//!
//! The simulation never draws. After each interactive tick it hands a
//! [`Frame`] to a [`Presenter`], which also supplies the human input for
//! the next tick. Presenters are plain values owned by the caller.

use std::time::{Duration, Instant};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::controller::HumanInput;
use crate::sim::MatchState;

/// Snapshot of everything a renderer needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    /// Top-left corners of the left and right paddles
    pub paddles: [Vec2; 2],
    pub paddle_size: Vec2,
    /// Ball center
    pub ball: Vec2,
    pub ball_radius: f32,
    pub scores: [u32; 2],
    pub hits: [u32; 2],
}

impl Frame {
    pub fn capture(state: &MatchState) -> Self {
        let [left, right] = &state.paddles;
        Self {
            tick: state.ticks,
            paddles: [Vec2::new(left.x, left.y), Vec2::new(right.x, right.y)],
            paddle_size: Vec2::new(left.width, left.height),
            ball: state.ball.pos,
            ball_radius: state.ball.radius,
            scores: state.scores,
            hits: state.hits(),
        }
    }

    /// Combined hits shown on the HUD
    pub fn total_hits(&self) -> u32 {
        self.hits[0] + self.hits[1]
    }
}

/// Renders frames and reports human input
pub trait Presenter {
    /// Input for the human paddle this tick; `None` quits the match
    fn poll_input(&mut self) -> Option<HumanInput>;

    /// Show the state after a tick
    fn present(&mut self, frame: &Frame);
}

/// Holds a loop to a fixed frame rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    /// `fps == 0` disables pacing
    pub fn new(fps: u32) -> Self {
        let frame = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / u64::from(fps))
        };
        Self { frame, next: None }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep until the next frame boundary
    pub fn wait(&mut self) {
        if self.frame.is_zero() {
            return;
        }
        let now = Instant::now();
        let target = self.next.unwrap_or(now);
        if target > now {
            std::thread::sleep(target - now);
        }
        // Don't try to catch up after a long stall
        self.next = Some(target.max(now) + self.frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, StopCondition};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_capture() {
        let mut state = MatchState::new(
            &Settings::default(),
            StopCondition::unbounded(),
            Pcg32::seed_from_u64(3),
        );
        state.paddles[0].hits = 4;
        state.paddles[1].hits = 2;
        state.scores = [1, 3];

        let frame = Frame::capture(&state);
        assert_eq!(frame.paddles[0], Vec2::new(20.0, 310.0));
        assert_eq!(frame.paddles[1], Vec2::new(870.0, 310.0));
        assert_eq!(frame.paddle_size, Vec2::new(10.0, 100.0));
        assert_eq!(frame.ball, Vec2::new(450.0, 300.0));
        assert_eq!(frame.scores, [1, 3]);
        assert_eq!(frame.total_hits(), 6);
    }

    #[test]
    fn test_pacer_holds_rate() {
        let mut pacer = FramePacer::new(200);
        assert_eq!(pacer.frame_duration(), Duration::from_millis(5));
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        // First wait returns immediately, the next three sleep one frame each
        assert!(start.elapsed() >= Duration::from_millis(14));
    }

    #[test]
    fn test_unpaced() {
        let mut pacer = FramePacer::new(0);
        let start = Instant::now();
        for _ in 0..1000 {
            pacer.wait();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
