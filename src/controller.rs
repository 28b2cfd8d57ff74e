//! Controller contract
//!
//! A controller scores three moves for an observation of the board; the
//! paddle takes the highest-scoring one. Human input is a separate per-tick
//! signal with its own "keep doing what you were doing" option.

use serde::{Deserialize, Serialize};

use crate::sim::{Ball, Paddle};

/// What a paddle sees each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Paddle top edge
    pub paddle_y: f32,
    /// Horizontal distance between paddle and ball
    pub ball_dx: f32,
    /// Ball center y
    pub ball_y: f32,
}

impl Observation {
    pub fn new(paddle: &Paddle, ball: &Ball) -> Self {
        Self {
            paddle_y: paddle.y,
            ball_dx: (ball.pos.x - paddle.x).abs(),
            ball_y: ball.pos.y,
        }
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.paddle_y, self.ball_dx, self.ball_y]
    }
}

/// A paddle move
///
/// `Hold` leaves the paddle doing whatever it did last tick, so a paddle
/// that was moving keeps moving until told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Decision {
    #[default]
    Hold,
    /// Toward decreasing y
    MoveUp,
    /// Toward increasing y
    MoveDown,
}

impl Decision {
    /// Index of the first maximum; NaN scores never win
    pub fn argmax(scores: &[f32; 3]) -> Self {
        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            let current = scores[best];
            if score > current || (current.is_nan() && !score.is_nan()) {
                best = i;
            }
        }
        Self::from_index(best)
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Decision::MoveUp,
            2 => Decision::MoveDown,
            _ => Decision::Hold,
        }
    }

    /// Resolve against the paddle's current axis factor; `Hold` keeps it
    pub fn apply(self, current: i8) -> i8 {
        match self {
            Decision::Hold => current,
            Decision::MoveUp => -1,
            Decision::MoveDown => 1,
        }
    }
}

/// Anything that can drive a paddle
pub trait Controller {
    /// Score the three moves (hold, up, down)
    fn scores(&self, obs: &Observation) -> [f32; 3];

    fn decide(&self, obs: &Observation) -> Decision {
        Decision::argmax(&self.scores(obs))
    }
}

/// Per-tick signal for the human-driven paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HumanInput {
    /// Keep the previous axis factor
    #[default]
    NoChange,
    MoveUp,
    MoveDown,
    /// Key released: stop moving
    Release,
}

impl HumanInput {
    /// Resolve against the paddle's current axis factor
    pub fn apply(self, current: i8) -> i8 {
        match self {
            HumanInput::NoChange => current,
            HumanInput::MoveUp => -1,
            HumanInput::MoveDown => 1,
            HumanInput::Release => 0,
        }
    }
}

/// Scripted controller that chases the ball's height
///
/// Stands in for a human in headless demos and serves as a baseline
/// opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallTracker {
    pub paddle_height: f32,
    /// No movement while the ball is this close to the paddle center
    pub dead_zone: f32,
}

impl BallTracker {
    pub fn new(paddle_height: f32) -> Self {
        Self {
            paddle_height,
            dead_zone: paddle_height / 4.0,
        }
    }
}

impl Controller for BallTracker {
    fn scores(&self, obs: &Observation) -> [f32; 3] {
        let offset = obs.ball_y - (obs.paddle_y + self.paddle_height / 2.0);
        if offset.abs() <= self.dead_zone {
            [1.0, 0.0, 0.0]
        } else if offset < 0.0 {
            [0.0, 1.0, 0.0]
        } else {
            [0.0, 0.0, 1.0]
        }
    }
}

/// Always returns the same scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant(pub [f32; 3]);

impl Controller for Constant {
    fn scores(&self, _obs: &Observation) -> [f32; 3] {
        self.0
    }
}
