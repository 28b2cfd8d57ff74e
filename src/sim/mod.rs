//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only, consumed at ball serve
//! - Stable paddle order (left, then right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, ball_paddle_overlap};
pub use state::{
    Ball, MatchPhase, MatchState, Paddle, ScoreSignal, board_center, random_launch_angle,
};
pub use tick::{TickInput, TickReport, tick};
