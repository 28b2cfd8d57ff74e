//! Pong Evolve - a two-paddle arena for scoring neuroevolved controllers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, match state)
//! - `arena`: Match runners (headless evaluation and paced interactive play)
//! - `controller`: Observation/decision contract and scripted controllers
//! - `network`: Feed-forward network controller
//! - `evaluator`: Round-robin fitness evaluation over a generation
//! - `presentation`: Frame snapshots and the presenter boundary
//! - `persistence`: Versioned save/load of trained controllers
//! - `settings`: Data-driven board, paddle, ball and stop configuration

pub mod arena;
pub mod controller;
pub mod evaluator;
pub mod network;
pub mod persistence;
pub mod presentation;
pub mod settings;
pub mod sim;

pub use arena::{MatchOutcome, play_match, run_interactive};
pub use controller::{BallTracker, Controller, Decision, HumanInput, Observation};
pub use evaluator::{Candidate, GenerationReport, evaluate_generation};
pub use network::{FeedForward, ShapeError};
pub use persistence::{LoadError, SaveError, load_controller, save_controller};
pub use presentation::{Frame, FramePacer, Presenter};
pub use settings::{Settings, StopCondition};

/// Game configuration constants
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 900.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Distance of the left paddle's left edge from the left wall
    pub const PADDLE_MARGIN: f32 = 20.0;
    /// Paddles start just below the vertical center
    pub const PADDLE_START_OFFSET: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_SPEED: f32 = 7.0;
    /// Launch angle bound in whole degrees (0 is excluded)
    pub const LAUNCH_ANGLE_DEG: i32 = 30;

    /// Interactive frame rate
    pub const DEMO_FPS: u32 = 60;

    /// Evaluation stop: first point ends the match
    pub const EVAL_SCORE_THRESHOLD: u32 = 1;
    /// Evaluation stop: hit cap per paddle
    pub const EVAL_HIT_CAP: u32 = 50;
}
