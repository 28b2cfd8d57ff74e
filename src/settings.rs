//! Game settings and stop conditions
//!
//! Loaded from a JSON file when one is given; any missing field falls back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::LoadError;

/// When a match ends. `None` disables that limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StopCondition {
    /// First player to reach this score ends the match
    pub score_threshold: Option<u32>,
    /// Either paddle reaching this many hits ends the match
    pub hit_cap: Option<u32>,
}

impl StopCondition {
    /// The fitness-evaluation limits: first point or 50 hits
    pub fn evaluation() -> Self {
        Self {
            score_threshold: Some(EVAL_SCORE_THRESHOLD),
            hit_cap: Some(EVAL_HIT_CAP),
        }
    }

    /// Never stops on its own; only an external quit ends the match
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.score_threshold.is_none() && self.hit_cap.is_none()
    }

    /// Whether the given scores and hit counts meet any configured limit
    pub fn is_met(&self, scores: [u32; 2], hits: [u32; 2]) -> bool {
        let score_hit = self
            .score_threshold
            .is_some_and(|t| scores.iter().any(|&s| s >= t));
        let cap_hit = self.hit_cap.is_some_and(|c| hits.iter().any(|&h| h >= c));
        score_hit || cap_hit
    }
}

/// Board, entity and pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    /// Launch angle bound in whole degrees
    pub launch_angle_deg: i32,

    // === Pacing ===
    /// Frames per second in interactive mode (bulk evaluation is unpaced)
    pub fps: u32,

    // === Stopping ===
    pub eval_stop: StopCondition,
    pub demo_stop: StopCondition,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            launch_angle_deg: LAUNCH_ANGLE_DEG,

            fps: DEMO_FPS,

            eval_stop: StopCondition::evaluation(),
            demo_stop: StopCondition::unbounded(),
        }
    }
}

impl Settings {
    /// Settings for bulk fitness evaluation: never paced
    ///
    /// The defaults already describe the interactive demo at 60 fps with no
    /// terminal condition.
    pub fn evaluation() -> Self {
        Self {
            fps: 0,
            ..Self::default()
        }
    }

    /// Left edge x of the given paddle (0 = left, 1 = right)
    pub fn paddle_x(&self, side: usize) -> f32 {
        if side == 0 {
            self.paddle_margin
        } else {
            self.board_width - self.paddle_margin - self.paddle_width
        }
    }

    /// Initial top edge y shared by both paddles
    pub fn paddle_start_y(&self) -> f32 {
        self.board_height / 2.0 + PADDLE_START_OFFSET
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
