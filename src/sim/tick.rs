//! Fixed-step simulation tick
//!
//! Advances a match by one frame. Controllers are resolved to axis factors
//! before the call so this step stays pure apart from the ball's RNG.

use super::collision::ball_paddle_overlap;
use super::state::{MatchPhase, MatchState, ScoreSignal, board_center};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Axis factor for the left and right paddle (-1 up, 0 still, 1 down)
    pub axes: [i8; 2],
}

impl TickInput {
    pub fn new(left: i8, right: i8) -> Self {
        Self {
            axes: [left, right],
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Paddles the ball bounced off this tick
    pub bounced: [bool; 2],
    /// Edge crossing that produced a point, if any
    pub scored: Option<ScoreSignal>,
    /// The match became terminal on this tick
    pub finished: bool,
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    if state.phase == MatchPhase::Terminal {
        return report;
    }

    state.ticks += 1;

    // Paddle collisions
    for (side, paddle) in state.paddles.iter_mut().enumerate() {
        if ball_paddle_overlap(&state.ball, paddle) {
            state.ball.bounce();
            paddle.hits += 1;
            report.bounced[side] = true;
        }
    }

    // Movement
    let (width, height) = (state.settings.board_width, state.settings.board_height);
    for (paddle, &axis) in state.paddles.iter_mut().zip(input.axes.iter()) {
        paddle.update(axis, height);
    }
    let signal = state.ball.update(width, height);

    // Scoring
    if let Some(signal) = signal {
        state.scores[signal.scorer()] += 1;
        let center = board_center(&state.settings);
        state.ball.reset(center, &mut state.rng);
        report.scored = Some(signal);
        log::trace!(
            "tick {}: ball left via {:?}, score {}-{}",
            state.ticks,
            signal,
            state.scores[0],
            state.scores[1]
        );
    }

    if state.stop.is_met(state.scores, state.hits()) {
        state.phase = MatchPhase::Terminal;
        report.finished = true;
    }

    report
}
