//! Match runners
//!
//! `play_match` runs two controllers headless as fast as possible until a
//! stop condition holds. `run_interactive` pits one controller against a
//! presenter-supplied human and paces ticks to the configured frame rate.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, Observation};
use crate::presentation::{Frame, FramePacer, Presenter};
use crate::settings::{Settings, StopCondition};
use crate::sim::{MatchState, TickInput, tick};

/// Result of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Hits for left and right; this is the match's fitness contribution
    pub hits: [u32; 2],
    pub scores: [u32; 2],
    pub ticks: u64,
}

impl MatchOutcome {
    fn from_state(state: &MatchState) -> Self {
        Self {
            hits: state.hits(),
            scores: state.scores,
            ticks: state.ticks,
        }
    }
}

/// Axis factor chosen by a controller for one paddle
fn controller_axis<C: Controller>(controller: &C, state: &MatchState, side: usize) -> i8 {
    let paddle = &state.paddles[side];
    let obs = Observation::new(paddle, &state.ball);
    controller.decide(&obs).apply(paddle.axis)
}

/// Play one headless match, left against right
///
/// An unbounded stop condition would never return, so it is replaced by
/// the evaluation limits.
pub fn play_match<L: Controller, R: Controller>(
    left: &L,
    right: &R,
    settings: &Settings,
    stop: StopCondition,
    rng: Pcg32,
) -> MatchOutcome {
    let stop = if stop.is_unbounded() {
        log::warn!("Headless match without a stop condition, using evaluation limits");
        StopCondition::evaluation()
    } else {
        stop
    };

    let mut state = MatchState::new(settings, stop, rng);
    while !state.is_terminal() {
        let input = TickInput::new(
            controller_axis(left, &state, 0),
            controller_axis(right, &state, 1),
        );
        tick(&mut state, &input);
    }

    MatchOutcome::from_state(&state)
}

/// Play a controller (left) against human input (right)
///
/// Runs until the presenter signals quit or `settings.demo_stop` is met.
/// Returns the last frame shown.
pub fn run_interactive<C: Controller, P: Presenter>(
    controller: &C,
    presenter: &mut P,
    settings: &Settings,
    rng: Pcg32,
) -> Frame {
    let mut state = MatchState::new(settings, settings.demo_stop, rng);
    let mut pacer = FramePacer::new(settings.fps);
    let mut frame = Frame::capture(&state);
    presenter.present(&frame);

    log::info!("Interactive match started at {} fps", settings.fps);
    loop {
        let Some(human) = presenter.poll_input() else {
            log::info!("Quit after {} ticks", state.ticks);
            break;
        };

        let input = TickInput::new(
            controller_axis(controller, &state, 0),
            human.apply(state.paddles[1].axis),
        );
        let report = tick(&mut state, &input);
        if let Some(signal) = report.scored {
            log::debug!(
                "Point via {:?} edge, score {}-{}",
                signal,
                state.scores[0],
                state.scores[1]
            );
        }

        frame = Frame::capture(&state);
        presenter.present(&frame);

        if report.finished {
            log::info!("Match finished after {} ticks", state.ticks);
            break;
        }
        pacer.wait();
    }

    frame
}
