//! Invariants that must hold for any inputs

use glam::Vec2;
use pong_evolve::settings::{Settings, StopCondition};
use pong_evolve::sim::{Ball, MatchState, Paddle, TickInput, tick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn axis() -> impl Strategy<Value = i8> {
    prop_oneof![Just(-1i8), Just(0i8), Just(1i8)]
}

proptest! {
    #[test]
    fn paddle_stays_on_board(start in 0.0f32..500.0, moves in prop::collection::vec(axis(), 1..400)) {
        let mut paddle = Paddle::new(20.0, start, 10.0, 100.0, 10.0);
        for m in moves {
            paddle.update(m, 600.0);
            prop_assert!(paddle.y >= 0.0);
            prop_assert!(paddle.y <= 500.0);
        }
    }

    #[test]
    fn ball_speed_constant_between_resets(seed in any::<u64>(), ticks in 1usize..2000) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new(Vec2::new(450.0, 300.0), 7.0, 7.0, 30, &mut rng);
        for _ in 0..ticks {
            let before = ball.velocity().length();
            if ball.update(900.0, 600.0).is_some() {
                ball.reset(Vec2::new(450.0, 300.0), &mut rng);
            }
            prop_assert!((ball.velocity().length() - 7.0).abs() < 1e-3);
            prop_assert!((before - 7.0).abs() < 1e-3);
        }
    }

    #[test]
    fn reset_negates_horizontal_direction(seed in any::<u64>(), resets in 1usize..50) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new(Vec2::new(450.0, 300.0), 7.0, 7.0, 30, &mut rng);
        for _ in 0..resets {
            let before = ball.x_fac;
            ball.reset(Vec2::new(450.0, 300.0), &mut rng);
            prop_assert_eq!(ball.x_fac, -before);
            prop_assert!(ball.vel.y != 0.0);
        }
    }

    #[test]
    fn match_state_invariants(seed in any::<u64>(), inputs in prop::collection::vec((axis(), axis()), 1..600)) {
        let settings = Settings::default();
        let mut state = MatchState::new(&settings, StopCondition::unbounded(), Pcg32::seed_from_u64(seed));
        for (left, right) in inputs {
            let hits_before = state.hits();
            let report = tick(&mut state, &TickInput::new(left, right));
            for side in 0..2 {
                let paddle = &state.paddles[side];
                prop_assert!(paddle.y >= 0.0 && paddle.y + paddle.height <= settings.board_height);
                prop_assert!(state.hits()[side] - hits_before[side] <= 1);
                prop_assert_eq!(report.bounced[side], state.hits()[side] > hits_before[side]);
            }
        }
    }
}
