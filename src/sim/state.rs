//! Match state and core simulation types
//!
//! Screen-space coordinates: origin at the top-left of the board, y grows
//! downward. Paddles are addressed by side index, 0 = left, 1 = right.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::settings::{Settings, StopCondition};

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ticks advance the simulation
    Running,
    /// A stop condition was met; ticks are ignored
    Terminal,
}

/// Which edge the ball crossed when it left the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSignal {
    /// Crossed the left edge; the right paddle scores
    Left,
    /// Crossed the right edge; the left paddle scores
    Right,
}

impl ScoreSignal {
    /// -1 for the left edge, +1 for the right edge
    pub fn sign(self) -> i8 {
        match self {
            ScoreSignal::Left => -1,
            ScoreSignal::Right => 1,
        }
    }

    /// Side index of the paddle that earns the point
    pub fn scorer(self) -> usize {
        match self {
            ScoreSignal::Left => 1,
            ScoreSignal::Right => 0,
        }
    }
}

/// A vertical paddle that only moves along y
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge (fixed)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick at full axis factor
    pub speed: f32,
    /// Current axis factor: -1 up, 0 still, 1 down
    pub axis: i8,
    /// Times the ball bounced off this paddle in the current match
    pub hits: u32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed,
            axis: 0,
            hits: 0,
        }
    }

    /// Build the paddle for a side from settings
    pub fn for_side(side: usize, settings: &Settings) -> Self {
        Self::new(
            settings.paddle_x(side),
            settings.paddle_start_y(),
            settings.paddle_width,
            settings.paddle_height,
            settings.paddle_speed,
        )
    }

    /// Move by `speed * axis` and clamp inside the board
    pub fn update(&mut self, axis: i8, board_height: f32) {
        self.axis = axis.signum();
        self.y += self.speed * f32::from(self.axis);

        if self.y <= 0.0 {
            self.y = 0.0;
        } else if self.y + self.height >= board_height {
            self.y = board_height - self.height;
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The ball
///
/// `vel` holds the magnitudes decomposed from the launch angle; the signs
/// of actual motion come from `x_fac`/`y_fac`, which only change on
/// reflection or reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Constant speed magnitude
    pub speed: f32,
    pub x_fac: i8,
    pub y_fac: i8,
    /// Armed until the first edge crossing since the last reset
    pub armed: bool,
    /// Launch angle bound in whole degrees
    pub launch_angle_deg: i32,
}

impl Ball {
    /// Spawn at `center` with a random launch angle and horizontal direction
    pub fn new<R: Rng + ?Sized>(
        center: Vec2,
        radius: f32,
        speed: f32,
        launch_angle_deg: i32,
        rng: &mut R,
    ) -> Self {
        let mut ball = Self {
            pos: center,
            vel: Vec2::ZERO,
            radius,
            speed,
            x_fac: if rng.random_bool(0.5) { 1 } else { -1 },
            y_fac: -1,
            armed: true,
            launch_angle_deg,
        };
        ball.relaunch(rng);
        ball
    }

    pub fn from_settings<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        Self::new(
            board_center(settings),
            settings.ball_radius,
            settings.ball_speed,
            settings.launch_angle_deg,
            rng,
        )
    }

    /// Displacement applied by one tick
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(
            self.vel.x * f32::from(self.x_fac),
            self.vel.y * f32::from(self.y_fac),
        )
    }

    /// Advance one tick
    ///
    /// Reflects off the top and bottom edges. Returns a signal the first
    /// time the center reaches the left or right edge after a reset.
    pub fn update(&mut self, board_width: f32, board_height: f32) -> Option<ScoreSignal> {
        self.pos += self.velocity();

        let vy = self.velocity().y;
        if (self.pos.y <= 0.0 && vy < 0.0) || (self.pos.y >= board_height && vy > 0.0) {
            self.y_fac = -self.y_fac;
        }

        if !self.armed {
            return None;
        }
        let signal = if self.pos.x <= 0.0 {
            Some(ScoreSignal::Left)
        } else if self.pos.x >= board_width {
            Some(ScoreSignal::Right)
        } else {
            None
        };
        if signal.is_some() {
            self.armed = false;
        }
        signal
    }

    /// Serve again from `center`, heading back the way the ball came from
    pub fn reset<R: Rng + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        self.pos = center;
        self.relaunch(rng);
        self.x_fac = -self.x_fac;
        self.armed = true;
    }

    /// Reflect horizontally (paddle bounce)
    #[inline]
    pub fn bounce(&mut self) {
        self.x_fac = -self.x_fac;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    fn relaunch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = random_launch_angle(rng, self.launch_angle_deg);
        self.vel = Vec2::new(
            (angle.cos() * self.speed).abs(),
            angle.sin() * self.speed,
        );
    }
}

/// Whole-degree angle in `[-max_deg, max_deg]` excluding 0, in radians
pub fn random_launch_angle<R: Rng + ?Sized>(rng: &mut R, max_deg: i32) -> f32 {
    let max_deg = max_deg.abs().max(1);
    loop {
        let deg = rng.random_range(-max_deg..=max_deg);
        if deg != 0 {
            return (deg as f32).to_radians();
        }
    }
}

/// Center of the board, where the ball serves from
#[inline]
pub fn board_center(settings: &Settings) -> Vec2 {
    Vec2::new(settings.board_width / 2.0, settings.board_height / 2.0)
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    pub settings: Settings,
    pub stop: StopCondition,
    /// Left and right paddles
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Points for left and right
    pub scores: [u32; 2],
    /// Simulation tick counter
    pub ticks: u64,
    pub phase: MatchPhase,
    /// Only consumed at ball creation and reset
    pub rng: Pcg32,
}

impl MatchState {
    /// Create a fresh match; scores and hit counters start at zero
    pub fn new(settings: &Settings, stop: StopCondition, mut rng: Pcg32) -> Self {
        let ball = Ball::from_settings(settings, &mut rng);
        Self {
            settings: settings.clone(),
            stop,
            paddles: [Paddle::for_side(0, settings), Paddle::for_side(1, settings)],
            ball,
            scores: [0, 0],
            ticks: 0,
            phase: MatchPhase::Running,
            rng,
        }
    }

    /// Hit counters for left and right
    #[inline]
    pub fn hits(&self) -> [u32; 2] {
        [self.paddles[0].hits, self.paddles[1].hits]
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase == MatchPhase::Terminal
    }
}
