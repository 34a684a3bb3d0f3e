//! Computer opponent
//!
//! Three policies of increasing skill. Each returns a paddle velocity for the
//! current tick; the caller applies it with [`super::physics::move_paddle`].
//! None of them touch the ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::Config;

/// AI difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiMode {
    /// Bounces between floor and ceiling, ignores the ball
    #[default]
    Reactive,
    /// Predicts where an approaching ball will cross and heads there
    Tracking,
    /// Shadows the ball's vertical speed whenever it is level with the paddle
    Predictive,
}

impl AiMode {
    /// Decode the board's difficulty switches (SW3 = tracking, SW4 = predictive)
    pub fn from_switches(switches: u8) -> Self {
        if switches & 0x4 != 0 {
            AiMode::Tracking
        } else if switches & 0x8 != 0 {
            AiMode::Predictive
        } else {
            AiMode::Reactive
        }
    }
}

/// State the AI keeps between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiState {
    /// Current paddle direction/speed. Shared by all policies, so switching
    /// difficulty mid-rally keeps the last heading.
    pub direction: f32,
    /// Last predicted ball center y at the paddle (tracking policy)
    pub prediction: f32,
}

impl AiState {
    /// Fresh state: head down, expect the ball on the serve line
    pub fn new(config: &Config) -> Self {
        Self {
            direction: 1.0,
            prediction: config.ball_start_y,
        }
    }

    /// Forget everything learned since [`AiState::new`]
    pub fn reset(&mut self, config: &Config) {
        *self = Self::new(config);
    }

    /// Paddle velocity for this tick under `mode`
    pub fn velocity(
        &mut self,
        mode: AiMode,
        paddle: &Paddle,
        ball: &Ball,
        dt: f32,
        config: &Config,
    ) -> f32 {
        match mode {
            AiMode::Reactive => self.reactive(paddle, dt, config),
            AiMode::Tracking => self.tracking(paddle, ball, config),
            AiMode::Predictive => self.predictive(paddle, ball, config),
        }
    }

    /// Move at constant speed, turning around before leaving the field
    fn reactive(&mut self, paddle: &Paddle, dt: f32, config: &Config) -> f32 {
        let velocity = self.direction;
        let next_y = paddle.pos.y + velocity * dt + self.direction;
        if next_y + config.paddle_height > config.bottom_edge() || next_y < 0.0 {
            self.direction = -self.direction;
        }
        velocity
    }

    /// React only to a nearby ball moving right, toward the AI's end
    fn tracking(&mut self, paddle: &Paddle, ball: &Ball, config: &Config) -> f32 {
        let half_ball = config.ball_height / 2.0;
        let distance = (paddle.pos.x - (ball.pos.x + config.ball_width / 2.0)).abs();
        if distance >= config.ai_look_dist || ball.vel.x <= 0.5 {
            return 0.0;
        }

        // The band is in whole pixels
        let lower = (paddle.pos.y + half_ball).trunc();
        let upper = (paddle.pos.y + config.paddle_height - half_ball).trunc();
        self.prediction = predict_ball_y(ball.pos, ball.vel, config);

        if upper + ball.vel.y < config.bottom_edge() && lower + ball.vel.y > 0.0 {
            self.direction = ball.vel.y;
            if self.prediction > upper {
                self.direction = self.direction.abs() * config.ai_speed_factor;
            } else if self.prediction < lower {
                self.direction = -self.direction.abs() * config.ai_speed_factor;
            }
            self.direction
        } else {
            0.0
        }
    }

    /// Follow the ball's vertical speed, but only commit while the ball is
    /// within half a paddle of the paddle's center
    fn predictive(&mut self, paddle: &Paddle, ball: &Ball, config: &Config) -> f32 {
        let half_ball = config.ball_height / 2.0;
        let lower = (paddle.pos.y - half_ball).trunc();
        let upper = (paddle.pos.y + config.paddle_height + half_ball).trunc();
        let next_y = paddle.pos.y + ball.vel.y * config.ai_speed_factor;
        if next_y + config.paddle_height >= config.bottom_edge() || next_y <= 1.0 {
            return 0.0;
        }

        self.direction = ball.vel.y;
        let ball_center = ball.pos.y + half_ball;
        if ball_center > upper || ball_center < lower {
            self.direction *= config.ai_speed_factor;
        }

        let offset = (ball.pos.y - (paddle.pos.y + config.paddle_height / 2.0)).abs();
        if offset > config.paddle_height / 2.0 {
            0.0
        } else {
            self.direction
        }
    }
}

/// Simulate the ball forward (at most `ai_predict_depth` steps) and return
/// its center y, bouncing off floor and ceiling along the way.
pub fn predict_ball_y(pos: Vec2, vel: Vec2, config: &Config) -> f32 {
    let half_ball = config.ball_height / 2.0;
    let floor = config.bottom_edge() - half_ball;
    let stop_x = config.right_edge() - config.paddle_width;

    let mut x = pos.x;
    let mut y = pos.y + half_ball;
    let mut dy = vel.y;
    for _ in 0..config.ai_predict_depth {
        x += vel.x;
        if x > stop_x {
            break;
        }
        if y + dy > floor || y + dy < half_ball {
            dy = -dy;
        }
        y += dy;
    }
    y
}
