//! Fixed-order simulation tick
//!
//! Paddle 1 control, then paddle 2 control, then the ball. The order is part
//! of the game's behavior and must not change.

use serde::{Deserialize, Serialize};

use super::ai::{AiMode, AiState};
use super::physics::{advance, move_paddle};
use super::state::{Ball, GameEvent, Paddle, Session};
use crate::Config;

/// Button state for one human paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleButtons {
    /// Move toward the floor (+y)
    pub down: bool,
    /// Move toward the ceiling (-y)
    pub up: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Player 1 (right paddle), ignored when the AI drives it
    pub p1: PaddleButtons,
    /// Player 2 (left paddle)
    pub p2: PaddleButtons,
    /// Difficulty for AI-driven paddles
    pub ai_mode: AiMode,
}

impl TickInput {
    /// Decode raw board state.
    ///
    /// Buttons: bit 0 = BTN1 (p1 down), bit 1 = BTN2 (p1 up),
    /// bit 2 = BTN3 (p2 down), bit 3 = BTN4 (p2 up).
    pub fn from_raw(buttons: u8, switches: u8) -> Self {
        Self {
            p1: PaddleButtons {
                down: buttons & 0x1 != 0,
                up: buttons & 0x2 != 0,
            },
            p2: PaddleButtons {
                down: buttons & 0x4 != 0,
                up: buttons & 0x8 != 0,
            },
            ai_mode: AiMode::from_switches(switches),
        }
    }
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    let Session {
        config,
        p1,
        p2,
        ball,
        ai,
        time_ticks,
        events,
        ..
    } = session;

    *time_ticks += 1;
    events.clear();

    control_paddle(p1, &input.p1, input.ai_mode, ai, ball, dt, config);
    control_paddle(p2, &input.p2, input.ai_mode, ai, ball, dt, config);

    let outcome = advance(p1, p2, ball, dt, config);
    if let Some(player) = outcome.scored {
        events.push(GameEvent::Scored(player));
    }
    if outcome.wall_bounce {
        events.push(GameEvent::WallBounce);
    }
    if let Some(side) = outcome.paddle_hit {
        events.push(GameEvent::PaddleHit(side));
    }
}

/// Move one paddle from its buttons or from the AI
fn control_paddle(
    paddle: &mut Paddle,
    buttons: &PaddleButtons,
    ai_mode: AiMode,
    ai: &mut AiState,
    ball: &Ball,
    dt: f32,
    config: &Config,
) {
    if paddle.is_ai() {
        let vy = ai.velocity(ai_mode, paddle, ball, dt, config);
        move_paddle(paddle, vy, dt);
        return;
    }

    // Bounds are checked before moving, never clamped after
    if buttons.down && paddle.pos.y + config.paddle_height < config.bottom_edge() {
        move_paddle(paddle, config.paddle_speed, dt);
    }
    if buttons.up && paddle.pos.y > 1.0 {
        move_paddle(paddle, -config.paddle_speed, dt);
    }
}

impl Session {
    /// Advance one tick. See [`tick`].
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }
}
