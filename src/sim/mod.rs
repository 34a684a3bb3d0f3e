//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, `dt` supplied by the caller
//! - Fixed update order (paddle 1, paddle 2, ball)
//! - No rendering, input polling or platform dependencies

pub mod ai;
pub mod physics;
pub mod state;
pub mod tick;

pub use ai::{AiMode, AiState, predict_ball_y};
pub use physics::{
    StepOutcome, advance, collides, move_paddle, reflection_angle, set_ball_velocity,
};
pub use state::{Ball, GameEvent, GameMode, Paddle, Pilot, PlayerId, Session, Side};
pub use tick::{PaddleButtons, TickInput, tick};
