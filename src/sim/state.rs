//! Game state and core simulation types
//!
//! A [`Session`] owns both paddles and the ball. Everything else in `sim`
//! borrows them for the duration of one call and keeps nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::AiState;
use crate::Config;

/// Paddle slot. Player 1 is the right paddle, player 2 the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Who is driving a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pilot {
    Human(PlayerId),
    Ai,
}

impl Pilot {
    /// Decode the board's `(is_ai, name)` identity.
    ///
    /// The AI flag wins over the name. Names other than `'1'`/`'2'` are
    /// rejected.
    pub fn from_raw(is_ai: bool, name: char) -> Option<Self> {
        if is_ai {
            return Some(Pilot::Ai);
        }
        match name {
            '1' => Some(Pilot::Human(PlayerId::One)),
            '2' => Some(Pilot::Human(PlayerId::Two)),
            _ => None,
        }
    }

    /// The AI always takes player 1's end
    pub fn side(&self) -> Side {
        match self {
            Pilot::Ai | Pilot::Human(PlayerId::One) => Side::Right,
            Pilot::Human(PlayerId::Two) => Side::Left,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Pilot::Ai)
    }
}

/// A paddle. Moves vertically only; `pos` is its top-left corner.
///
/// The entity does not keep itself inside the field, callers check bounds
/// before moving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pilot: Pilot,
    pub score: u8,
    pub pos: Vec2,
}

impl Paddle {
    /// Build a paddle at its starting spot with a zero score
    pub fn create(pilot: Pilot, config: &Config) -> Self {
        let x = match pilot.side() {
            Side::Right => config.right_edge() - config.paddle_width - config.field_offset,
            Side::Left => config.field_offset,
        };
        Self {
            pilot,
            score: 0,
            pos: Vec2::new(x, config.paddle_start_y()),
        }
    }

    /// Re-create this paddle from a raw board identity.
    ///
    /// Leaves the paddle untouched when the identity is unknown.
    pub fn configure_raw(&mut self, is_ai: bool, name: char, config: &Config) {
        match Pilot::from_raw(is_ai, name) {
            Some(pilot) => *self = Self::create(pilot, config),
            None => log::warn!("Ignoring unknown paddle identity {name:?}"),
        }
    }

    #[inline]
    pub fn is_ai(&self) -> bool {
        self.pilot.is_ai()
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.pilot.side()
    }

    pub fn set_score(&mut self, score: u8) {
        self.score = score;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }
}

/// The ball. `pos` is its top-left corner.
///
/// Speed bounds live on the ball so a future power-up can change them per
/// ball. Velocity only changes through [`super::physics::set_ball_velocity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Minimum |vx|, |vy|
    pub vel_min: Vec2,
    /// Maximum |vx|, |vy|
    pub vel_max: Vec2,
}

impl Ball {
    /// Serve a fresh ball from the field center
    pub fn create(config: &Config) -> Self {
        Self {
            pos: config.ball_start(),
            vel: Vec2::new(config.ball_start_vx, config.ball_start_vy),
            vel_min: Vec2::new(config.ball_vx_min, config.ball_vy_min),
            vel_max: Vec2::new(config.ball_vx_max, config.ball_vy_max),
        }
    }

    /// Put the ball back on the serve point, velocity untouched
    pub fn recenter(&mut self, config: &Config) {
        self.pos = config.ball_start();
    }
}

/// Which match is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    HumanVsHuman,
    HumanVsAi,
}

impl GameMode {
    /// Decode the menu's mode value (1 = PvP, 2 = PvM)
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(GameMode::HumanVsHuman),
            2 => Some(GameMode::HumanVsAi),
            _ => None,
        }
    }

    fn pilots(&self) -> (Pilot, Pilot) {
        match self {
            GameMode::HumanVsHuman => (
                Pilot::Human(PlayerId::One),
                Pilot::Human(PlayerId::Two),
            ),
            GameMode::HumanVsAi => (Pilot::Ai, Pilot::Human(PlayerId::Two)),
        }
    }
}

/// Something that happened during the last tick (for sound/UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A point was awarded
    Scored(PlayerId),
    /// Ball bounced off the floor or ceiling
    WallBounce,
    /// Ball bounced off the paddle on this side
    PaddleHit(Side),
}

/// One match: two paddles, a ball and the AI's retained state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub mode: GameMode,
    pub config: Config,
    /// Right paddle (human player 1 or the AI)
    pub p1: Paddle,
    /// Left paddle (human player 2)
    pub p2: Paddle,
    pub ball: Ball,
    pub ai: AiState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Start a new match
    pub fn new(mode: GameMode, config: Config) -> Self {
        let (pilot1, pilot2) = mode.pilots();
        log::info!("New {mode:?} session");
        Self {
            mode,
            p1: Paddle::create(pilot1, &config),
            p2: Paddle::create(pilot2, &config),
            ball: Ball::create(&config),
            ai: AiState::new(&config),
            time_ticks: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Reset in place for a new match in `mode`
    pub fn restart(&mut self, mode: GameMode) {
        *self = Self::new(mode, self.config.clone());
    }

    /// Restart from the menu's raw mode value.
    ///
    /// An unknown mode configures neither paddle; only the ball is re-served.
    pub fn restart_raw(&mut self, raw_mode: u8) {
        match GameMode::from_raw(raw_mode) {
            Some(mode) => self.restart(mode),
            None => {
                log::warn!("Unknown game mode {raw_mode}, paddles left as they were");
                self.ball = Ball::create(&self.config);
                self.events.clear();
            }
        }
    }

    pub fn paddle(&self, player: PlayerId) -> &Paddle {
        match player {
            PlayerId::One => &self.p1,
            PlayerId::Two => &self.p2,
        }
    }

    pub fn paddle_mut(&mut self, player: PlayerId) -> &mut Paddle {
        match player {
            PlayerId::One => &mut self.p1,
            PlayerId::Two => &mut self.p2,
        }
    }

    pub fn score(&self, player: PlayerId) -> u8 {
        self.paddle(player).score
    }

    /// True exactly when `player` sits on the winning score
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.score(player) == self.config.win_score
    }

    /// Player 1 is checked first
    pub fn winner(&self) -> Option<PlayerId> {
        [PlayerId::One, PlayerId::Two]
            .into_iter()
            .find(|&player| self.is_winner(player))
    }

    /// Whether the match is over.
    ///
    /// Against a human either side can win. Against the AI the human's points
    /// are a survival tally and only the AI reaching the threshold ends it.
    pub fn is_game_over(&self) -> bool {
        if self.p1.is_ai() {
            self.is_winner(PlayerId::One)
        } else {
            self.winner().is_some()
        }
    }

    pub fn reset_scores(&mut self) {
        self.p1.reset_score();
        self.p2.reset_score();
    }

    /// Put an AI paddle back on its start spot and clear the AI's memory.
    ///
    /// No-op for human paddles.
    pub fn reset_ai(&mut self, player: PlayerId) {
        let config = &self.config;
        let paddle = match player {
            PlayerId::One => &mut self.p1,
            PlayerId::Two => &mut self.p2,
        };
        if !paddle.is_ai() {
            log::warn!("reset_ai on human paddle {player:?} ignored");
            return;
        }
        *paddle = Paddle::create(Pilot::Ai, config);
        self.ai.reset(config);
    }
}
