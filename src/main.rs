//! Micro Pong headless runner
//!
//! Plays a match without a display: human paddles are driven by a seeded
//! button script, AI paddles by the selected difficulty. Prints the final
//! session as JSON.
//!
//! Usage: micro-pong [OPTIONS]

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use micro_pong::sim::{AiMode, GameMode, Paddle, PaddleButtons, PlayerId, Session, TickInput};
use micro_pong::{Config, ConfigError};

/// Match type
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum Mode {
    /// Two scripted humans
    Hvh,
    /// Scripted human against the AI
    Hvai,
}

/// AI difficulty
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum Difficulty {
    Reactive,
    Tracking,
    Predictive,
}

impl From<Difficulty> for AiMode {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Reactive => AiMode::Reactive,
            Difficulty::Tracking => AiMode::Tracking,
            Difficulty::Predictive => AiMode::Predictive,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "micro-pong")]
#[command(about = "Headless Pong match runner", long_about = None)]
struct Args {
    /// Match type
    #[arg(short, long, value_enum, default_value = "hvai")]
    mode: Mode,

    /// AI difficulty
    #[arg(short, long, value_enum, default_value = "reactive")]
    ai: Difficulty,

    /// Maximum ticks to simulate
    #[arg(short, long, default_value = "20000")]
    ticks: u64,

    /// Seed for the scripted human players
    #[arg(short, long, default_value = "12345")]
    seed: u64,

    /// Chance per tick that a scripted human reacts (0.0 - 1.0)
    #[arg(long, default_value = "0.6")]
    reflex: f64,

    /// JSON config overriding the default geometry
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if !(0.0..=1.0).contains(&args.reflex) {
        return Err(ConfigError::invalid(format!(
            "reflex must be within [0, 1], got {}",
            args.reflex
        )));
    }

    let mode = match args.mode {
        Mode::Hvh => GameMode::HumanVsHuman,
        Mode::Hvai => GameMode::HumanVsAi,
    };
    let mut session = Session::new(mode, config);
    let mut rng = Pcg32::seed_from_u64(args.seed);
    let ai_mode = AiMode::from(args.ai);

    while session.time_ticks < args.ticks && !session.is_game_over() {
        let input = TickInput {
            p1: scripted_buttons(&mut rng, args.reflex, &session, PlayerId::One),
            p2: scripted_buttons(&mut rng, args.reflex, &session, PlayerId::Two),
            ai_mode,
        };
        session.tick(&input, 1.0);
    }

    match session.winner() {
        Some(player) if session.is_game_over() => log::info!(
            "{:?} wins after {} ticks ({} - {})",
            player,
            session.time_ticks,
            session.score(PlayerId::One),
            session.score(PlayerId::Two)
        ),
        _ => log::info!("No winner after {} ticks", session.time_ticks),
    }

    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

/// A human who sometimes reacts, steering the paddle center toward the ball
fn scripted_buttons(
    rng: &mut Pcg32,
    reflex: f64,
    session: &Session,
    player: PlayerId,
) -> PaddleButtons {
    let paddle: &Paddle = session.paddle(player);
    if paddle.is_ai() || !rng.random_bool(reflex) {
        return PaddleButtons::default();
    }

    let config = &session.config;
    let paddle_center = paddle.pos.y + config.paddle_height / 2.0;
    let ball_center = session.ball.pos.y + config.ball_height / 2.0;
    PaddleButtons {
        down: ball_center > paddle_center + 1.0,
        up: ball_center < paddle_center - 1.0,
    }
}
