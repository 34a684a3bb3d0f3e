//! Ball physics: integration, scoring, wall bounces and paddle reflection
//!
//! Everything here works on axis-aligned pixel boxes. Positions are the
//! top-left corner of the box, y grows downward.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, PlayerId, Side};
use crate::{Config, deg_to_rad, map_range, sign};

/// What happened during one [`advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Player awarded a point this tick
    pub scored: Option<PlayerId>,
    /// Ball bounced off the floor or ceiling
    pub wall_bounce: bool,
    /// Last paddle the ball bounced off
    pub paddle_hit: Option<Side>,
}

/// Set the ball's velocity, clamping each axis into the ball's bounds.
///
/// The requested sign is kept (zero counts as positive). This is the only
/// way ball velocity should change.
pub fn set_ball_velocity(ball: &mut Ball, vx: f32, vy: f32) {
    ball.vel.x = clamp_axis(vx, ball.vel_min.x, ball.vel_max.x);
    ball.vel.y = clamp_axis(vy, ball.vel_min.y, ball.vel_max.y);
}

#[inline]
fn clamp_axis(v: f32, min: f32, max: f32) -> f32 {
    if v.abs() > max {
        max * sign(v)
    } else if v.abs() < min {
        min * sign(v)
    } else {
        v
    }
}

/// Move a paddle vertically. No bounds check; callers do that first.
#[inline]
pub fn move_paddle(paddle: &mut Paddle, vy: f32, dt: f32) {
    paddle.pos.y += vy * dt;
}

/// Outgoing angle (radians) for a ball hitting a paddle.
///
/// Hits high on the paddle map toward `180° + max`, low hits toward
/// `180° - max`, the middle returns straight along the x axis.
pub fn reflection_angle(ball_y: f32, paddle_y: f32, config: &Config) -> f32 {
    let intersection =
        (ball_y + config.ball_height / 2.0) - (paddle_y - config.paddle_height / 2.0);
    map_range(
        intersection,
        0.0,
        config.paddle_height,
        deg_to_rad(180.0 + config.max_reflect_angle),
        deg_to_rad(180.0 - config.max_reflect_angle),
    )
}

/// Whether the ball, one velocity step ahead, overlaps the paddle.
///
/// Strict on all four edges, so touching boxes don't collide.
pub fn collides(ball: &Ball, paddle: &Paddle, config: &Config) -> bool {
    let next = ball.pos + ball.vel;
    next.x < paddle.pos.x + config.paddle_width
        && next.x + config.ball_width > paddle.pos.x
        && next.y < paddle.pos.y + config.paddle_height
        && next.y + config.ball_height > paddle.pos.y
}

/// Advance the ball by one tick and resolve scoring and collisions.
///
/// `p1` is the right paddle, `p2` the left one. Crossing the left goal line
/// awards player 1, crossing the right one awards player 2.
pub fn advance(
    p1: &mut Paddle,
    p2: &mut Paddle,
    ball: &mut Ball,
    dt: f32,
    config: &Config,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    ball.pos += ball.vel * dt;

    // Scoring
    let scorer = if ball.pos.x < config.left_goal() {
        Some(PlayerId::One)
    } else if ball.pos.x > config.right_goal() {
        Some(PlayerId::Two)
    } else {
        None
    };
    if let Some(player) = scorer {
        ball.recenter(config);
        let vx = -ball.vel.x;
        set_ball_velocity(ball, vx, 0.0);
        match player {
            PlayerId::One => p1.increment_score(),
            PlayerId::Two => p2.increment_score(),
        }
        log::info!("Player {:?} scores ({} - {})", player, p1.score, p2.score);
        outcome.scored = Some(player);
    }

    // Floor and ceiling
    if ball.pos.y <= 0.0 || ball.pos.y >= config.bottom_edge() {
        let (vx, vy) = (ball.vel.x, -ball.vel.y);
        set_ball_velocity(ball, vx, vy);
        outcome.wall_bounce = true;
    }

    // Paddles, player 1 first so player 2 wins a double hit
    for paddle in [&*p1, &*p2] {
        if collides(ball, paddle, config) {
            bounce_off_paddle(ball, paddle, config);
            outcome.paddle_hit = Some(paddle.side());
        }
    }

    outcome
}

/// Reflect the ball off `paddle` and push it clear of the paddle face
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, config: &Config) {
    let angle = reflection_angle(ball.pos.y, paddle.pos.y, config);
    let vx = ball.vel_max.x * angle.cos();
    let vy = ball.vel_max.y * angle.sin();

    // cos is negative around 180°, so the right paddle sends the ball left
    match paddle.side() {
        Side::Right => {
            set_ball_velocity(ball, vx, vy);
            ball.pos.x = paddle.pos.x - config.ball_width - 1.0;
        }
        Side::Left => {
            set_ball_velocity(ball, -vx, vy);
            ball.pos.x = paddle.pos.x + config.paddle_width + 1.0;
        }
    }
    log::debug!(
        "Paddle hit on {:?} side, angle {:.1}°, vel ({:.2}, {:.2})",
        paddle.side(),
        angle.to_degrees(),
        ball.vel.x,
        ball.vel.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Pilot;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_4, PI};

    fn setup() -> (Config, Paddle, Paddle, Ball) {
        let config = Config::new();
        let p1 = Paddle::create(Pilot::Human(PlayerId::One), &config);
        let p2 = Paddle::create(Pilot::Human(PlayerId::Two), &config);
        let ball = Ball::create(&config);
        (config, p1, p2, ball)
    }

    #[test]
    fn test_set_velocity_clamps_to_max() {
        let (_, _, _, mut ball) = setup();
        set_ball_velocity(&mut ball, 10.0, 10.0);
        assert_eq!(ball.vel, Vec2::new(2.5, 1.5));

        set_ball_velocity(&mut ball, -10.0, -10.0);
        assert_eq!(ball.vel, Vec2::new(-2.5, -1.5));
    }

    #[test]
    fn test_set_velocity_lifts_to_min() {
        let (_, _, _, mut ball) = setup();
        set_ball_velocity(&mut ball, -0.2, 0.0);
        assert_eq!(ball.vel, Vec2::new(-1.0, 0.0));

        // Zero counts as positive
        set_ball_velocity(&mut ball, 0.0, 0.7);
        assert_eq!(ball.vel, Vec2::new(1.0, 0.7));
    }

    #[test]
    fn test_move_paddle_does_not_clamp() {
        let (_, mut p1, _, _) = setup();
        move_paddle(&mut p1, -4.0, 3.0);
        assert_eq!(p1.pos.y, -2.0);
    }

    #[test]
    fn test_reflection_angle_mapping() {
        let config = Config::new();
        // intersection = (ball_y + 1) - (paddle_y - 5), paddle at y = 10
        let center = reflection_angle(9.0, 10.0, &config);
        assert!((center - PI).abs() < 1e-5);

        let top = reflection_angle(4.0, 10.0, &config);
        assert!((top - (PI + FRAC_PI_4)).abs() < 1e-5);

        let bottom = reflection_angle(14.0, 10.0, &config);
        assert!((bottom - (PI - FRAC_PI_4)).abs() < 1e-5);

        // Lower intersection, larger angle
        assert!(top > center && center > bottom);
    }

    #[test]
    fn test_collides_uses_look_ahead() {
        let (config, p1, _, mut ball) = setup();
        // Box ends at 105, paddle face at 107; one step of 2.5 reaches it
        ball.pos = Vec2::new(103.0, 14.0);
        ball.vel = Vec2::new(2.5, 0.0);
        assert!(collides(&ball, &p1, &config));

        ball.vel = Vec2::new(1.0, 0.0);
        assert!(!collides(&ball, &p1, &config));
    }

    #[test]
    fn test_collides_is_strict() {
        let (config, p1, _, mut ball) = setup();
        // Ball's right edge exactly on the paddle face
        ball.pos = Vec2::new(105.0, 14.0);
        ball.vel = Vec2::new(0.0, 0.0);
        assert!(!collides(&ball, &p1, &config));

        // Ball's top exactly on the paddle's bottom
        ball.pos = Vec2::new(108.0, 20.0);
        assert!(!collides(&ball, &p1, &config));
    }

    #[test]
    fn test_left_goal_scores_player_one() {
        let (config, mut p1, mut p2, mut ball) = setup();
        ball.pos = Vec2::new(16.0, 5.0);
        ball.vel = Vec2::new(-2.0, 1.0);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        assert_eq!(outcome.scored, Some(PlayerId::One));
        assert_eq!(p1.score, 1);
        assert_eq!(p2.score, 0);
        assert_eq!(ball.pos, Vec2::new(63.0, 15.0));
        assert_eq!(ball.vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_right_goal_scores_player_two() {
        let (config, mut p1, mut p2, mut ball) = setup();
        ball.pos = Vec2::new(110.0, 25.0);
        ball.vel = Vec2::new(2.5, -0.5);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        assert_eq!(outcome.scored, Some(PlayerId::Two));
        assert_eq!(p1.score, 0);
        assert_eq!(p2.score, 1);
        assert_eq!(ball.pos, Vec2::new(63.0, 15.0));
        assert_eq!(ball.vel, Vec2::new(-2.5, 0.0));
    }

    #[test]
    fn test_wall_bounce_flips_vy_only() {
        let (config, mut p1, mut p2, mut ball) = setup();
        ball.pos = Vec2::new(60.0, 1.0);
        ball.vel = Vec2::new(-1.5, -1.2);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        assert!(outcome.wall_bounce);
        assert_eq!(ball.vel, Vec2::new(-1.5, 1.2));

        ball.pos = Vec2::new(60.0, 30.0);
        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        assert!(outcome.wall_bounce);
        assert_eq!(ball.vel, Vec2::new(-1.5, -1.2));
    }

    #[test]
    fn test_right_paddle_sends_ball_left() {
        let (config, mut p1, mut p2, mut ball) = setup();
        // After integration the ball sits at (104, 9): intersection 5, straight back
        ball.pos = Vec2::new(102.0, 9.0);
        ball.vel = Vec2::new(2.0, 0.0);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        assert_eq!(outcome.paddle_hit, Some(Side::Right));
        assert_eq!(outcome.scored, None);
        assert!((ball.vel.x + 2.5).abs() < 1e-5);
        assert!(ball.vel.y.abs() < 1e-5);
        // Pushed out in front of the paddle face
        assert_eq!(ball.pos.x, 104.0);
    }

    #[test]
    fn test_left_paddle_sends_ball_right() {
        let (config, mut p1, mut p2, mut ball) = setup();
        // After integration the ball sits at (21, 15): intersection 11
        ball.pos = Vec2::new(23.0, 15.0);
        ball.vel = Vec2::new(-2.0, 0.0);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        assert_eq!(outcome.paddle_hit, Some(Side::Left));
        assert!(ball.vel.x > 0.0);
        // 126°: sin is positive so the ball heads down the screen
        let angle = deg_to_rad(126.0);
        assert!((ball.vel.x + 2.5 * angle.cos()).abs() < 1e-4);
        assert!((ball.vel.y - 1.5 * angle.sin()).abs() < 1e-4);
        assert_eq!(ball.pos.x, 21.0);
    }

    #[test]
    fn test_double_hit_left_paddle_resolves_last() {
        let (config, mut p1, mut p2, mut ball) = setup();
        // Left paddle sits just behind the right one's push-out spot
        p1.pos.x = 60.0;
        p2.pos.x = 52.0;
        ball.pos = Vec2::new(62.0, 9.0);
        ball.vel = Vec2::new(-1.0, 0.0);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        // Right paddle sends it to x = 57 at -2.5, which lands it on the left paddle
        assert_eq!(outcome.paddle_hit, Some(Side::Left));
        assert!((ball.vel.x - 2.5).abs() < 1e-5);
        assert!(ball.vel.y.abs() < 1e-5);
        assert_eq!(ball.pos.x, 57.0);
    }

    #[test]
    fn test_second_paddle_sees_pushed_out_ball() {
        let (config, mut p1, mut p2, mut ball) = setup();
        p1.pos.x = 60.0;
        p2.pos.x = 61.0;
        ball.pos = Vec2::new(62.0, 14.0);
        ball.vel = Vec2::new(-1.0, 0.0);

        let outcome = advance(&mut p1, &mut p2, &mut ball, 1.0, &config);
        // Both paddles overlap the pre-bounce ball, but after the push-out
        // the left one is behind it
        assert_eq!(outcome.paddle_hit, Some(Side::Right));
        assert_eq!(ball.pos.x, 57.0);
        assert!((ball.vel.x + 2.5 * FRAC_PI_4.cos()).abs() < 1e-4);
        assert!((ball.vel.y - 1.5 * FRAC_PI_4.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_advance_scales_with_dt() {
        let (config, mut p1, mut p2, mut ball) = setup();
        advance(&mut p1, &mut p2, &mut ball, 0.5, &config);
        assert_eq!(ball.pos, Vec2::new(64.0, 15.0));
    }

    proptest! {
        #[test]
        fn prop_velocity_within_bounds(vx in -50.0f32..50.0, vy in -50.0f32..50.0) {
            let (_, _, _, mut ball) = setup();
            set_ball_velocity(&mut ball, vx, vy);

            prop_assert!(ball.vel.x.abs() >= ball.vel_min.x && ball.vel.x.abs() <= ball.vel_max.x);
            prop_assert!(ball.vel.y.abs() >= ball.vel_min.y && ball.vel.y.abs() <= ball.vel_max.y);
            prop_assert_eq!(sign(ball.vel.x), sign(vx));
            prop_assert_eq!(sign(ball.vel.y), sign(vy));
        }

        #[test]
        fn prop_wall_bounce_keeps_vx(y in -3.0f32..0.0, vx in 1.0f32..2.5, vy in -1.5f32..1.5) {
            let (config, mut p1, mut p2, mut ball) = setup();
            ball.pos = Vec2::new(60.0, y);
            ball.vel = Vec2::new(vx, vy);
            advance(&mut p1, &mut p2, &mut ball, 0.0, &config);
            prop_assert_eq!(ball.vel.x, vx);
            prop_assert_eq!(ball.vel.y, -vy);
        }
    }
}
