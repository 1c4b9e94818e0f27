//! Collision detection and response
//!
//! Paddle-face bounces, wall reflections, and goal-line detection, all
//! expressed against the orientation-independent frame axes. The paddle
//! test is velocity-gated and uses a speed-scaled buffer so a fast ball
//! cannot tunnel through a face between frames.

use super::axes::{Frame, GoalEnd};
use super::state::{Ball, Paddle};
use crate::consts::*;

/// Check the ball against one paddle face and resolve the bounce in place.
///
/// Only evaluated while the ball travels toward the face. On hit the impact
/// offset is normalized across the face to `[-1, 1]` and mapped to a bounce
/// angle (±60° landscape, ±45° portrait), the rally speed is incremented up
/// to `MAX_BALL_SPEED`, velocity is recomputed from the new angle, and the
/// ball is repositioned just outside the face so the hit cannot re-trigger.
pub fn resolve_paddle_hit(
    ball: &mut Ball,
    paddle: &Paddle,
    end: GoalEnd,
    frame: &Frame,
    time_scale: f32,
    speed_mult: f32,
) -> bool {
    let inward = end.inward_sign();

    // Moving toward the face means traveling against the inward direction
    if frame.cross(ball.vel) * inward >= 0.0 {
        return false;
    }

    let along = frame.along(ball.pos);
    let lo = frame.along(paddle.pos) - FACE_MARGIN;
    let hi = frame.along(paddle.pos) + paddle.length(frame) + FACE_MARGIN;
    if along < lo || along > hi {
        return false;
    }

    // Signed distance from the ball's leading edge to the face: zero at
    // contact, negative once overlapping. The buffer scales with the
    // distance covered this frame.
    let face = paddle.face(frame, end);
    let ball_cross = frame.cross(ball.pos);
    let dist = match end {
        GoalEnd::Near => (ball_cross - ball.radius) - face,
        GoalEnd::Far => face - (ball_cross + ball.radius),
    };
    let buffer = COLLISION_BUFFER * time_scale * speed_mult;
    if dist > 0.0 || dist <= -buffer {
        return false;
    }

    let normalized = (along - paddle.center_along(frame)) / (paddle.length(frame) / 2.0);
    let angle = normalized.clamp(-1.0, 1.0) * frame.max_bounce_angle();

    if ball.speed < MAX_BALL_SPEED {
        ball.speed = (ball.speed + SPEED_INCREMENT).min(MAX_BALL_SPEED);
    }

    ball.vel = frame.vec(ball.speed * angle.sin(), inward * ball.speed * angle.cos());
    frame.set_cross(&mut ball.pos, face + inward * (ball.radius + 1.0));
    true
}

/// Reflect the ball off the two non-goal walls, clamping it just inside.
pub fn resolve_wall_bounce(ball: &mut Ball, frame: &Frame) -> bool {
    let along = frame.along(ball.pos);
    let extent = frame.along_extent();
    if along - ball.radius >= 0.0 && along + ball.radius <= extent {
        return false;
    }

    let v = frame.along(ball.vel);
    frame.set_along(&mut ball.vel, -v);
    let clamped = if along < extent / 2.0 {
        ball.radius + 1.0
    } else {
        extent - ball.radius - 1.0
    };
    frame.set_along(&mut ball.pos, clamped);
    true
}

/// The goal end the ball has fully crossed, if any. The side defending
/// that end conceded the point.
pub fn goal_crossed(ball: &Ball, frame: &Frame) -> Option<GoalEnd> {
    let cross = frame.cross(ball.pos);
    if cross < 0.0 {
        Some(GoalEnd::Near)
    } else if cross > frame.cross_extent() {
        Some(GoalEnd::Far)
    } else {
        None
    }
}
