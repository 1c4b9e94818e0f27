//! Game state and core simulation types
//!
//! The session controller owns one `GameState`; the simulation mutates it
//! each step and reports everything else (cues, scoring, style shuffles)
//! as emitted events.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::axes::{Frame, GoalEnd, Side};
use crate::consts::*;
use crate::settings::Theme;

/// Lifecycle state of a game session
///
/// Owned and transitioned by the session controller; the simulation only
/// reads it (and signals "win threshold reached" via an event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Demo,
}

impl SessionState {
    /// Whether the simulation advances in this state
    pub fn runs_physics(&self) -> bool {
        matches!(self, SessionState::Menu | SessionState::Playing | SessionState::Demo)
    }

    /// Attract states: no scoring, no audio cues, fixed AI smoothing
    pub fn is_attract(&self) -> bool {
        matches!(self, SessionState::Menu | SessionState::Demo)
    }
}

/// Fire-and-forget audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    PaddleHit,
    WallHit,
    /// Player scored
    Score,
    /// Player conceded
    Loss,
}

/// Settings-update request from the demo auto-director. The simulation
/// never writes settings itself; the session controller applies this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleShuffle {
    pub theme: Theme,
    pub crt_effect: bool,
    pub fuzzy_background: bool,
}

/// Everything a simulation step reports back to the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Cue(SoundCue),
    PointScored { scorer: Side },
    /// A score reached the configured winning score
    WinReached { winner: Side },
    StyleShuffle(StyleShuffle),
}

/// The ball
///
/// `speed` is the rally's scalar speed: it only grows on paddle hits
/// (clamped to `MAX_BALL_SPEED`) and resets with the ball.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Recent positions, oldest first, for the fading trail
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(frame: &Frame) -> Self {
        Self {
            pos: frame.center(),
            vel: Vec2::ZERO,
            speed: INITIAL_BALL_SPEED,
            radius: BALL_RADIUS,
            trail: VecDeque::new(),
        }
    }

    /// Record the pre-integration position, evicting from the front when
    /// over capacity. A zero capacity clears the trail entirely.
    pub fn record_trail(&mut self, capacity: usize) {
        if capacity == 0 {
            self.trail.clear();
            return;
        }
        self.trail.push_back(self.pos);
        while self.trail.len() > capacity {
            self.trail.pop_front();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// A paddle (player or AI)
///
/// `size` is stored in canvas space; the along-axis side is always
/// `PADDLE_LENGTH` and the cross-axis side `PADDLE_THICKNESS`.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    pub score: u32,
}

impl Paddle {
    /// Paddle length on the movement axis
    #[inline]
    pub fn length(&self, frame: &Frame) -> f32 {
        frame.along(self.size)
    }

    /// Paddle depth on the goal axis
    #[inline]
    pub fn thickness(&self, frame: &Frame) -> f32 {
        frame.cross(self.size)
    }

    /// Center of the face on the movement axis
    #[inline]
    pub fn center_along(&self, frame: &Frame) -> f32 {
        frame.along(self.pos) + self.length(frame) / 2.0
    }

    /// Cross coordinate of the face the ball bounces off
    #[inline]
    pub fn face(&self, frame: &Frame, end: GoalEnd) -> f32 {
        match end {
            GoalEnd::Near => frame.cross(self.pos) + self.thickness(frame),
            GoalEnd::Far => frame.cross(self.pos),
        }
    }

    /// Move on the along axis by `delta`, then clamp to the playfield
    pub fn slide(&mut self, frame: &Frame, delta: f32) {
        let value = frame.along(self.pos) + delta;
        self.set_along_clamped(frame, value);
    }

    /// Position the along coordinate, clamped to `[0, extent - length]`
    pub fn set_along_clamped(&mut self, frame: &Frame, value: f32) {
        let max = frame.along_extent() - self.length(frame);
        let clamped = value.clamp(0.0, max.max(0.0));
        let v = frame.vec(clamped, frame.cross(self.pos));
        self.pos = v;
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub player: Paddle,
    pub ai: Paddle,
    /// Deterministic RNG for ball resets and the demo auto-director
    pub rng: Pcg32,
    /// Wall-clock time of the last demo style shuffle
    pub last_style_switch_ms: f64,
}

impl GameState {
    pub fn new(seed: u64, frame: &Frame) -> Self {
        let mut state = Self {
            ball: Ball::new(frame),
            player: Paddle { pos: Vec2::ZERO, size: Vec2::ZERO, score: 0 },
            ai: Paddle { pos: Vec2::ZERO, size: Vec2::ZERO, score: 0 },
            rng: Pcg32::seed_from_u64(seed),
            last_style_switch_ms: 0.0,
        };
        state.reset_paddles(frame);
        state.reset_ball(frame, Side::Ai);
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    /// Recompute paddle geometry for the frame's orientation and center
    /// both paddles on the movement axis. Scores are untouched.
    pub fn reset_paddles(&mut self, frame: &Frame) {
        let size = frame.vec(PADDLE_LENGTH, PADDLE_THICKNESS);
        let along = frame.along_extent() / 2.0 - PADDLE_LENGTH / 2.0;
        for side in [Side::Player, Side::Ai] {
            let cross = match frame.goal_end(side) {
                GoalEnd::Near => PADDLE_OFFSET,
                GoalEnd::Far => frame.cross_extent() - PADDLE_OFFSET - PADDLE_THICKNESS,
            };
            let paddle = self.paddle_mut(side);
            paddle.size = size;
            paddle.pos = frame.vec(along, cross);
        }
    }

    /// Center the ball, restore base speed, clear the trail, and launch it
    /// toward `toward`'s goal with a randomized along component.
    pub fn reset_ball(&mut self, frame: &Frame, toward: Side) {
        self.ball.pos = frame.center();
        self.ball.speed = INITIAL_BALL_SPEED;
        self.ball.clear_trail();

        let cross_dir = -frame.goal_end(toward).inward_sign();
        let along_vel = (self.rng.random::<f32>() - 0.5) * self.ball.speed * 1.5;
        self.ball.vel = frame.vec(along_vel, cross_dir * self.ball.speed);
    }

    /// Reset both scores (session start / retry)
    pub fn reset_scores(&mut self) {
        self.player.score = 0;
        self.ai.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Orientation;

    #[test]
    fn test_reset_paddles_geometry() {
        let frame = Frame::new(Orientation::Landscape);
        let state = GameState::new(1, &frame);

        // Player left, AI right, both vertically centered
        assert_eq!(state.player.pos.x, PADDLE_OFFSET);
        assert_eq!(state.ai.pos.x, 800.0 - PADDLE_OFFSET - PADDLE_THICKNESS);
        assert_eq!(state.player.pos.y, 300.0 - PADDLE_LENGTH / 2.0);
        assert_eq!(state.player.size, Vec2::new(PADDLE_THICKNESS, PADDLE_LENGTH));
    }

    #[test]
    fn test_reset_paddles_portrait() {
        let frame = Frame::new(Orientation::Portrait);
        let state = GameState::new(1, &frame);

        // Player bottom, AI top, both horizontally centered
        assert_eq!(state.player.pos.y, 800.0 - PADDLE_OFFSET - PADDLE_THICKNESS);
        assert_eq!(state.ai.pos.y, PADDLE_OFFSET);
        assert_eq!(state.player.pos.x, 300.0 - PADDLE_LENGTH / 2.0);
        assert_eq!(state.player.size, Vec2::new(PADDLE_LENGTH, PADDLE_THICKNESS));
    }

    #[test]
    fn test_reset_ball_centers_and_launches() {
        let frame = Frame::new(Orientation::Landscape);
        let mut state = GameState::new(7, &frame);
        state.ball.speed = 14.0;
        state.ball.trail.push_back(Vec2::ZERO);

        state.reset_ball(&frame, Side::Ai);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.speed, INITIAL_BALL_SPEED);
        assert!(state.ball.trail.is_empty());
        // Toward the AI goal: positive x in landscape
        assert_eq!(state.ball.vel.x, INITIAL_BALL_SPEED);
        assert!(state.ball.vel.y.abs() <= INITIAL_BALL_SPEED * 0.75);
    }

    #[test]
    fn test_trail_eviction() {
        let frame = Frame::new(Orientation::Landscape);
        let mut ball = Ball::new(&frame);
        for i in 0..10 {
            ball.pos = Vec2::new(i as f32, 0.0);
            ball.record_trail(4);
        }
        assert_eq!(ball.trail.len(), 4);
        // Oldest evicted from the front
        assert_eq!(ball.trail[0], Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_trail_zero_capacity_clears() {
        let frame = Frame::new(Orientation::Landscape);
        let mut ball = Ball::new(&frame);
        ball.record_trail(4);
        assert_eq!(ball.trail.len(), 1);
        ball.record_trail(0);
        assert!(ball.trail.is_empty());
    }

    #[test]
    fn test_slide_clamps_both_orientations() {
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let frame = Frame::new(orientation);
            let mut state = GameState::new(1, &frame);
            state.player.slide(&frame, -10_000.0);
            assert_eq!(frame.along(state.player.pos), 0.0);
            state.player.slide(&frame, 10_000.0);
            assert_eq!(
                frame.along(state.player.pos),
                frame.along_extent() - PADDLE_LENGTH
            );
        }
    }
}
