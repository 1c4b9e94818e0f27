//! One simulation step
//!
//! Advances paddles and ball by a time-scaled frame, resolves collisions
//! and scoring, and drives the built-in AI. All side effects beyond the
//! game state itself (audio cues, score/win signals, demo style shuffles)
//! are emitted as events for the session controller to act on.

use rand::Rng;

use super::axes::{Frame, GoalEnd, Side};
use super::collision::{goal_crossed, resolve_paddle_hit, resolve_wall_bounce};
use super::state::{GameState, SessionState, SoundCue, StepEvent, StyleShuffle};
use crate::consts::*;
use crate::input::InputState;
use crate::settings::{GameSettings, Theme};

/// Per-step timing: the 60fps-normalized scale and wall-clock time
#[derive(Debug, Clone, Copy)]
pub struct StepTiming {
    pub time_scale: f32,
    pub now_ms: f64,
}

impl StepTiming {
    /// Timing for exactly one baseline frame at the given wall clock
    pub fn baseline(now_ms: f64) -> Self {
        Self { time_scale: 1.0, now_ms }
    }
}

/// Advance the simulation by one frame.
///
/// Runs only in Menu, Playing, and Demo; Paused and GameOver leave the
/// state untouched. Settings are read-only for the whole step.
pub fn step(
    state: &mut GameState,
    input: &mut InputState,
    session: SessionState,
    settings: &GameSettings,
    timing: &StepTiming,
) -> Vec<StepEvent> {
    let mut events = Vec::new();
    if !session.runs_physics() {
        return events;
    }

    let frame = Frame::new(settings.orientation);
    let ts = timing.time_scale;
    let speed_mult = settings.ball_speed_multiplier;

    // Demo auto-director: periodically request a new look. The request is
    // an event; settings stay single-writer in the session controller.
    if session == SessionState::Demo
        && timing.now_ms - state.last_style_switch_ms > DEMO_STYLE_INTERVAL_MS
    {
        state.last_style_switch_ms = timing.now_ms;
        let theme = Theme::ALL[state.rng.random_range(0..Theme::ALL.len())];
        events.push(StepEvent::StyleShuffle(StyleShuffle {
            theme,
            crt_effect: state.rng.random::<f32>() > 0.3,
            fuzzy_background: state.rng.random::<f32>() > 0.5,
        }));
    }

    move_player(state, input, session, settings, &frame, ts);
    move_ai(state, session, settings, &frame, ts, timing.now_ms);

    // Record the pre-update position, then integrate
    let capacity = (settings.trail_length * TRAIL_FRAMES) as usize;
    state.ball.record_trail(capacity);
    state.ball.pos += state.ball.vel * ts * speed_mult;

    let hit_player = resolve_paddle_hit(
        &mut state.ball,
        &state.player,
        frame.goal_end(Side::Player),
        &frame,
        ts,
        speed_mult,
    );
    let hit_ai = resolve_paddle_hit(
        &mut state.ball,
        &state.ai,
        frame.goal_end(Side::Ai),
        &frame,
        ts,
        speed_mult,
    );
    if (hit_player || hit_ai) && !session.is_attract() {
        events.push(StepEvent::Cue(SoundCue::PaddleHit));
    }

    if resolve_wall_bounce(&mut state.ball, &frame) && !session.is_attract() {
        events.push(StepEvent::Cue(SoundCue::WallHit));
    }

    if let Some(end) = goal_crossed(&state.ball, &frame) {
        let conceder = if frame.goal_end(Side::Player) == end {
            Side::Player
        } else {
            Side::Ai
        };
        let scorer = conceder.opponent();

        if session.is_attract() {
            // Infinite attract rally: reset only, no score
            state.reset_ball(&frame, scorer);
        } else {
            state.paddle_mut(scorer).score += 1;
            events.push(StepEvent::Cue(match scorer {
                Side::Player => SoundCue::Score,
                Side::Ai => SoundCue::Loss,
            }));
            events.push(StepEvent::PointScored { scorer });

            if state.paddle(scorer).score >= settings.winning_score {
                events.push(StepEvent::WinReached { winner: scorer });
            } else {
                state.reset_ball(&frame, conceder);
            }
        }
    }

    events
}

/// Player paddle movement: keyboard snap, pointer easing, or (in Demo)
/// the same ball-tracking the AI uses.
fn move_player(
    state: &mut GameState,
    input: &mut InputState,
    session: SessionState,
    settings: &GameSettings,
    frame: &Frame,
    ts: f32,
) {
    if session == SessionState::Demo {
        let target = frame.along(state.ball.pos);
        let delta = (target - state.player.center_along(frame)) * ATTRACT_AI_FACTOR * ts;
        state.player.slide(frame, delta);
        return;
    }

    let dir = input.direction(frame);
    if dir != 0.0 {
        state.player.slide(frame, dir * KEYBOARD_SPEED * ts);
        // Keep the pointer target where the keys put us, so releasing
        // them does not snap the paddle back
        input.rebase(state.player.center_along(frame));
    } else {
        let target = input.target() - state.player.length(frame) / 2.0;
        let current = frame.along(state.player.pos);
        if (target - current).abs() > EASE_DEAD_ZONE {
            let delta = (target - current) * settings.paddle_sensitivity * ts;
            state.player.slide(frame, delta);
        }
    }
}

/// AI paddle movement: ease the paddle center toward the ball on the
/// movement axis. EASY injects a periodic tracking error while the ball
/// is in the half far from the AI, so it stays beatable.
fn move_ai(
    state: &mut GameState,
    session: SessionState,
    settings: &GameSettings,
    frame: &Frame,
    ts: f32,
    now_ms: f64,
) {
    let factor = if session.is_attract() {
        ATTRACT_AI_FACTOR
    } else {
        settings.difficulty.ai_factor()
    } * ts;

    let mut target = frame.along(state.ball.pos);
    if !session.is_attract()
        && settings.difficulty.has_tracking_error()
        && ball_in_far_half(state, frame)
    {
        target += (now_ms / 1000.0).sin() as f32 * EASY_ERROR_AMPLITUDE;
    }

    let delta = (target - state.ai.center_along(frame)) * factor;
    state.ai.slide(frame, delta);
}

/// Whether the ball is in the half of the goal axis away from the AI
fn ball_in_far_half(state: &GameState, frame: &Frame) -> bool {
    let cross = frame.cross(state.ball.pos);
    let mid = frame.cross_extent() / 2.0;
    match frame.goal_end(Side::Ai) {
        GoalEnd::Near => cross > mid,
        GoalEnd::Far => cross < mid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Difficulty, Orientation};
    use glam::Vec2;

    fn setup(orientation: Orientation) -> (GameState, InputState, GameSettings, Frame) {
        let settings = GameSettings {
            orientation,
            ..Default::default()
        };
        let frame = Frame::new(orientation);
        let state = GameState::new(1234, &frame);
        let input = InputState::centered(&frame);
        (state, input, settings, frame)
    }

    fn run_frames(
        state: &mut GameState,
        input: &mut InputState,
        session: SessionState,
        settings: &GameSettings,
        frames: usize,
    ) -> Vec<StepEvent> {
        let mut all = Vec::new();
        for i in 0..frames {
            let timing = StepTiming::baseline(i as f64 * FRAME_MS);
            all.extend(step(state, input, session, settings, &timing));
        }
        all
    }

    #[test]
    fn test_speed_bounded_and_monotonic_within_rally() {
        let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
        let mut prev = state.ball.speed;
        for i in 0..3000 {
            let timing = StepTiming::baseline(i as f64 * FRAME_MS);
            let events = step(&mut state, &mut input, SessionState::Playing, &settings, &timing);
            assert!(state.ball.speed <= MAX_BALL_SPEED);
            let point_ended = events
                .iter()
                .any(|e| matches!(e, StepEvent::PointScored { .. }));
            if !point_ended {
                assert!(state.ball.speed >= prev, "speed decreased mid-rally");
            }
            prev = state.ball.speed;
        }
    }

    #[test]
    fn test_paddles_clamped_both_orientations() {
        for orientation in [Orientation::Landscape, Orientation::Portrait] {
            let (mut state, mut input, settings, frame) = setup(orientation);
            input.rebase(0.0);
            run_frames(&mut state, &mut input, SessionState::Playing, &settings, 300);
            input.rebase(frame.along_extent());
            run_frames(&mut state, &mut input, SessionState::Playing, &settings, 300);

            for paddle in [&state.player, &state.ai] {
                let along = frame.along(paddle.pos);
                assert!(along >= 0.0);
                assert!(along <= frame.along_extent() - paddle.length(&frame));
            }
        }
    }

    #[test]
    fn test_scoring_increments_and_resets_ball() {
        let (mut state, mut input, settings, frame) = setup(Orientation::Landscape);
        // Past the AI goal on the next step
        state.ball.pos = Vec2::new(799.0, 300.0);
        state.ball.vel = Vec2::new(7.0, 0.0);
        state.ai.pos.y = 0.0; // out of the way

        let events = step(
            &mut state,
            &mut input,
            SessionState::Playing,
            &settings,
            &StepTiming::baseline(0.0),
        );
        assert_eq!(state.player.score, 1);
        assert_eq!(state.ai.score, 0);
        assert!(events.contains(&StepEvent::PointScored { scorer: Side::Player }));
        assert!(events.contains(&StepEvent::Cue(SoundCue::Score)));
        // Ball back at center, base speed, empty trail
        assert_eq!(state.ball.pos, frame.center());
        assert_eq!(state.ball.speed, INITIAL_BALL_SPEED);
        assert!(state.ball.trail.is_empty());
        // Launched toward the conceding AI
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_win_threshold_signal_preserves_loser_score() {
        let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
        assert_eq!(settings.difficulty, Difficulty::Medium);
        let settings = GameSettings { winning_score: 5, ..settings };

        state.player.score = 4;
        state.ai.score = 2;
        state.ball.pos = Vec2::new(799.0, 300.0);
        state.ball.vel = Vec2::new(7.0, 0.0);
        state.ai.pos.y = 0.0;

        let events = step(
            &mut state,
            &mut input,
            SessionState::Playing,
            &settings,
            &StepTiming::baseline(0.0),
        );
        assert!(events.contains(&StepEvent::WinReached { winner: Side::Player }));
        assert_eq!(state.player.score, 5);
        assert_eq!(state.ai.score, 2);
    }

    #[test]
    fn test_demo_goal_resets_without_scoring() {
        let (mut state, mut input, settings, frame) = setup(Orientation::Landscape);
        state.ball.pos = Vec2::new(-1.0, 300.0);
        state.ball.vel = Vec2::new(-7.0, 0.0);

        let events = step(
            &mut state,
            &mut input,
            SessionState::Demo,
            &settings,
            &StepTiming::baseline(100.0),
        );
        assert_eq!(state.player.score, 0);
        assert_eq!(state.ai.score, 0);
        assert!(!events.iter().any(|e| matches!(e, StepEvent::PointScored { .. })));
        assert_eq!(state.ball.pos, frame.center());
    }

    #[test]
    fn test_attract_states_emit_no_cues() {
        for session in [SessionState::Menu, SessionState::Demo] {
            let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
            // Aim at a wall so a bounce definitely happens
            state.ball.pos = Vec2::new(400.0, 10.0);
            state.ball.vel = Vec2::new(0.0, -7.0);
            let events = run_frames(&mut state, &mut input, session, &settings, 5);
            assert!(!events.iter().any(|e| matches!(e, StepEvent::Cue(_))));
        }
    }

    #[test]
    fn test_paused_and_game_over_freeze_state() {
        for session in [SessionState::Paused, SessionState::GameOver] {
            let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
            let ball_before = state.ball.pos;
            let player_before = state.player.pos;
            let events = run_frames(&mut state, &mut input, session, &settings, 10);
            assert!(events.is_empty());
            assert_eq!(state.ball.pos, ball_before);
            assert_eq!(state.player.pos, player_before);
        }
    }

    #[test]
    fn test_keyboard_overrides_and_rebases_pointer() {
        let (mut state, mut input, settings, frame) = setup(Orientation::Landscape);
        input.rebase(0.0); // pointer far away
        input.set_key("ArrowDown", true);
        let before = frame.along(state.player.pos);

        step(
            &mut state,
            &mut input,
            SessionState::Playing,
            &settings,
            &StepTiming::baseline(0.0),
        );
        assert_eq!(frame.along(state.player.pos), before + KEYBOARD_SPEED);
        // Pointer target rebased so releasing keys doesn't snap back
        assert_eq!(input.target(), state.player.center_along(&frame));
    }

    #[test]
    fn test_pointer_easing_dead_zone() {
        let (mut state, mut input, settings, frame) = setup(Orientation::Landscape);
        input.rebase(state.player.center_along(&frame) + 0.3);
        let before = state.player.pos;

        step(
            &mut state,
            &mut input,
            SessionState::Playing,
            &settings,
            &StepTiming::baseline(0.0),
        );
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_ai_tracks_ball() {
        let (mut state, mut input, settings, frame) = setup(Orientation::Landscape);
        state.ball.pos = Vec2::new(600.0, 500.0);
        state.ball.vel = Vec2::ZERO;
        let before = (frame.along(state.ball.pos) - state.ai.center_along(&frame)).abs();

        run_frames(&mut state, &mut input, SessionState::Playing, &settings, 10);
        let after = (500.0 - state.ai.center_along(&frame)).abs();
        assert!(after < before);
    }

    #[test]
    fn test_easy_tracking_error_gating() {
        let (mut state, _input, settings, frame) = setup(Orientation::Landscape);
        let settings = GameSettings { difficulty: Difficulty::Easy, ..settings };
        // sin(now/1000) ~= 1 at this wall clock, so the full 60px error
        let now = 1570.8;

        // Ball in the half away from the AI: the error shifts the target
        state.ball.pos = Vec2::new(100.0, 300.0);
        move_ai(&mut state, SessionState::Playing, &settings, &frame, 1.0, now);
        let drift = state.ai.center_along(&frame) - 300.0;
        assert!(
            (drift - EASY_ERROR_AMPLITUDE * 0.08).abs() < 0.1,
            "expected error-driven drift, got {drift}"
        );

        // Ball in the AI's own half: pure easing, no error
        state.reset_paddles(&frame);
        state.ball.pos = Vec2::new(700.0, 300.0);
        move_ai(&mut state, SessionState::Playing, &settings, &frame, 1.0, now);
        assert_eq!(state.ai.center_along(&frame), 300.0);

        // Attract states never apply the error, whatever the difficulty
        for session in [SessionState::Menu, SessionState::Demo] {
            state.reset_paddles(&frame);
            state.ball.pos = Vec2::new(100.0, 300.0);
            move_ai(&mut state, session, &settings, &frame, 1.0, now);
            assert_eq!(state.ai.center_along(&frame), 300.0);
        }
    }

    #[test]
    fn test_demo_style_shuffle_interval() {
        let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
        state.ball.vel = Vec2::ZERO;

        let events = step(
            &mut state,
            &mut input,
            SessionState::Demo,
            &settings,
            &StepTiming::baseline(4500.0),
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, StepEvent::StyleShuffle(_)))
        );

        // Interval restarts: no shuffle right after
        let events = step(
            &mut state,
            &mut input,
            SessionState::Demo,
            &settings,
            &StepTiming::baseline(4600.0),
        );
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, StepEvent::StyleShuffle(_)))
        );
    }

    #[test]
    fn test_zero_trail_length_keeps_history_empty() {
        let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
        let settings = GameSettings { trail_length: 0.0, ..settings };
        run_frames(&mut state, &mut input, SessionState::Playing, &settings, 200);
        assert!(state.ball.trail.is_empty());
    }

    #[test]
    fn test_trail_capacity_follows_setting() {
        let (mut state, mut input, settings, _) = setup(Orientation::Landscape);
        let settings = GameSettings { trail_length: 0.5, ..settings };
        run_frames(&mut state, &mut input, SessionState::Playing, &settings, 200);
        assert!(state.ball.trail.len() <= 30);
        assert!(!state.ball.trail.is_empty());
    }

    #[test]
    fn test_determinism() {
        let frame = Frame::new(Orientation::Landscape);
        let settings = GameSettings::default();
        let mut a = GameState::new(777, &frame);
        let mut b = GameState::new(777, &frame);
        let mut input_a = InputState::centered(&frame);
        let mut input_b = InputState::centered(&frame);

        for i in 0..600 {
            let timing = StepTiming::baseline(i as f64 * FRAME_MS);
            let ea = step(&mut a, &mut input_a, SessionState::Playing, &settings, &timing);
            let eb = step(&mut b, &mut input_b, SessionState::Playing, &settings, &timing);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.player.score, b.player.score);
    }
}
