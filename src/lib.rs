//! Retro Pong - a CRT-styled single-player Pong
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring, AI)
//! - `session`: Lifecycle state machine (Menu/Playing/Paused/GameOver/Demo)
//! - `input`: Pointer/touch/keyboard normalization
//! - `render`: Canvas2D rendering (wasm)
//! - `audio`: Procedural sound cues via Web Audio (wasm)

pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use session::{Command, Session};
pub use settings::{Difficulty, GameSettings, Orientation, TextSize, Theme};

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions in landscape (portrait transposes them)
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Paddle dimensions: the long side faces the ball, the short side is depth
    pub const PADDLE_LENGTH: f32 = 80.0;
    pub const PADDLE_THICKNESS: f32 = 15.0;
    /// Distance between a paddle's back and its goal wall
    pub const PADDLE_OFFSET: f32 = 20.0;

    /// Ball defaults (pixels per 60fps frame)
    pub const BALL_RADIUS: f32 = 8.0;
    pub const INITIAL_BALL_SPEED: f32 = 7.0;
    pub const MAX_BALL_SPEED: f32 = 16.0;
    /// Speed gained on each paddle hit, up to the maximum
    pub const SPEED_INCREMENT: f32 = 0.5;

    /// Paddle motion while a directional key is held
    pub const KEYBOARD_SPEED: f32 = 9.0;
    /// Below this distance pointer-easing stops, to avoid micro-oscillation
    pub const EASE_DEAD_ZONE: f32 = 0.5;

    /// Tunneling-prevention margin, scaled by timeScale and speed multiplier
    pub const COLLISION_BUFFER: f32 = 25.0;
    /// Extra overlap allowed past the paddle ends when testing the face
    pub const FACE_MARGIN: f32 = 5.0;

    /// Maximum bounce angle off a paddle face, per orientation
    pub const MAX_BOUNCE_LANDSCAPE: f32 = std::f32::consts::FRAC_PI_3;
    pub const MAX_BOUNCE_PORTRAIT: f32 = std::f32::consts::FRAC_PI_4;

    /// AI smoothing in Menu and Demo states, regardless of difficulty
    pub const ATTRACT_AI_FACTOR: f32 = 0.15;
    /// Amplitude of the EASY difficulty periodic tracking error
    pub const EASY_ERROR_AMPLITUDE: f32 = 60.0;

    /// Trail capacity at trail_length = 1.0 (one second at 60fps)
    pub const TRAIL_FRAMES: f32 = 60.0;

    /// Demo auto-director interval between style switches
    pub const DEMO_STYLE_INTERVAL_MS: f64 = 4000.0;

    /// A frame at the 60fps baseline, for normalizing elapsed time
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Elapsed-time cap so a stalled frame never injects a huge physics jump
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Per-frame multiplier normalizing variable elapsed time to the 60fps
/// baseline, capped at ~6x a normal step.
#[inline]
pub fn time_scale(elapsed_ms: f64) -> f32 {
    (elapsed_ms.min(consts::MAX_FRAME_MS) / consts::FRAME_MS) as f32
}
