//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Time arrives as explicit step timing, never sampled internally
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod axes;
pub mod collision;
pub mod state;
pub mod tick;

pub use axes::{Frame, GoalEnd, Side};
pub use collision::{goal_crossed, resolve_paddle_hit, resolve_wall_bounce};
pub use state::{Ball, GameState, Paddle, SessionState, SoundCue, StepEvent, StyleShuffle};
pub use tick::{StepTiming, step};
