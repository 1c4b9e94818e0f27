//! Game session controller
//!
//! Owns the lifecycle state machine, the simulation state, the settings,
//! and the input state — the single writer for all of them. Each frame it
//! runs one simulation step and reacts to the emitted events; external
//! surfaces (DOM overlays, audio) only read state and issue commands.

use crate::input::InputState;
use crate::settings::GameSettings;
use crate::sim::{self, Frame, GameState, SessionState, Side, SoundCue, StepEvent, StepTiming};

/// Lifecycle commands issued by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Menu -> Playing
    Start,
    /// Menu -> Demo
    StartDemo,
    /// Playing -> Paused
    Pause,
    /// Paused -> Playing. The caller must re-base its frame clock so the
    /// next step does not see the whole pause as elapsed time.
    Resume,
    /// Playing/Paused -> Menu
    Quit,
    /// GameOver -> Playing
    Retry,
    /// GameOver -> Menu
    Exit,
}

/// One game session: FSM + simulation + settings + input
pub struct Session {
    state: SessionState,
    winner: Option<Side>,
    pub settings: GameSettings,
    pub sim: GameState,
    pub input: InputState,
}

impl Session {
    pub fn new(mut settings: GameSettings, seed: u64) -> Self {
        settings.sanitize();
        let frame = Frame::new(settings.orientation);
        let sim = GameState::new(seed, &frame);
        let input = InputState::centered(&frame);
        log::info!("session created (seed {seed})");
        Self {
            state: SessionState::Menu,
            winner: None,
            settings,
            sim,
            input,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Winner identity, set when a score reaches the winning threshold
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.sim.player.score, self.sim.ai.score)
    }

    /// Axis frame for the current orientation
    pub fn frame_geom(&self) -> Frame {
        Frame::new(self.settings.orientation)
    }

    /// Apply a lifecycle command. Commands invalid for the current state
    /// are ignored.
    pub fn apply(&mut self, command: Command, now_ms: f64) {
        match (self.state, command) {
            (SessionState::Menu, Command::Start) | (SessionState::GameOver, Command::Retry) => {
                self.begin_match();
            }
            (SessionState::Menu, Command::StartDemo) => {
                self.reset_field();
                self.sim.last_style_switch_ms = now_ms;
                self.state = SessionState::Demo;
                log::info!("demo mode started");
            }
            (SessionState::Playing, Command::Pause) => {
                self.state = SessionState::Paused;
            }
            (SessionState::Paused, Command::Resume) => {
                self.state = SessionState::Playing;
            }
            (SessionState::Playing | SessionState::Paused, Command::Quit)
            | (SessionState::GameOver, Command::Exit) => {
                self.to_menu();
            }
            _ => {}
        }
    }

    /// Demo exits on any key or pointer press (movement alone does not).
    /// Returns true if the press was consumed to leave Demo.
    pub fn notice_press(&mut self) -> bool {
        if self.state == SessionState::Demo {
            self.to_menu();
            true
        } else {
            false
        }
    }

    /// Run one frame of simulation and return the audio cues to play.
    pub fn frame(&mut self, elapsed_ms: f64, now_ms: f64) -> Vec<SoundCue> {
        let timing = StepTiming {
            time_scale: crate::time_scale(elapsed_ms),
            now_ms,
        };
        let events = sim::step(&mut self.sim, &mut self.input, self.state, &self.settings, &timing);

        let mut cues = Vec::new();
        for event in events {
            match event {
                StepEvent::Cue(cue) => {
                    if self.settings.sound_enabled {
                        cues.push(cue);
                    }
                }
                StepEvent::PointScored { .. } => {
                    // Scores live on the paddles; the HUD reads them there
                }
                StepEvent::WinReached { winner } => {
                    self.state = SessionState::GameOver;
                    self.winner = Some(winner);
                    log::info!("game over, {} wins", winner.as_str());
                }
                StepEvent::StyleShuffle(shuffle) => {
                    // Applied without the field reset a user-driven theme
                    // change gets: shuffles land mid-rally and must not
                    // recenter the ball or paddles.
                    log::debug!("demo style shuffle: {}", shuffle.theme.as_str());
                    self.settings.theme = shuffle.theme;
                    self.settings.crt_effect = shuffle.crt_effect;
                    self.settings.fuzzy_background = shuffle.fuzzy_background;
                }
            }
        }
        cues
    }

    /// Replace the settings (from the external configuration surface).
    /// Orientation and theme changes re-derive field geometry.
    pub fn update_settings(&mut self, mut settings: GameSettings) {
        settings.sanitize();
        let geometry_changed = settings.orientation != self.settings.orientation
            || settings.theme != self.settings.theme;
        self.settings = settings;
        if geometry_changed {
            self.reset_field();
        }
    }

    fn begin_match(&mut self) {
        self.sim.reset_scores();
        self.reset_field();
        self.winner = None;
        self.state = SessionState::Playing;
        log::info!(
            "match started (to {}, {})",
            self.settings.winning_score,
            self.settings.difficulty.as_str()
        );
    }

    fn to_menu(&mut self) {
        self.input.clear_keys();
        self.reset_field();
        self.state = SessionState::Menu;
    }

    /// Recompute paddle/ball geometry for the current orientation and
    /// launch the ball toward the AI side.
    fn reset_field(&mut self) {
        let frame = self.frame_geom();
        self.sim.reset_paddles(&frame);
        self.sim.reset_ball(&frame, Side::Ai);
        self.input.rebase(frame.along_extent() / 2.0);
    }
}
