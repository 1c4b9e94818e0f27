//! Game settings and lookup tables
//!
//! Settings are produced by an external configuration surface (JSON over a
//! DOM input) and consumed read-only by the simulation and renderer. Only
//! the session controller writes them between frames.

use serde::{Deserialize, Serialize};

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Per-frame smoothing factor the AI paddle eases toward the ball with
    pub fn ai_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.08,
            Difficulty::Medium => 0.12,
            Difficulty::Hard => 0.25,
        }
    }

    /// EASY injects a periodic tracking error to stay beatable
    pub fn has_tracking_error(&self) -> bool {
        matches!(self, Difficulty::Easy)
    }
}

/// Playfield orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    /// Player left, AI right
    #[default]
    Landscape,
    /// Player bottom, AI top
    Portrait,
}

impl Orientation {
    pub fn is_portrait(&self) -> bool {
        matches!(self, Orientation::Portrait)
    }
}

/// Colors for one theme, as CSS color strings
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: &'static str,
    /// Paddles, ball, text
    pub foreground: &'static str,
    /// Secondary UI (net)
    pub accent: &'static str,
    /// Inactive/grid
    pub dim: &'static str,
}

/// Visual themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Theme {
    /// Black & white
    #[default]
    Classic,
    /// Retro terminal green
    Green,
    /// Retro terminal amber
    Amber,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Green, Theme::Amber];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Green => "Green",
            Theme::Amber => "Amber",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Classic => Palette {
                background: "#000000",
                foreground: "#FFFFFF",
                accent: "#888888",
                dim: "#333333",
            },
            Theme::Green => Palette {
                background: "#051105",
                foreground: "#33FF33",
                accent: "#117711",
                dim: "#082208",
            },
            Theme::Amber => Palette {
                background: "#110d00",
                foreground: "#FFB000",
                accent: "#996600",
                dim: "#221a00",
            },
        }
    }
}

/// UI text sizing (consumed by the DOM overlay layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::Small => "Small",
            TextSize::Medium => "Medium",
            TextSize::Large => "Large",
        }
    }
}

/// Allowed winning scores
pub const WINNING_SCORE_OPTIONS: [u32; 3] = [5, 10, 21];

/// Game settings
///
/// Immutable during a simulation step; read at step start. Field names
/// serialize camelCase to match the external configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub sound_enabled: bool,
    pub difficulty: Difficulty,
    pub winning_score: u32,
    /// 0.5 to 2.0
    pub ball_speed_multiplier: f32,
    /// 0.02 to 0.5, exponential-smoothing factor for pointer easing
    pub paddle_sensitivity: f32,
    pub orientation: Orientation,
    pub theme: Theme,
    /// Master switch for the screen-warp distortion
    pub effects_enabled: bool,
    /// Scanline overlay + phosphor glow
    pub crt_effect: bool,
    /// Static noise layer
    pub fuzzy_background: bool,
    /// Glitch variant of the warp distortion
    pub glitch_effect: bool,
    /// 0.0 (none) to 1.0 (long)
    pub trail_length: f32,
    pub text_size: TextSize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            difficulty: Difficulty::Medium,
            winning_score: 10,
            ball_speed_multiplier: 1.0,
            paddle_sensitivity: 0.14,
            orientation: Orientation::Landscape,
            theme: Theme::Classic,
            effects_enabled: true,
            crt_effect: true,
            fuzzy_background: false,
            glitch_effect: false,
            trail_length: 0.5,
            text_size: TextSize::Small,
        }
    }
}

impl GameSettings {
    /// Clamp every numeric field to its valid range and snap the winning
    /// score to the nearest allowed option.
    pub fn sanitize(&mut self) {
        self.ball_speed_multiplier = self.ball_speed_multiplier.clamp(0.5, 2.0);
        self.paddle_sensitivity = self.paddle_sensitivity.clamp(0.02, 0.5);
        self.trail_length = self.trail_length.clamp(0.0, 1.0);
        if !WINNING_SCORE_OPTIONS.contains(&self.winning_score) {
            let target = self.winning_score;
            self.winning_score = WINNING_SCORE_OPTIONS
                .into_iter()
                .min_by_key(|opt| opt.abs_diff(target))
                .unwrap_or(10);
        }
    }

    /// Parse settings from the JSON shape the configuration surface emits
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_ranges() {
        let mut s = GameSettings {
            ball_speed_multiplier: 9.0,
            paddle_sensitivity: 0.0,
            trail_length: -1.0,
            winning_score: 7,
            ..Default::default()
        };
        s.sanitize();
        assert_eq!(s.ball_speed_multiplier, 2.0);
        assert_eq!(s.paddle_sensitivity, 0.02);
        assert_eq!(s.trail_length, 0.0);
        assert_eq!(s.winning_score, 5);
    }

    #[test]
    fn test_json_round_trip_camel_case() {
        let s = GameSettings::default();
        let json = s.to_json();
        assert!(json.contains("ballSpeedMultiplier"));
        assert!(json.contains("\"MEDIUM\""));
        let back = GameSettings::from_json(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = GameSettings::from_json(r#"{"difficulty":"HARD"}"#).unwrap();
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert_eq!(s.winning_score, 10);
    }

    #[test]
    fn test_ai_factor_table() {
        assert_eq!(Difficulty::Easy.ai_factor(), 0.08);
        assert_eq!(Difficulty::Medium.ai_factor(), 0.12);
        assert_eq!(Difficulty::Hard.ai_factor(), 0.25);
    }

    #[test]
    fn test_label_tables() {
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
        assert_eq!(Theme::Green.as_str(), "Green");
        assert_eq!(TextSize::Large.as_str(), "Large");
    }
}
