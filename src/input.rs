//! Input adapter
//!
//! Normalizes pointer/touch/keyboard input into a single target position on
//! the paddle-movement axis plus a discrete directional key set. Device
//! pixel coordinates are mapped into logical playfield space through the
//! displayed-canvas bounding rectangle.

use crate::sim::axes::Frame;

/// Displayed-canvas bounding rectangle, in device pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Aggregated input state for one session
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Latest pointer/touch target on the along axis, in logical pixels
    target: f32,
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl InputState {
    /// Start with the target centered on the movement axis
    pub fn centered(frame: &Frame) -> Self {
        Self {
            target: frame.along_extent() / 2.0,
            ..Default::default()
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Re-base the pointer target (paddle resets, key movement)
    pub fn rebase(&mut self, target: f32) {
        self.target = target;
    }

    /// Map a pointer/touch position into a logical along-axis target.
    /// Skipped entirely while the displayed canvas has no size.
    pub fn set_pointer(&mut self, frame: &Frame, bounds: &Bounds, client_x: f32, client_y: f32) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let extent = frame.along_extent();
        let raw = if frame.orientation().is_portrait() {
            (client_x - bounds.left) * (extent / bounds.width)
        } else {
            (client_y - bounds.top) * (extent / bounds.height)
        };
        self.target = raw.clamp(0.0, extent);
    }

    /// Track a directional key. Returns false for keys this adapter
    /// does not recognize.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowUp" | "w" | "W" => self.up = pressed,
            "ArrowDown" | "s" | "S" => self.down = pressed,
            "ArrowLeft" | "a" | "A" => self.left = pressed,
            "ArrowRight" | "d" | "D" => self.right = pressed,
            _ => return false,
        }
        true
    }

    /// Net key direction on the movement axis: -1, 0, or +1
    pub fn direction(&self, frame: &Frame) -> f32 {
        let (neg, pos) = if frame.orientation().is_portrait() {
            (self.left, self.right)
        } else {
            (self.up, self.down)
        };
        (pos as i8 - neg as i8) as f32
    }

    pub fn any_key_down(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn clear_keys(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }
}
