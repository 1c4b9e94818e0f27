//! Orientation-aware coordinate frame
//!
//! Movement, collision, and scoring logic is written once against two
//! abstract axes instead of twice against concrete x/y:
//! - the *along* axis is the one a paddle slides along to intercept the
//!   ball (vertical in landscape, horizontal in portrait). Wall bounces
//!   reflect the along component.
//! - the *cross* axis runs between the two goals; a paddle's face is
//!   approached along it.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Orientation;

/// Which side of the net an actor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "PLAYER",
            Side::Ai => "AI",
        }
    }
}

/// One of the two goal ends of the cross axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalEnd {
    /// cross = 0 (left in landscape, top in portrait)
    Near,
    /// cross = cross_extent (right in landscape, bottom in portrait)
    Far,
}

impl GoalEnd {
    /// Sign of the cross direction pointing from this end into the field
    #[inline]
    pub fn inward_sign(&self) -> f32 {
        match self {
            GoalEnd::Near => 1.0,
            GoalEnd::Far => -1.0,
        }
    }
}

/// Axis projections for the current orientation, computed once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    orientation: Orientation,
}

impl Frame {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical canvas width (portrait transposes the base field)
    pub fn width(&self) -> f32 {
        if self.orientation.is_portrait() { BASE_HEIGHT } else { BASE_WIDTH }
    }

    /// Logical canvas height
    pub fn height(&self) -> f32 {
        if self.orientation.is_portrait() { BASE_WIDTH } else { BASE_HEIGHT }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Component on the paddle-movement axis
    #[inline]
    pub fn along(&self, v: Vec2) -> f32 {
        if self.orientation.is_portrait() { v.x } else { v.y }
    }

    /// Component on the goal axis
    #[inline]
    pub fn cross(&self, v: Vec2) -> f32 {
        if self.orientation.is_portrait() { v.y } else { v.x }
    }

    /// Build a vector from axis components
    #[inline]
    pub fn vec(&self, along: f32, cross: f32) -> Vec2 {
        if self.orientation.is_portrait() {
            Vec2::new(along, cross)
        } else {
            Vec2::new(cross, along)
        }
    }

    /// Overwrite the along component in place
    #[inline]
    pub fn set_along(&self, v: &mut Vec2, value: f32) {
        if self.orientation.is_portrait() {
            v.x = value;
        } else {
            v.y = value;
        }
    }

    /// Overwrite the cross component in place
    #[inline]
    pub fn set_cross(&self, v: &mut Vec2, value: f32) {
        if self.orientation.is_portrait() {
            v.y = value;
        } else {
            v.x = value;
        }
    }

    /// Extent of the paddle-movement axis (bounded by the two walls)
    #[inline]
    pub fn along_extent(&self) -> f32 {
        if self.orientation.is_portrait() { self.width() } else { self.height() }
    }

    /// Extent of the goal axis
    #[inline]
    pub fn cross_extent(&self) -> f32 {
        if self.orientation.is_portrait() { self.height() } else { self.width() }
    }

    /// The goal end a side defends. Landscape puts the player left, AI
    /// right; portrait puts the player at the bottom, AI at the top.
    pub fn goal_end(&self, side: Side) -> GoalEnd {
        match (self.orientation.is_portrait(), side) {
            (false, Side::Player) | (true, Side::Ai) => GoalEnd::Near,
            (false, Side::Ai) | (true, Side::Player) => GoalEnd::Far,
        }
    }

    /// Maximum bounce angle off a paddle face for this orientation
    pub fn max_bounce_angle(&self) -> f32 {
        if self.orientation.is_portrait() {
            MAX_BOUNCE_PORTRAIT
        } else {
            MAX_BOUNCE_LANDSCAPE
        }
    }
}
