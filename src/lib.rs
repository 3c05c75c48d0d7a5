//! Petrol Digger - a two-lane drilling race
//!
//! A human-controlled drill and a rule-based AI drill each bore through
//! layered terrain on their own half of the arena, collecting oil pockets
//! before the clock runs out.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, reveal masks, collection, round clock)
//! - `settings`: Round-start configuration
//! - `summary`: End-of-round report for result screens

pub mod settings;
pub mod sim;
pub mod summary;

pub use settings::{RoundSettings, SettingsError};
pub use summary::RoundSummary;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (both lanes together)
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Largest accepted arena side (reveal masks are one byte per pixel)
    pub const MAX_ARENA_SIDE: f32 = 8192.0;
    /// Largest accepted resource batch per lane
    pub const MAX_RESOURCES_PER_LANE: usize = 10_000;

    /// Target simulation rate (steps per second)
    pub const TARGET_FPS: u32 = 60;

    /// Drill speed in pixels per step, shared by both agents
    pub const DRILL_SPEED: f32 = 5.0;
    /// Round length in whole seconds
    pub const TIME_LIMIT_SECS: u64 = 90;
    /// Remaining time at or below which the HUD should warn
    pub const LOW_TIME_SECS: u64 = 10;

    /// Radius punched out of the reveal mask around the drill head
    pub const REVEAL_RADIUS: f32 = 45.0;
    /// Collection happens strictly below this distance
    pub const PICKUP_RADIUS: f32 = 30.0;
    /// Drawn radius of an oil pocket (visual only)
    pub const RESOURCE_DRAW_RADIUS: f32 = 7.0;
    /// Oil pockets spawned per lane
    pub const RESOURCES_PER_LANE: usize = 25;
    /// Score awarded per oil pocket
    pub const RESOURCE_VALUE: u32 = 10;

    /// Gap kept between the human drill and the centerline
    pub const HUMAN_CENTER_MARGIN: f32 = 5.0;
    /// Gap kept between the AI drill and its lane edges
    pub const AI_EDGE_MARGIN: f32 = 10.0;
    /// Spawn inset from the lane's side walls
    pub const SPAWN_SIDE_INSET: f32 = 30.0;

    /// Depth at which both drills start
    pub const START_DEPTH: f32 = 50.0;

    /// Fraction of arena height where sandstone ends
    pub const SANDSTONE_BASE: f32 = 0.3;
    /// Fraction of arena height where bedrock ends and shale begins
    pub const BEDROCK_BASE: f32 = 0.7;
}

/// Axis-aligned rectangle, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Clamp each axis of a point independently into the rectangle
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// True when `b` lies strictly inside `radius` of `a`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp_each_axis() {
        let b = Bounds::new(Vec2::new(10.0, 0.0), Vec2::new(90.0, 50.0));
        assert_eq!(b.clamp(Vec2::new(-5.0, 20.0)), Vec2::new(10.0, 20.0));
        assert_eq!(b.clamp(Vec2::new(200.0, 80.0)), Vec2::new(90.0, 50.0));
        assert_eq!(b.clamp(Vec2::new(40.0, 25.0)), Vec2::new(40.0, 25.0));
    }

    #[test]
    fn test_bounds_contains_edges() {
        let b = Bounds::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(b.contains(Vec2::ZERO));
        assert!(b.contains(Vec2::new(10.0, 10.0)));
        assert!(!b.contains(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_within_radius_is_strict() {
        let a = Vec2::new(100.0, 100.0);
        assert!(!within_radius(a, Vec2::new(130.0, 100.0), 30.0));
        assert!(within_radius(a, Vec2::new(129.99, 100.0), 30.0));
    }
}
