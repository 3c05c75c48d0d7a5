//! Round-start configuration
//!
//! Fixed for the lifetime of a round. Optionally loaded from JSON; anything
//! that fails to parse or validate falls back to the defaults.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;
use crate::sim::LaneSide;

/// Reasons a settings value cannot be used to build a round
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    ArenaTooSmall { width: f32, height: f32 },
    NonPositive(&'static str),
    ArenaTooLarge { width: f32, height: f32 },
    NotFinite(&'static str),
    ZeroTimeLimit,
    NoResources,
    TooManyResources(usize),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ArenaTooSmall { width, height } => {
                write!(f, "arena {}x{} is too small for two lanes", width, height)
            }
            SettingsError::ArenaTooLarge { width, height } => {
                write!(f, "arena {}x{} exceeds {} pixels per side", width, height, MAX_ARENA_SIDE)
            }
            SettingsError::NonPositive(field) => write!(f, "{} must be positive", field),
            SettingsError::NotFinite(field) => write!(f, "{} must be a finite number", field),
            SettingsError::ZeroTimeLimit => write!(f, "time limit must be at least one second"),
            SettingsError::NoResources => write!(f, "resource count must be at least one"),
            SettingsError::TooManyResources(n) => {
                write!(f, "{} resources per lane exceeds {}", n, MAX_RESOURCES_PER_LANE)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSettings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Gap between the human lane's right wall and the centerline
    pub human_center_margin: f32,
    /// Gap between the AI lane and its walls (centerline, right, bottom)
    pub ai_edge_margin: f32,

    // === Drills ===
    /// Pixels per step
    pub speed: f32,
    pub reveal_radius: f32,
    pub pickup_radius: f32,

    // === Resources ===
    pub resources_per_lane: usize,
    pub resource_value: u32,
    pub resource_draw_radius: f32,

    // === Clock ===
    pub time_limit_secs: u64,
    pub target_fps: u32,

    /// Seed for resource placement
    pub seed: u64,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            human_center_margin: HUMAN_CENTER_MARGIN,
            ai_edge_margin: AI_EDGE_MARGIN,

            speed: DRILL_SPEED,
            reveal_radius: REVEAL_RADIUS,
            pickup_radius: PICKUP_RADIUS,

            resources_per_lane: RESOURCES_PER_LANE,
            resource_value: RESOURCE_VALUE,
            resource_draw_radius: RESOURCE_DRAW_RADIUS,

            time_limit_secs: TIME_LIMIT_SECS,
            target_fps: TARGET_FPS,

            seed: 0,
        }
    }
}

impl RoundSettings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check that a round can be built from these settings
    pub fn validate(&self) -> Result<(), SettingsError> {
        let floats = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("human_center_margin", self.human_center_margin),
            ("ai_edge_margin", self.ai_edge_margin),
            ("speed", self.speed),
            ("reveal_radius", self.reveal_radius),
            ("pickup_radius", self.pickup_radius),
            ("resource_draw_radius", self.resource_draw_radius),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite(field));
            }
        }
        // Reveal masks hold one byte per pixel
        if self.arena_width > MAX_ARENA_SIDE || self.arena_height > MAX_ARENA_SIDE {
            return Err(SettingsError::ArenaTooLarge {
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        let positive = [
            ("speed", self.speed),
            ("reveal_radius", self.reveal_radius),
            ("pickup_radius", self.pickup_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive(field));
            }
        }
        if self.target_fps == 0 {
            return Err(SettingsError::NonPositive("target_fps"));
        }

        // Both lanes and the shale spawn band must have room left after margins
        let half = self.arena_width / 2.0;
        let spawn_band = self.spawn_band(LaneSide::Human);
        if !(half > self.human_center_margin.max(0.0) + 2.0 * self.ai_edge_margin.max(0.0))
            || !(self.arena_height > self.ai_edge_margin.max(0.0))
            || spawn_band.width() < 0.0
            || spawn_band.height() < 0.0
        {
            return Err(SettingsError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.human_center_margin < 0.0 || self.ai_edge_margin < 0.0 {
            return Err(SettingsError::NonPositive("margins"));
        }

        if self.time_limit_secs == 0 {
            return Err(SettingsError::ZeroTimeLimit);
        }
        if self.resources_per_lane == 0 {
            return Err(SettingsError::NoResources);
        }
        if self.resources_per_lane > MAX_RESOURCES_PER_LANE {
            return Err(SettingsError::TooManyResources(self.resources_per_lane));
        }
        Ok(())
    }

    /// These settings if valid, otherwise the defaults (with the same seed)
    pub fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Rejecting settings ({}), using defaults", e);
                Self::with_seed(self.seed)
            }
        }
    }

    /// Left edge of a lane in arena coordinates
    pub fn lane_offset(&self, side: LaneSide) -> f32 {
        match side {
            LaneSide::Human => 0.0,
            LaneSide::Autonomous => self.arena_width / 2.0,
        }
    }

    /// Movement bounds for a lane's drill
    pub fn lane_bounds(&self, side: LaneSide) -> Bounds {
        let half = self.arena_width / 2.0;
        match side {
            LaneSide::Human => Bounds::new(
                Vec2::ZERO,
                Vec2::new(half - self.human_center_margin, self.arena_height),
            ),
            LaneSide::Autonomous => Bounds::new(
                Vec2::new(half + self.ai_edge_margin, 0.0),
                Vec2::new(
                    self.arena_width - self.ai_edge_margin,
                    self.arena_height - self.ai_edge_margin,
                ),
            ),
        }
    }

    /// Drill start position (lane center, just below the surface)
    pub fn start_position(&self, side: LaneSide) -> Vec2 {
        let x = self.lane_offset(side) + self.arena_width / 4.0;
        self.lane_bounds(side).clamp(Vec2::new(x, START_DEPTH))
    }

    /// Region oil pockets spawn in: the shale band of the lane, inset from walls
    pub fn spawn_band(&self, side: LaneSide) -> Bounds {
        let offset = self.lane_offset(side);
        let half = self.arena_width / 2.0;
        Bounds::new(
            Vec2::new(
                offset + SPAWN_SIDE_INSET,
                (self.arena_height * BEDROCK_BASE).round() + 20.0,
            ),
            Vec2::new(offset + half - SPAWN_SIDE_INSET, self.arena_height - 30.0),
        )
    }

    /// Simulation steps per round at the target rate
    pub fn frames_per_round(&self) -> u64 {
        self.time_limit_secs * self.target_fps as u64
    }
}
