//! Drill agents

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Bounds;

/// Which half of the arena a drill works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneSide {
    /// Left half, keyboard driven
    Human,
    /// Right half, policy driven
    Autonomous,
}

impl LaneSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaneSide::Human => "human",
            LaneSide::Autonomous => "ai",
        }
    }
}

/// A drill head with its bore path and score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digger {
    pub side: LaneSide,
    pos: Vec2,
    /// Pixels per step
    pub speed: f32,
    /// Last applied direction (zero when idle)
    pub dir: Vec2,
    /// Bore path, oldest first (starts with the spawn point)
    path: Vec<Vec2>,
    score: u32,
}

impl Digger {
    pub fn new(side: LaneSide, start: Vec2, speed: f32) -> Self {
        Self {
            side,
            pos: start,
            speed,
            dir: Vec2::ZERO,
            path: vec![start],
            score: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Step by `dir`, clamp into `bounds`, and record the new position.
    /// A zero direction is a no-op. Returns whether the drill stepped.
    pub fn step(&mut self, dir: Vec2, bounds: &Bounds) -> bool {
        self.dir = dir;
        if dir == Vec2::ZERO {
            return false;
        }
        self.pos = bounds.clamp(self.pos + dir);
        self.path.push(self.pos);
        true
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }
}
