//! Round state and core simulation types
//!
//! Everything one round owns lives in `RoundContext`; the tick mutates it and
//! renderers read it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Digger, LaneSide};
use super::mask::RevealMask;
use super::resource::{ResourceNode, spawn_resources};
use super::round::{Outcome, RoundPhase, RoundState};
use crate::consts::{BEDROCK_BASE, SANDSTONE_BASE};
use crate::{Bounds, RoundSettings};

/// Terrain layer at a given depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stratum {
    Sandstone,
    Bedrock,
    /// Oil-bearing layer
    Shale,
}

impl Stratum {
    pub fn at_depth(y: f32, arena_height: f32) -> Self {
        if y <= arena_height * SANDSTONE_BASE {
            Stratum::Sandstone
        } else if y <= arena_height * BEDROCK_BASE {
            Stratum::Bedrock
        } else {
            Stratum::Shale
        }
    }
}

/// Something the audio/render side may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ResourceCollected {
        side: LaneSide,
        resource_id: u32,
        /// Score after the pickup
        score: u32,
    },
    RoundEnded {
        outcome: Outcome,
    },
}

/// One half of the arena: a drill, its fog, and its oil
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    pub digger: Digger,
    pub mask: RevealMask,
    pub resources: Vec<ResourceNode>,
    pub bounds: Bounds,
}

impl Lane {
    pub fn side(&self) -> LaneSide {
        self.digger.side
    }

    pub fn collected_count(&self) -> usize {
        self.resources.iter().filter(|r| r.is_collected()).count()
    }

    pub fn remaining(&self) -> impl Iterator<Item = &ResourceNode> {
        self.resources.iter().filter(|r| !r.is_collected())
    }
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundContext {
    pub settings: RoundSettings,
    pub human: Lane,
    pub ai: Lane,
    pub round: RoundState,
    /// Simulation steps taken
    pub frames: u64,
}

impl RoundContext {
    /// Build a fresh round. Invalid settings are replaced by defaults.
    pub fn new(settings: RoundSettings) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(settings.seed);

        let human = Self::build_lane(&settings, LaneSide::Human, &mut rng, 1);
        let first_ai_id = 1 + settings.resources_per_lane as u32;
        let ai = Self::build_lane(&settings, LaneSide::Autonomous, &mut rng, first_ai_id);

        log::info!(
            "Round started: seed={}, {} oil pockets per lane, {}s limit",
            settings.seed,
            settings.resources_per_lane,
            settings.time_limit_secs
        );

        Self {
            round: RoundState::new(settings.time_limit_secs),
            settings,
            human,
            ai,
            frames: 0,
        }
    }

    fn build_lane(settings: &RoundSettings, side: LaneSide, rng: &mut Pcg32, first_id: u32) -> Lane {
        let bounds = settings.lane_bounds(side);
        let digger = Digger::new(side, settings.start_position(side), settings.speed);
        let mask = RevealMask::new(
            settings.lane_offset(side),
            (settings.arena_width / 2.0).ceil() as usize,
            settings.arena_height.ceil() as usize,
        );
        let resources = spawn_resources(
            rng,
            settings.spawn_band(side),
            settings.resources_per_lane,
            settings.resource_draw_radius,
            first_id,
        );
        Lane {
            digger,
            mask,
            resources,
            bounds,
        }
    }

    pub fn lane(&self, side: LaneSide) -> &Lane {
        match side {
            LaneSide::Human => &self.human,
            LaneSide::Autonomous => &self.ai,
        }
    }

    pub fn lane_mut(&mut self, side: LaneSide) -> &mut Lane {
        match side {
            LaneSide::Human => &mut self.human,
            LaneSide::Autonomous => &mut self.ai,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn is_over(&self) -> bool {
        !self.round.is_running()
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.human.digger.score(), self.ai.digger.score())
    }

    /// Who is ahead right now
    pub fn leader(&self) -> Outcome {
        let (human, ai) = self.scores();
        Outcome::from_scores(human, ai)
    }

    /// Final result, only once the round has ended
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over().then(|| self.leader())
    }

    pub fn time_left(&self) -> u64 {
        self.round.time_left()
    }

    /// Terrain layer under a lane's drill head
    pub fn stratum(&self, side: LaneSide) -> Stratum {
        Stratum::at_depth(self.lane(side).digger.pos().y, self.settings.arena_height)
    }

    /// Drill head position, for HUD/camera use
    pub fn drill_pos(&self, side: LaneSide) -> Vec2 {
        self.lane(side).digger.pos()
    }
}
