//! End-of-round report
//!
//! Everything a result screen needs, exportable as JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{LaneSide, Outcome, RoundContext};

/// Per-lane totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSummary {
    pub side: LaneSide,
    pub score: u32,
    pub collected: usize,
    pub total_resources: usize,
    /// Bore path, oldest first
    pub path: Vec<Vec2>,
    /// Share of the lane uncovered, 0-1
    pub revealed: f32,
}

/// Result of a finished (or aborted) round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub seed: u64,
    pub elapsed_secs: u64,
    pub frames: u64,
    /// None if the round was aborted before time ran out
    pub outcome: Option<Outcome>,
    pub human: LaneSummary,
    pub ai: LaneSummary,
}

impl RoundSummary {
    pub fn from_round(ctx: &RoundContext) -> Self {
        Self {
            seed: ctx.settings.seed,
            elapsed_secs: ctx.round.elapsed_secs(),
            frames: ctx.frames,
            outcome: ctx.outcome(),
            human: Self::lane_summary(ctx, LaneSide::Human),
            ai: Self::lane_summary(ctx, LaneSide::Autonomous),
        }
    }

    fn lane_summary(ctx: &RoundContext, side: LaneSide) -> LaneSummary {
        let lane = ctx.lane(side);
        LaneSummary {
            side,
            score: lane.digger.score(),
            collected: lane.collected_count(),
            total_resources: lane.resources.len(),
            path: lane.digger.path().to_vec(),
            revealed: lane.mask.revealed_fraction(),
        }
    }

    /// Result banner, or a note that the round never finished
    pub fn message(&self) -> &'static str {
        self.outcome.map(|o| o.message()).unwrap_or("ROUND ABORTED")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoundSettings;
    use crate::sim::{NearestResource, TickInput, tick};

    #[test]
    fn test_summary_of_aborted_round() {
        let mut ctx = RoundContext::new(RoundSettings::with_seed(8));
        for _ in 0..10 {
            tick(&mut ctx, &TickInput::default(), &NearestResource);
        }
        let summary = RoundSummary::from_round(&ctx);
        assert_eq!(summary.outcome, None);
        assert_eq!(summary.message(), "ROUND ABORTED");
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.human.path.len(), 1);
        assert_eq!(summary.ai.path.len(), 11);
        assert_eq!(summary.ai.total_resources, 25);
        assert!(summary.ai.revealed > 0.0);
        assert_eq!(summary.human.revealed, 0.0);
    }

    #[test]
    fn test_summary_of_finished_round() {
        let mut ctx = RoundContext::new(RoundSettings {
            time_limit_secs: 1,
            ..RoundSettings::with_seed(8)
        });
        let input = TickInput {
            elapsed_secs: 1,
            ..Default::default()
        };
        tick(&mut ctx, &input, &NearestResource);

        let summary = RoundSummary::from_round(&ctx);
        assert_eq!(summary.outcome, Some(Outcome::Draw));
        assert_eq!(summary.message(), "DRAW");
        assert_eq!(summary.elapsed_secs, 1);

        let json = summary.to_json().unwrap();
        let back: RoundSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcome, Some(Outcome::Draw));
        assert_eq!(back.human.score, 0);
    }
}
