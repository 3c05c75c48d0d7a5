//! Round clock and result

use serde::{Deserialize, Serialize};

use crate::consts::LOW_TIME_SECS;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Drills are live
    Running,
    /// Time is up; everything is frozen
    Ended,
}

/// Who won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    AutonomousWins,
    Draw,
}

impl Outcome {
    pub fn from_scores(human: u32, ai: u32) -> Self {
        match human.cmp(&ai) {
            std::cmp::Ordering::Greater => Outcome::HumanWins,
            std::cmp::Ordering::Less => Outcome::AutonomousWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Banner text for the result screen
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::HumanWins => "YOU WIN!",
            Outcome::AutonomousWins => "AI WINS!",
            Outcome::Draw => "DRAW",
        }
    }
}

/// Countdown timer with a one-way Running -> Ended transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    elapsed_secs: u64,
    limit_secs: u64,
    phase: RoundPhase,
}

impl RoundState {
    pub fn new(limit_secs: u64) -> Self {
        Self {
            elapsed_secs: 0,
            limit_secs,
            phase: RoundPhase::Running,
        }
    }

    /// Feed the clock. Elapsed never goes backwards; once it reaches the
    /// limit the round ends. Returns true only on the call that ends it.
    pub fn advance(&mut self, elapsed_secs: u64) -> bool {
        if self.phase == RoundPhase::Ended {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.max(elapsed_secs);
        if self.elapsed_secs >= self.limit_secs {
            self.phase = RoundPhase::Ended;
            return true;
        }
        false
    }

    #[inline]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn limit_secs(&self) -> u64 {
        self.limit_secs
    }

    pub fn time_left(&self) -> u64 {
        self.limit_secs.saturating_sub(self.elapsed_secs)
    }

    /// HUD should flag the timer
    pub fn is_low_time(&self) -> bool {
        self.time_left() <= LOW_TIME_SECS
    }
}
