//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, clock supplied by the caller
//! - Seeded RNG only (resource placement)
//! - Stable iteration order (human lane, then AI lane; resources by id)
//! - No rendering, input, or platform dependencies

pub mod agent;
pub mod mask;
pub mod policy;
pub mod resource;
pub mod round;
pub mod state;
pub mod tick;

pub use agent::{Digger, LaneSide};
pub use mask::RevealMask;
pub use policy::{DigPolicy, NearestResource};
pub use resource::{ResourceNode, spawn_resources};
pub use round::{Outcome, RoundPhase, RoundState};
pub use state::{GameEvent, Lane, RoundContext, Stratum};
pub use tick::{TickInput, collect_resources, tick};
