//! Steering policies for the AI drill
//!
//! A policy turns the drill position and the lane's oil pockets into one
//! axis-aligned step. The nearest-pocket heuristic is the only one shipped.

use glam::Vec2;

use super::resource::ResourceNode;
use crate::distance;

/// Decides the next step for a drill
pub trait DigPolicy {
    /// Identifier for logs
    fn name(&self) -> &'static str;

    /// Direction for the next step: exactly one axis non-zero, magnitude `speed`
    fn decide(&self, pos: Vec2, resources: &[ResourceNode], speed: f32) -> Vec2;
}

/// Head for the closest uncollected pocket, one axis at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestResource;

impl NearestResource {
    /// Closest uncollected pocket. Exact ties go to the earliest in the slice.
    pub fn target<'a>(pos: Vec2, resources: &'a [ResourceNode]) -> Option<&'a ResourceNode> {
        let mut best: Option<(&ResourceNode, f32)> = None;
        for node in resources.iter().filter(|n| !n.is_collected()) {
            let d = distance(pos, node.pos);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((node, d));
            }
        }
        best.map(|(node, _)| node)
    }
}

impl DigPolicy for NearestResource {
    fn name(&self) -> &'static str {
        "nearest-resource"
    }

    fn decide(&self, pos: Vec2, resources: &[ResourceNode], speed: f32) -> Vec2 {
        let Some(target) = Self::target(pos, resources) else {
            // Nothing left: keep drilling down
            return Vec2::new(0.0, speed);
        };

        let delta = target.pos - pos;
        // Larger offset first; equal offsets go vertical
        if delta.x.abs() > delta.y.abs() {
            Vec2::new(speed.copysign(delta.x), 0.0)
        } else if delta.y < 0.0 {
            Vec2::new(0.0, -speed)
        } else {
            Vec2::new(0.0, speed)
        }
    }
}
