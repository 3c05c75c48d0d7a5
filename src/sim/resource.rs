//! Oil pockets scattered through the shale band

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Bounds, within_radius};

/// A collectible oil pocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: u32,
    pub pos: Vec2,
    /// Drawn radius (pickup uses the round's pickup radius, not this)
    pub radius: f32,
    collected: bool,
}

impl ResourceNode {
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            collected: false,
        }
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Collect this pocket if `drill` is strictly inside `pickup_radius`.
    /// Returns true only on the step that collects it.
    pub fn try_collect(&mut self, drill: Vec2, pickup_radius: f32) -> bool {
        if self.collected || !within_radius(drill, self.pos, pickup_radius) {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Spawn `count` pockets at whole-pixel positions inside `band`
pub fn spawn_resources<R: Rng>(
    rng: &mut R,
    band: Bounds,
    count: usize,
    draw_radius: f32,
    first_id: u32,
) -> Vec<ResourceNode> {
    let (min_x, max_x) = (band.min.x.ceil() as i32, band.max.x.floor() as i32);
    let (min_y, max_y) = (band.min.y.ceil() as i32, band.max.y.floor() as i32);

    (0..count)
        .map(|i| {
            let x = rng.random_range(min_x..=max_x.max(min_x));
            let y = rng.random_range(min_y..=max_y.max(min_y));
            ResourceNode::new(first_id + i as u32, Vec2::new(x as f32, y as f32), draw_radius)
        })
        .collect()
}
