//! Per-lane fog covering unexplored terrain
//!
//! One alpha byte per pixel over the lane, starting fully opaque. Drilling
//! punches circular holes that never close again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Alpha of untouched terrain
pub const OPAQUE: u8 = 255;
/// Alpha of revealed terrain
pub const CLEAR: u8 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealMask {
    /// Arena-space x of the mask's left column
    origin_x: f32,
    width: usize,
    height: usize,
    /// Row-major alpha values
    alpha: Vec<u8>,
    revealed: usize,
}

impl RevealMask {
    /// A fully opaque mask covering `width` x `height` pixels starting at `origin_x`
    pub fn new(origin_x: f32, width: usize, height: usize) -> Self {
        Self {
            origin_x,
            width,
            height,
            alpha: vec![OPAQUE; width * height],
            revealed: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    /// Raw alpha rows for overlay upload
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Clear every pixel whose center lies within `radius` of `center` (arena space)
    pub fn reveal(&mut self, center: Vec2, radius: f32) {
        // Buffer size mismatch means a corrupt save; leave it untouched
        if self.width.checked_mul(self.height) != Some(self.alpha.len()) || !(radius > 0.0) {
            return;
        }
        let local = Vec2::new(center.x - self.origin_x, center.y);
        let r2 = radius * radius;

        let x0 = (local.x - radius).floor().max(0.0) as usize;
        let y0 = (local.y - radius).floor().max(0.0) as usize;
        let x1 = ((local.x + radius).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((local.y + radius).ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            let dy = y as f32 + 0.5 - local.y;
            let row = y * self.width;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - local.x;
                if dx * dx + dy * dy <= r2 {
                    let px = &mut self.alpha[row + x];
                    if *px != CLEAR {
                        *px = CLEAR;
                        self.revealed += 1;
                    }
                }
            }
        }
    }

    /// Alpha at an arena-space point (opaque outside the mask)
    pub fn alpha_at(&self, p: Vec2) -> u8 {
        let x = p.x - self.origin_x;
        if x < 0.0 || p.y < 0.0 {
            return OPAQUE;
        }
        let (x, y) = (x as usize, p.y as usize);
        if x >= self.width || y >= self.height {
            return OPAQUE;
        }
        self.alpha.get(y * self.width + x).copied().unwrap_or(OPAQUE)
    }

    #[inline]
    pub fn is_revealed(&self, p: Vec2) -> bool {
        self.alpha_at(p) == CLEAR
    }

    /// Number of cleared pixels
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Cleared share of the lane, 0-1
    pub fn revealed_fraction(&self) -> f32 {
        let total = self.width * self.height;
        if total == 0 {
            0.0
        } else {
            self.revealed as f32 / total as f32
        }
    }
}
