//! Platform geometry and the ground-height query
//!
//! Platforms are immutable after level load and are only ever asked one
//! question: "if this box keeps falling, does it land on you this tick,
//! and at what height?" Slopes answer with a linearly interpolated
//! surface height at the player's x.

use glam::Vec2;

use crate::consts::GROUND_TOLERANCE;

/// Surface profile of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slope {
    /// Horizontal surface at `pos.y`
    #[default]
    Flat,
    /// Surface climbs left-to-right: `pos.y + size.y` at the left edge,
    /// `pos.y` at the right edge
    Rising,
    /// Surface drops left-to-right: `pos.y` at the left edge,
    /// `pos.y + size.y` at the right edge
    Falling,
}

/// A static world platform
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Top-left corner (for slopes, the top of the bounding box)
    pub pos: Vec2,
    pub size: Vec2,
    pub slope: Slope,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32, slope: Slope) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            slope,
        }
    }

    /// Surface height at horizontal position `x` (callers must check the
    /// horizontal span themselves; out-of-span x extrapolates)
    pub fn surface_at(&self, x: f32) -> f32 {
        match self.slope {
            Slope::Flat => self.pos.y,
            Slope::Rising => {
                let progress = (x - self.pos.x) / self.size.x;
                self.pos.y + self.size.y - progress * self.size.y
            }
            Slope::Falling => {
                let progress = (x - self.pos.x) / self.size.x;
                self.pos.y + progress * self.size.y
            }
        }
    }

    /// Tolerant "about to land" query
    ///
    /// Returns the surface height the falling box would rest on, or None.
    /// A hit requires horizontal overlap, the box bottom within
    /// `GROUND_TOLERANCE` above the surface, and the projected bottom
    /// (current + vertical velocity) reaching or crossing it.
    pub fn ground_y(&self, pos: Vec2, size: Vec2, vel_y: f32) -> Option<f32> {
        let bottom = pos.y + size.y;
        match self.slope {
            Slope::Flat => {
                if pos.x + size.x > self.pos.x
                    && pos.x < self.pos.x + self.size.x
                    && bottom <= self.pos.y + GROUND_TOLERANCE
                    && bottom + vel_y >= self.pos.y
                {
                    Some(self.pos.y)
                } else {
                    None
                }
            }
            Slope::Rising | Slope::Falling => {
                let left = self.pos.x;
                let right = self.pos.x + self.size.x;
                if pos.x + size.x < left || pos.x > right {
                    return None;
                }
                let surface = self.surface_at(pos.x);
                if bottom <= surface + GROUND_TOLERANCE && bottom + vel_y >= surface {
                    Some(surface)
                } else {
                    None
                }
            }
        }
    }
}

/// Query every platform and pick the physically highest surface hit
/// (minimum y, since y grows downward): stand on the highest thing
/// you're touching.
pub fn highest_ground(platforms: &[Platform], pos: Vec2, size: Vec2, vel_y: f32) -> Option<f32> {
    platforms
        .iter()
        .filter_map(|p| p.ground_y(pos, size, vel_y))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
