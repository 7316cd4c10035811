//! Combat resolution
//!
//! Strict AABB overlap tests run every simulation tick: player-owned
//! projectiles against enemies and the boss, hostile-owned projectiles
//! against the player. A hit consumes the projectile and applies its
//! damage. Out-of-bounds projectiles are routine cleanup, not an error.

use glam::Vec2;

use super::world::{Owner, Projectile};
use crate::aabb_overlap;
use crate::consts::{BULLET_CULL_MARGIN, VIEW_HEIGHT};

/// Advance every projectile by its velocity and cull those outside the
/// map bounds plus margin.
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, map_width: f32) {
    projectiles.retain_mut(|p| {
        p.pos += p.vel;
        p.pos.x >= -BULLET_CULL_MARGIN
            && p.pos.x <= map_width + BULLET_CULL_MARGIN
            && p.pos.y >= -BULLET_CULL_MARGIN
            && p.pos.y <= VIEW_HEIGHT + BULLET_CULL_MARGIN
    });
}

/// Remove every projectile with the given owner overlapping the target
/// box, returning the total damage absorbed.
pub fn drain_hits(projectiles: &mut Vec<Projectile>, pos: Vec2, size: Vec2, owner: Owner) -> f32 {
    let mut damage = 0.0;
    projectiles.retain(|p| {
        if p.owner == owner && aabb_overlap(p.pos, p.size, pos, size) {
            damage += p.damage;
            false
        } else {
            true
        }
    });
    damage
}
