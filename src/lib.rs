//! Gunrun - a side-scrolling platform shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, world state)
//! - `levels`: Immutable level catalog and map descriptors
//! - `progress`: Persisted unlock/completion record
//! - `customization`: Persisted player appearance record
//! - `session`: Level/progress state machine driving simulation runs
//! - `render`: Canvas2D presentation (wasm only)

pub mod customization;
pub mod levels;
pub mod progress;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod session;
pub mod sim;

pub use customization::{Customization, Outfit, PlayerStyle};
pub use levels::Level;
pub use progress::Progress;
pub use session::GameSession;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Viewport dimensions (CSS pixels, matches the canvas element)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Downward acceleration per tick while airborne
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal velocity decay when no movement input is held
    pub const FRICTION: f32 = 0.85;
    /// Horizontal speed from held movement input, per tick
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Vertical impulse applied on jump (negative = up)
    pub const JUMP_FORCE: f32 = -14.0;
    /// Projectile speed per tick
    pub const BULLET_SPEED: f32 = 12.0;

    /// Player collision box and spawn point
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;

    /// Enemy collision box
    pub const ENEMY_WIDTH: f32 = 35.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    /// Distance at which a dormant enemy wakes up
    pub const ENEMY_ACTIVATION_RANGE: f32 = 600.0;
    /// Melee enemy horizontal chase speed per tick
    pub const MELEE_SPEED: f32 = 1.5;
    /// Shooter fire interval (wall-clock ms) and shot damage
    pub const SHOOTER_COOLDOWN_MS: f64 = 1200.0;
    pub const SHOOTER_DAMAGE: f32 = 5.0;

    /// Boss collision box and combat tuning
    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 100.0;
    pub const BOSS_MAX_HEALTH: f32 = 250.0;
    /// Boss wakes once the player is within this distance of the map end
    pub const BOSS_ACTIVATION_RANGE: f32 = 600.0;
    /// Boss horizontal homing speed per tick
    pub const BOSS_SPEED: f32 = 0.8;
    pub const BOSS_COOLDOWN_MS: f64 = 600.0;
    pub const BOSS_DAMAGE: f32 = 15.0;
    /// Boss shots fly faster than normal projectiles
    pub const BOSS_BULLET_SPEED_MULT: f32 = 1.2;

    /// Pickup collision box
    pub const PICKUP_SIZE: f32 = 20.0;

    /// Projectiles outside the map by this margin are culled
    pub const BULLET_CULL_MARGIN: f32 = 100.0;

    /// Landing tolerance for the ground query (units above a surface)
    pub const GROUND_TOLERANCE: f32 = 10.0;

    /// Ground platform top edge and thickness
    pub const GROUND_Y: f32 = VIEW_HEIGHT - 50.0;
    pub const GROUND_THICKNESS: f32 = 50.0;
    /// Enemy and pickup spawn heights derived from the ground line
    pub const ENEMY_SPAWN_Y: f32 = VIEW_HEIGHT - 100.0;
    pub const PICKUP_SPAWN_Y: f32 = VIEW_HEIGHT - 70.0;
    /// Boss spawn offset from the far end of the map
    pub const BOSS_SPAWN_OFFSET: f32 = 300.0;
    pub const BOSS_SPAWN_Y: f32 = VIEW_HEIGHT - 150.0;

    /// Width of the exit-door zone at the far end of non-boss maps
    pub const EXIT_ZONE: f32 = 60.0;

    /// Real-time delay between lethal hit and the run ending
    pub const DEATH_DELAY_MS: f64 = 200.0;
    /// Real-time freeze between a terminal win and the end screen
    pub const WIN_DELAY_MS: f64 = 500.0;
}

/// Axis-aligned bounding box overlap test
///
/// Boxes are (top-left position, size); the test is strict (touching
/// edges do not overlap), matching the per-tick hit detection rules.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y + a_size.y > b_pos.y
        && a_pos.y < b_pos.y + b_size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let size = Vec2::new(10.0, 10.0);
        assert!(aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(5.0, 5.0),
            size
        ));
        // Touching edges are not an overlap
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(10.0, 0.0),
            size
        ));
        assert!(!aabb_overlap(
            Vec2::new(0.0, 0.0),
            size,
            Vec2::new(20.0, 20.0),
            size
        ));
    }
}
