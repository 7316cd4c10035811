//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and testable:
//! - One synchronous tick per host frame, no partial-tick cancellation
//! - Wall-clock cooldowns take the clock as an explicit parameter
//! - No rendering or platform dependencies

pub mod combat;
pub mod platform;
pub mod tick;
pub mod world;

pub use combat::{advance_projectiles, drain_hits};
pub use platform::{Platform, Slope, highest_ground};
pub use tick::{TickInput, tick};
pub use world::{
    Boss, Camera, Enemy, EnemyKind, GameEvent, Owner, Phase, Pickup, Player, Projectile, Weapon,
    World,
};
