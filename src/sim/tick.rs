//! Per-frame simulation tick
//!
//! The host's animation-frame callback drives one synchronous tick at a
//! time; a tick always runs to completion. Cooldowns and terminal delays
//! compare against `now_ms`, the host clock passed in explicitly so
//! tests can simulate time.
//!
//! Fixed phase order: camera recenter, grounded recomputation, pickups,
//! enemies, boss, projectile advance + cull + player combat, player
//! update, exit check, terminal deadlines.

use glam::Vec2;

use super::combat::{advance_projectiles, drain_hits};
use super::platform::highest_ground;
use super::world::{GameEvent, Owner, Phase, World};
use crate::consts::{DEATH_DELAY_MS, EXIT_ZONE, WIN_DELAY_MS};

/// Held input state for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
    /// Aim point in world coordinates
    pub aim: Vec2,
}

/// Advance the world by one frame
///
/// Returns the events this tick produced, in occurrence order. Once the
/// world has ended, ticks are no-ops.
pub fn tick(world: &mut World, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    match world.phase {
        Phase::Ended => return Vec::new(),
        Phase::Won { deadline_ms, boss } => {
            // World is frozen; only the end-screen deadline advances
            if now_ms >= deadline_ms {
                world.phase = Phase::Ended;
                return vec![if boss {
                    GameEvent::BossDefeated
                } else {
                    GameEvent::ExitReached
                }];
            }
            return Vec::new();
        }
        Phase::Running | Phase::Dying { .. } => {}
    }

    let mut events = Vec::new();

    world.camera.recenter(world.player.pos.x, world.width);

    // Grounded recomputation: snap onto the highest surface hit, if any
    match highest_ground(
        &world.platforms,
        world.player.pos,
        world.player.size,
        world.player.vel.y,
    ) {
        Some(surface) => {
            world.player.pos.y = surface - world.player.size.y;
            world.player.grounded = true;
            world.player.vel.y = 0.0;
        }
        None => world.player.grounded = false,
    }

    for pickup in &mut world.pickups {
        if pickup.active && pickup.collides_with(&world.player) {
            pickup.active = false;
            world.player.weapon = pickup.weapon;
            events.push(GameEvent::WeaponCollected(pickup.weapon));
        }
    }

    for enemy in &mut world.enemies {
        enemy.update(&world.player, &mut world.projectiles, now_ms);
    }
    world.enemies.retain(|e| e.health > 0.0);

    if let Some(boss) = &mut world.boss {
        let was_active = boss.active;
        let prev_health = boss.health;
        boss.update(&world.player, world.width, &mut world.projectiles, now_ms);
        if boss.active && (!was_active || boss.health != prev_health) {
            events.push(GameEvent::BossHealthChanged(Some(boss.health.max(0.0))));
        }
        if boss.health <= 0.0 && !matches!(world.phase, Phase::Won { .. }) {
            // Freeze the world; the end screen follows after a short delay
            world.phase = Phase::Won {
                deadline_ms: now_ms + WIN_DELAY_MS,
                boss: true,
            };
        }
    }

    advance_projectiles(&mut world.projectiles, world.width);
    let damage = drain_hits(
        &mut world.projectiles,
        world.player.pos,
        world.player.size,
        Owner::Hostile,
    );
    if damage > 0.0 {
        world.player.health -= damage;
        if world.player.health <= 0.0 {
            world.player.health = 0.0;
            events.push(GameEvent::HealthChanged(0.0));
            // Keep simulating until the deadline so the last frames render;
            // an already-scheduled death is not rescheduled
            if matches!(world.phase, Phase::Running) {
                world.phase = Phase::Dying {
                    deadline_ms: now_ms + DEATH_DELAY_MS,
                };
            }
        } else {
            events.push(GameEvent::HealthChanged(world.player.health));
        }
    }

    world
        .player
        .update(input, world.width, &mut world.projectiles, now_ms);

    // Exit door at the far end of non-boss maps
    if world.boss.is_none()
        && matches!(world.phase, Phase::Running)
        && world.player.pos.x + world.player.size.x >= world.width - EXIT_ZONE
    {
        world.phase = Phase::Won {
            deadline_ms: now_ms + WIN_DELAY_MS,
            boss: false,
        };
    }

    if let Phase::Dying { deadline_ms } = world.phase {
        if now_ms >= deadline_ms {
            world.phase = Phase::Ended;
            events.push(GameEvent::PlayerDied);
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::world::{Boss, Enemy, EnemyKind, Phase, Pickup, Projectile, Weapon};

    /// World with no enemies over a 2000-wide ground platform
    fn test_world() -> World {
        World::new(2000.0)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_airborne_player_accumulates_gravity() {
        let mut world = test_world();
        world.player.pos = Vec2::new(100.0, 100.0);
        world.player.grounded = true; // stale flag, no platform beneath
        let before = world.player.vel.y;
        tick(&mut world, &idle(), 0.0);
        assert!(!world.player.grounded);
        assert!(world.player.vel.y > before);
    }

    #[test]
    fn test_player_lands_on_ground_platform() {
        let mut world = test_world();
        // Resting height on the ground line
        world.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        world.player.vel.y = 5.0;
        tick(&mut world, &idle(), 0.0);
        // Snapped to the surface with vertical velocity cancelled
        assert_eq!(world.player.vel.y, 0.0);
        assert_eq!(world.player.pos.y, GROUND_Y - PLAYER_HEIGHT);
    }

    #[test]
    fn test_held_jump_retriggers_while_grounded() {
        let mut world = test_world();
        world.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &input, 0.0);
        assert_eq!(world.player.vel.y, JUMP_FORCE + GRAVITY);
        // Land again and hold jump: the impulse re-applies
        world.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        world.player.vel.y = 0.0;
        tick(&mut world, &input, 16.0);
        assert_eq!(world.player.vel.y, JUMP_FORCE + GRAVITY);
    }

    #[test]
    fn test_shotgun_fires_three_pellets_summing_to_full_damage() {
        let mut world = test_world();
        world.player.weapon = Weapon::Shotgun;
        world.player.last_shot_ms = 0.0;
        let input = TickInput {
            fire: true,
            aim: Vec2::new(1000.0, 300.0),
            ..Default::default()
        };
        tick(&mut world, &input, 1000.0);
        assert_eq!(world.projectiles.len(), 3);
        let total: f32 = world.projectiles.iter().map(|p| p.damage).sum();
        assert!((total - 20.0).abs() < 0.001);
        // Distinct directions per pellet
        let mut angles: Vec<f32> = world
            .projectiles
            .iter()
            .map(|p| p.vel.y.atan2(p.vel.x))
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(angles[1] - angles[0] > 0.2);
        assert!(angles[2] - angles[1] > 0.2);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut world = test_world();
        let input = TickInput {
            fire: true,
            aim: Vec2::new(1000.0, 300.0),
            ..Default::default()
        };
        tick(&mut world, &input, 1000.0);
        assert_eq!(world.projectiles.len(), 1);
        // 200ms later: still inside the pistol's 300ms cooldown
        tick(&mut world, &input, 1200.0);
        assert_eq!(world.projectiles.len(), 1);
        tick(&mut world, &input, 1400.0);
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn test_enemy_removed_when_damage_equals_health() {
        let mut world = test_world();
        let mut enemy = Enemy::new(300.0, ENEMY_SPAWN_Y, EnemyKind::Melee);
        enemy.health = 30.0;
        world.enemies.push(enemy);
        // Three 10-damage hits land on the same tick
        for _ in 0..3 {
            world.projectiles.push(Projectile {
                pos: Vec2::new(305.0, ENEMY_SPAWN_Y + 10.0),
                vel: Vec2::ZERO,
                size: Vec2::new(8.0, 4.0),
                damage: 10.0,
                owner: Owner::Player,
            });
        }
        tick(&mut world, &idle(), 0.0);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_enemy_survives_partial_damage() {
        let mut world = test_world();
        world
            .enemies
            .push(Enemy::new(300.0, ENEMY_SPAWN_Y, EnemyKind::Shooter));
        world.projectiles.push(Projectile {
            pos: Vec2::new(305.0, ENEMY_SPAWN_Y + 10.0),
            vel: Vec2::ZERO,
            size: Vec2::new(8.0, 4.0),
            damage: 10.0,
            owner: Owner::Player,
        });
        tick(&mut world, &idle(), 0.0);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].health, 40.0);
        // The hit consumed the projectile
        assert!(
            world
                .projectiles
                .iter()
                .all(|p| p.owner == Owner::Hostile)
        );
    }

    #[test]
    fn test_hostile_hit_reduces_health_without_death() {
        let mut world = test_world();
        world.player.pos.x = 0.0;
        world.projectiles.push(Projectile {
            // Lands on the player after one advance step
            pos: world.player.center() - Vec2::new(12.0, 0.0),
            vel: Vec2::new(12.0, 0.0),
            size: Vec2::new(8.0, 4.0),
            damage: 5.0,
            owner: Owner::Hostile,
        });
        let events = tick(&mut world, &idle(), 0.0);
        assert_eq!(world.player.health, 95.0);
        assert!(events.contains(&GameEvent::HealthChanged(95.0)));
        assert!(matches!(world.phase, Phase::Running));
    }

    #[test]
    fn test_lethal_hit_delays_death_transition() {
        let mut world = test_world();
        world.player.health = 5.0;
        world.projectiles.push(Projectile {
            pos: world.player.center() - Vec2::new(12.0, 0.0),
            vel: Vec2::new(12.0, 0.0),
            size: Vec2::new(8.0, 4.0),
            damage: 5.0,
            owner: Owner::Hostile,
        });
        let events = tick(&mut world, &idle(), 1000.0);
        assert_eq!(world.player.health, 0.0);
        assert!(events.contains(&GameEvent::HealthChanged(0.0)));
        assert!(!events.contains(&GameEvent::PlayerDied));
        // World keeps simulating during the delay
        let events = tick(&mut world, &idle(), 1100.0);
        assert!(!events.contains(&GameEvent::PlayerDied));
        // Deadline passes
        let events = tick(&mut world, &idle(), 1000.0 + DEATH_DELAY_MS);
        assert!(events.contains(&GameEvent::PlayerDied));
        assert!(world.is_over());
        // Further ticks are no-ops
        assert!(tick(&mut world, &idle(), 2000.0).is_empty());
    }

    #[test]
    fn test_boss_activates_and_reports_health() {
        let mut world = test_world();
        world.boss = Some(Boss::new(world.width));
        world.player.pos.x = world.width - 500.0;
        let events = tick(&mut world, &idle(), 0.0);
        assert!(world.boss.as_ref().unwrap().active);
        assert!(events.contains(&GameEvent::BossHealthChanged(Some(250.0))));
    }

    #[test]
    fn test_boss_defeat_after_seventeen_hits() {
        let mut world = test_world();
        world.boss = Some(Boss::new(world.width));
        world.boss.as_mut().unwrap().active = true;
        world.player.pos.x = world.width - 400.0;

        let mut defeats = 0;
        let mut now = 0.0;
        for _ in 0..17 {
            let boss_pos = world.boss.as_ref().unwrap().pos;
            world.projectiles.push(Projectile {
                pos: boss_pos + Vec2::new(10.0, 10.0),
                vel: Vec2::ZERO,
                size: Vec2::new(8.0, 4.0),
                damage: 15.0,
                owner: Owner::Player,
            });
            now += 16.0;
            for ev in tick(&mut world, &idle(), now) {
                if ev == GameEvent::BossDefeated {
                    defeats += 1;
                }
            }
        }
        // 17 x 15 = 255 >= 250: the boss is down, world frozen
        assert!(world.boss.as_ref().unwrap().health <= 0.0);
        assert!(matches!(world.phase, Phase::Won { boss: true, .. }));
        assert_eq!(defeats, 0);

        // The defeat event fires exactly once after the freeze delay
        for ev in tick(&mut world, &idle(), now + WIN_DELAY_MS) {
            if ev == GameEvent::BossDefeated {
                defeats += 1;
            }
        }
        for ev in tick(&mut world, &idle(), now + WIN_DELAY_MS + 100.0) {
            if ev == GameEvent::BossDefeated {
                defeats += 1;
            }
        }
        assert_eq!(defeats, 1);
        assert!(world.is_over());
    }

    #[test]
    fn test_pickup_swaps_weapon_once() {
        let mut world = test_world();
        world.pickups.push(Pickup::new(
            world.player.pos.x,
            world.player.pos.y,
            Weapon::Rifle,
        ));
        let events = tick(&mut world, &idle(), 0.0);
        assert_eq!(world.player.weapon, Weapon::Rifle);
        assert!(events.contains(&GameEvent::WeaponCollected(Weapon::Rifle)));
        assert!(!world.pickups[0].active);
        // Consumed pickups stay consumed
        let events = tick(&mut world, &idle(), 16.0);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::WeaponCollected(_))));
    }

    #[test]
    fn test_exit_door_completes_non_boss_level() {
        let mut world = test_world();
        world.player.pos.x = world.width - EXIT_ZONE - PLAYER_WIDTH + 1.0;
        let events = tick(&mut world, &idle(), 0.0);
        assert!(events.is_empty());
        assert!(matches!(world.phase, Phase::Won { boss: false, .. }));
        let events = tick(&mut world, &idle(), WIN_DELAY_MS);
        assert_eq!(events, vec![GameEvent::ExitReached]);
    }

    #[test]
    fn test_exit_door_ignored_on_boss_level() {
        let mut world = test_world();
        world.boss = Some(Boss::new(world.width));
        world.player.pos.x = world.width - EXIT_ZONE - PLAYER_WIDTH + 1.0;
        tick(&mut world, &idle(), 0.0);
        assert!(!matches!(world.phase, Phase::Won { boss: false, .. }));
    }

    #[test]
    fn test_camera_clamps_to_map_bounds() {
        let mut world = test_world();
        world.player.pos.x = 0.0;
        tick(&mut world, &idle(), 0.0);
        assert_eq!(world.camera.x, 0.0);
        world.player.pos.x = world.width - PLAYER_WIDTH;
        tick(&mut world, &idle(), 16.0);
        assert_eq!(world.camera.x, world.width - VIEW_WIDTH);
    }

    #[test]
    fn test_melee_enemy_closes_distance_once_active() {
        let mut world = test_world();
        world
            .enemies
            .push(Enemy::new(900.0, ENEMY_SPAWN_Y, EnemyKind::Melee));
        world.player.pos.x = 100.0;
        // Out of activation range: dormant
        tick(&mut world, &idle(), 0.0);
        assert!(!world.enemies[0].active);
        assert_eq!(world.enemies[0].pos.x, 900.0);
        // Move into range: wakes and chases
        world.player.pos.x = 400.0;
        tick(&mut world, &idle(), 16.0);
        assert!(world.enemies[0].active);
        assert_eq!(world.enemies[0].pos.x, 900.0 - MELEE_SPEED);
        // Activation is permanent even if the player retreats
        world.player.pos.x = 0.0;
        tick(&mut world, &idle(), 32.0);
        assert!(world.enemies[0].active);
    }

    #[test]
    fn test_shooter_fires_on_cooldown() {
        let mut world = test_world();
        world
            .enemies
            .push(Enemy::new(400.0, ENEMY_SPAWN_Y, EnemyKind::Shooter));
        world.player.pos.x = 100.0;
        tick(&mut world, &idle(), 2000.0);
        let hostile = |w: &World| {
            w.projectiles
                .iter()
                .filter(|p| p.owner == Owner::Hostile)
                .count()
        };
        assert_eq!(hostile(&world), 1);
        // Inside the 1200ms interval: no new shot
        tick(&mut world, &idle(), 2500.0);
        assert_eq!(hostile(&world), 1);
        tick(&mut world, &idle(), 3300.0);
        assert_eq!(hostile(&world), 2);
    }
}
