//! Level catalog and map descriptors
//!
//! Ten immutable levels (8 regular, bosses at 6 and 10) plus the
//! free-play gauntlet: one long randomized map with a boss at the end.
//! Enemy and pickup heights are derived from the ground line at build
//! time, not stored in the descriptors.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{Boss, Enemy, EnemyKind, Pickup, Platform, Slope, Weapon, World};

/// Visual theme of a level (presentation hint only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Lab,
    Sewer,
    Roof,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Lab => "lab",
            Theme::Sewer => "sewer",
            Theme::Roof => "roof",
        }
    }
}

/// An enemy spawn point (y derived from the ground line)
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub x: f32,
    pub kind: EnemyKind,
}

/// A weapon pickup spawn point
#[derive(Debug, Clone, Copy)]
pub struct PickupSpawn {
    pub x: f32,
    pub weapon: Weapon,
}

/// Everything needed to instantiate a `World`
#[derive(Debug, Clone)]
pub struct MapDescriptor {
    pub width: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<EnemySpawn>,
    pub pickups: Vec<PickupSpawn>,
    pub boss: bool,
}

impl MapDescriptor {
    /// Build a fresh world: full-width ground platform, then the static
    /// platform list, enemies, pickups, and the boss near the far end.
    pub fn build(&self) -> World {
        let mut world = World::new(self.width);
        world.platforms.extend(self.platforms.iter().copied());
        world.enemies.extend(
            self.enemies
                .iter()
                .map(|e| Enemy::new(e.x, ENEMY_SPAWN_Y, e.kind)),
        );
        world.pickups.extend(
            self.pickups
                .iter()
                .map(|p| Pickup::new(p.x, PICKUP_SPAWN_Y, p.weapon)),
        );
        if self.boss {
            world.boss = Some(Boss::new(self.width));
        }
        world
    }
}

/// A catalog entry
#[derive(Debug, Clone)]
pub struct Level {
    pub id: u32,
    pub name: &'static str,
    pub theme: Theme,
    pub description: &'static str,
    pub map: MapDescriptor,
}

fn plat(x: f32, y: f32, w: f32, h: f32, slope: Slope) -> Platform {
    Platform::new(x, y, w, h, slope)
}

fn melee(x: f32) -> EnemySpawn {
    EnemySpawn {
        x,
        kind: EnemyKind::Melee,
    }
}

fn shooter(x: f32) -> EnemySpawn {
    EnemySpawn {
        x,
        kind: EnemyKind::Shooter,
    }
}

fn pickup(x: f32, weapon: Weapon) -> PickupSpawn {
    PickupSpawn { x, weapon }
}

/// The fixed ten-level campaign
pub fn catalog() -> Vec<Level> {
    use Slope::{Falling, Flat, Rising};
    vec![
        Level {
            id: 1,
            name: "Lab Escape",
            theme: Theme::Lab,
            description: "Escape the ruined lab. Avoid patrols.",
            map: MapDescriptor {
                width: 2000.0,
                platforms: vec![
                    plat(300.0, 450.0, 120.0, 20.0, Flat),
                    plat(600.0, 400.0, 100.0, 20.0, Rising),
                    plat(900.0, 420.0, 120.0, 20.0, Falling),
                    plat(1200.0, 300.0, 100.0, 20.0, Flat),
                    plat(1500.0, 380.0, 150.0, 20.0, Falling),
                ],
                enemies: vec![melee(400.0), shooter(800.0), melee(1100.0)],
                pickups: vec![pickup(700.0, Weapon::Shotgun)],
                boss: false,
            },
        },
        Level {
            id: 2,
            name: "Sewer Crawl",
            theme: Theme::Sewer,
            description: "Navigate toxic tunnels. Jump carefully.",
            map: MapDescriptor {
                width: 2500.0,
                platforms: vec![
                    plat(200.0, 500.0, 100.0, 20.0, Flat),
                    plat(500.0, 450.0, 80.0, 20.0, Rising),
                    plat(800.0, 480.0, 120.0, 20.0, Falling),
                    plat(1100.0, 400.0, 100.0, 20.0, Flat),
                    plat(1400.0, 430.0, 150.0, 20.0, Rising),
                    plat(1800.0, 380.0, 120.0, 20.0, Falling),
                ],
                enemies: vec![melee(300.0), shooter(600.0), melee(900.0), shooter(1200.0)],
                pickups: vec![pickup(1000.0, Weapon::Rifle)],
                boss: false,
            },
        },
        Level {
            id: 3,
            name: "Rooftop Chase",
            theme: Theme::Roof,
            description: "Dash across skyscrapers. Wind affects bullets.",
            map: MapDescriptor {
                width: 3000.0,
                platforms: vec![
                    plat(400.0, 400.0, 120.0, 20.0, Flat),
                    plat(800.0, 350.0, 100.0, 20.0, Rising),
                    plat(1200.0, 420.0, 120.0, 20.0, Falling),
                    plat(1600.0, 300.0, 100.0, 20.0, Flat),
                    plat(2000.0, 380.0, 150.0, 20.0, Rising),
                    plat(2400.0, 320.0, 120.0, 20.0, Falling),
                ],
                enemies: vec![
                    shooter(500.0),
                    melee(900.0),
                    shooter(1300.0),
                    melee(1700.0),
                ],
                pickups: vec![pickup(1500.0, Weapon::Rifle)],
                boss: false,
            },
        },
        Level {
            id: 4,
            name: "Server Farm",
            theme: Theme::Lab,
            description: "Hack the core. Enemies respawn near terminals.",
            map: MapDescriptor {
                width: 2800.0,
                platforms: vec![
                    plat(300.0, 450.0, 150.0, 20.0, Flat),
                    plat(700.0, 400.0, 120.0, 20.0, Rising),
                    plat(1100.0, 420.0, 150.0, 20.0, Falling),
                    plat(1500.0, 350.0, 100.0, 20.0, Flat),
                    plat(1900.0, 380.0, 180.0, 20.0, Rising),
                    plat(2300.0, 300.0, 120.0, 20.0, Falling),
                ],
                enemies: vec![
                    shooter(400.0),
                    melee(800.0),
                    shooter(1200.0),
                    melee(1600.0),
                    shooter(2000.0),
                ],
                pickups: vec![pickup(1000.0, Weapon::Shotgun)],
                boss: false,
            },
        },
        Level {
            id: 5,
            name: "Final Lab Corridor",
            theme: Theme::Lab,
            description: "The last hallway before the boss.",
            map: MapDescriptor {
                width: 2200.0,
                platforms: vec![
                    plat(400.0, 450.0, 120.0, 20.0, Flat),
                    plat(800.0, 400.0, 100.0, 20.0, Rising),
                    plat(1200.0, 420.0, 120.0, 20.0, Falling),
                    plat(1600.0, 350.0, 150.0, 20.0, Flat),
                ],
                enemies: vec![
                    melee(500.0),
                    shooter(900.0),
                    melee(1300.0),
                    shooter(1700.0),
                ],
                pickups: vec![],
                boss: false,
            },
        },
        Level {
            id: 6,
            name: "BOSS: Security AI",
            theme: Theme::Lab,
            description: "Defeat the lab's AI guardian.",
            map: MapDescriptor {
                width: 2000.0,
                platforms: vec![
                    plat(500.0, 450.0, 200.0, 20.0, Flat),
                    plat(1300.0, 450.0, 200.0, 20.0, Flat),
                ],
                enemies: vec![],
                pickups: vec![],
                boss: true,
            },
        },
        Level {
            id: 7,
            name: "Underground Bunker",
            theme: Theme::Sewer,
            description: "Descend deeper. Low visibility.",
            map: MapDescriptor {
                width: 3200.0,
                platforms: vec![
                    plat(300.0, 500.0, 100.0, 20.0, Flat),
                    plat(700.0, 450.0, 80.0, 20.0, Rising),
                    plat(1100.0, 480.0, 120.0, 20.0, Falling),
                    plat(1500.0, 400.0, 100.0, 20.0, Flat),
                    plat(1900.0, 430.0, 150.0, 20.0, Rising),
                    plat(2300.0, 380.0, 120.0, 20.0, Falling),
                    plat(2700.0, 350.0, 100.0, 20.0, Flat),
                ],
                enemies: vec![
                    melee(400.0),
                    shooter(800.0),
                    melee(1200.0),
                    shooter(1600.0),
                    melee(2000.0),
                    shooter(2400.0),
                ],
                pickups: vec![pickup(1800.0, Weapon::Rifle)],
                boss: false,
            },
        },
        Level {
            id: 8,
            name: "Helipad Siege",
            theme: Theme::Roof,
            description: "Hold the roof until extraction.",
            map: MapDescriptor {
                width: 2500.0,
                platforms: vec![
                    plat(500.0, 400.0, 120.0, 20.0, Flat),
                    plat(1000.0, 350.0, 100.0, 20.0, Rising),
                    plat(1500.0, 420.0, 120.0, 20.0, Falling),
                    plat(2000.0, 300.0, 150.0, 20.0, Flat),
                ],
                enemies: vec![
                    shooter(600.0),
                    melee(1100.0),
                    shooter(1600.0),
                    melee(2100.0),
                ],
                pickups: vec![],
                boss: false,
            },
        },
        Level {
            id: 9,
            name: "Command Center",
            theme: Theme::Lab,
            description: "Destroy the mainframe.",
            map: MapDescriptor {
                width: 2800.0,
                platforms: vec![
                    plat(400.0, 450.0, 150.0, 20.0, Flat),
                    plat(900.0, 400.0, 120.0, 20.0, Rising),
                    plat(1400.0, 420.0, 150.0, 20.0, Falling),
                    plat(1900.0, 350.0, 100.0, 20.0, Flat),
                    plat(2400.0, 380.0, 180.0, 20.0, Rising),
                ],
                enemies: vec![
                    shooter(500.0),
                    melee(1000.0),
                    shooter(1500.0),
                    melee(2000.0),
                    shooter(2500.0),
                ],
                pickups: vec![pickup(1200.0, Weapon::Rifle)],
                boss: false,
            },
        },
        Level {
            id: 10,
            name: "FINAL BOSS: Director",
            theme: Theme::Lab,
            description: "Face the one who killed Professor Arlen.",
            map: MapDescriptor {
                width: 2200.0,
                platforms: vec![
                    plat(600.0, 450.0, 200.0, 20.0, Flat),
                    plat(1400.0, 450.0, 200.0, 20.0, Flat),
                ],
                enemies: vec![],
                pickups: vec![],
                boss: true,
            },
        },
    ]
}

/// Free-play gauntlet: a 7000-wide map with seeded enemy placement and a
/// boss at the far end. Deterministic per seed.
pub fn gauntlet(seed: u64) -> MapDescriptor {
    use Slope::{Falling, Flat, Rising};
    const WIDTH: f32 = 7000.0;

    let platforms = vec![
        plat(300.0, 400.0, 150.0, 20.0, Flat),
        plat(600.0, 350.0, 120.0, 20.0, Rising),
        plat(900.0, 420.0, 150.0, 20.0, Falling),
        plat(1200.0, 300.0, 100.0, 20.0, Flat),
        plat(1500.0, 380.0, 180.0, 20.0, Rising),
        plat(1800.0, 280.0, 120.0, 20.0, Falling),
        plat(2100.0, 350.0, 140.0, 20.0, Flat),
        plat(2400.0, 400.0, 150.0, 20.0, Rising),
        plat(2700.0, 300.0, 180.0, 20.0, Falling),
        plat(3000.0, 350.0, 100.0, 20.0, Flat),
        plat(3300.0, 300.0, 150.0, 20.0, Rising),
        plat(3600.0, 380.0, 180.0, 20.0, Falling),
        plat(3900.0, 350.0, 120.0, 20.0, Flat),
        plat(4200.0, 300.0, 150.0, 20.0, Rising),
        plat(4500.0, 400.0, 180.0, 20.0, Falling),
        plat(4800.0, 350.0, 140.0, 20.0, Flat),
        plat(5100.0, 300.0, 120.0, 20.0, Rising),
        plat(5400.0, 380.0, 150.0, 20.0, Falling),
        plat(5700.0, 320.0, 100.0, 20.0, Flat),
        plat(6000.0, 350.0, 180.0, 20.0, Rising),
        plat(6300.0, 300.0, 150.0, 20.0, Falling),
        plat(6600.0, 380.0, 120.0, 20.0, Flat),
    ];

    // Enemies every 150 units, roughly 30% shooters
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut enemies = Vec::new();
    let mut x = 400.0;
    while x < WIDTH - 500.0 {
        let kind = if rng.random::<f32>() > 0.7 {
            EnemyKind::Shooter
        } else {
            EnemyKind::Melee
        };
        enemies.push(EnemySpawn { x, kind });
        x += 150.0;
    }

    MapDescriptor {
        width: WIDTH,
        platforms,
        enemies,
        pickups: vec![
            pickup(800.0, Weapon::Shotgun),
            pickup(2500.0, Weapon::Rifle),
            pickup(4500.0, Weapon::Rifle),
        ],
        boss: true,
    }
}

/// Look up a catalog level by id
pub fn find(levels: &[Level], id: u32) -> Option<&Level> {
    levels.iter().find(|l| l.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let levels = catalog();
        assert_eq!(levels.len(), 10);
        for (i, level) in levels.iter().enumerate() {
            assert_eq!(level.id, i as u32 + 1);
        }
        // Boss levels at 6 and 10 carry no enemies or pickups
        for id in [6, 10] {
            let level = find(&levels, id).unwrap();
            assert!(level.map.boss);
            assert!(level.map.enemies.is_empty());
            assert!(level.map.pickups.is_empty());
        }
        assert_eq!(levels.iter().filter(|l| l.map.boss).count(), 2);
    }

    #[test]
    fn test_build_world_from_descriptor() {
        let levels = catalog();
        let world = find(&levels, 1).unwrap().map.build();
        assert_eq!(world.width, 2000.0);
        // Ground platform plus the five static ones
        assert_eq!(world.platforms.len(), 6);
        assert_eq!(world.platforms[0].size.x, 2000.0);
        assert_eq!(world.enemies.len(), 3);
        assert_eq!(world.pickups.len(), 1);
        assert!(world.boss.is_none());
        // Spawn heights derived from the ground line
        assert_eq!(world.enemies[0].pos.y, ENEMY_SPAWN_Y);
        assert_eq!(world.pickups[0].pos.y, PICKUP_SPAWN_Y);
    }

    #[test]
    fn test_boss_level_world() {
        let levels = catalog();
        let world = find(&levels, 6).unwrap().map.build();
        let boss = world.boss.expect("boss level builds a boss");
        assert_eq!(boss.pos.x, 2000.0 - BOSS_SPAWN_OFFSET);
        assert!(!boss.active);
    }

    #[test]
    fn test_gauntlet_deterministic_per_seed() {
        let a = gauntlet(42);
        let b = gauntlet(42);
        let c = gauntlet(43);
        assert_eq!(a.enemies.len(), b.enemies.len());
        let kinds = |m: &MapDescriptor| m.enemies.iter().map(|e| e.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&b));
        assert_ne!(kinds(&a), kinds(&c));
        assert!(a.boss);
        // Spawns cover the map up to the boss arena
        assert!(a.enemies.first().unwrap().x >= 400.0);
        assert!(a.enemies.last().unwrap().x < 7000.0 - 500.0);
    }
}
