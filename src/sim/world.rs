//! World state and entity model
//!
//! One `World` is the complete mutable state of a single level attempt.
//! It is built fresh by the session for every (re)start and owned
//! exclusively by the running simulation until a terminal transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::platform::Platform;
use super::tick::TickInput;
use crate::consts::*;

/// Player weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    #[default]
    Pistol,
    Shotgun,
    Rifle,
}

impl Weapon {
    /// Minimum wall-clock interval between shots
    pub fn cooldown_ms(&self) -> f64 {
        match self {
            Weapon::Pistol => 300.0,
            Weapon::Shotgun => 500.0,
            Weapon::Rifle => 200.0,
        }
    }

    /// Total damage of one trigger pull (split across the spread)
    pub fn damage(&self) -> f32 {
        match self {
            Weapon::Pistol => 10.0,
            Weapon::Shotgun => 20.0,
            Weapon::Rifle => 30.0,
        }
    }

    /// Angular offsets (radians) of the projectiles per trigger pull
    pub fn spread(&self) -> &'static [f32] {
        match self {
            Weapon::Shotgun => &[-0.3, 0.0, 0.3],
            Weapon::Pistol | Weapon::Rifle => &[0.0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Pistol => "pistol",
            Weapon::Shotgun => "shotgun",
            Weapon::Rifle => "rifle",
        }
    }
}

/// Who fired a projectile (decides what it can hit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Hostile,
}

/// A live projectile
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: f32,
    pub owner: Owner,
}

impl Projectile {
    /// Spawn a projectile flying at `angle` from `origin`
    pub fn fired(origin: Vec2, angle: f32, speed: f32, size: Vec2, damage: f32, owner: Owner) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            size,
            damage,
            owner,
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub health: f32,
    pub weapon: Weapon,
    pub last_shot_ms: f64,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            grounded: false,
            health: PLAYER_MAX_HEALTH,
            weapon: Weapon::Pistol,
            last_shot_ms: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Per-tick movement, jumping and firing
    ///
    /// Horizontal velocity is rebuilt from input every tick; the friction
    /// branch therefore only ever scales zero. A held jump re-triggers on
    /// every grounded tick.
    pub fn update(
        &mut self,
        input: &TickInput,
        map_width: f32,
        projectiles: &mut Vec<Projectile>,
        now_ms: f64,
    ) {
        self.vel.x = 0.0;
        if input.left {
            self.vel.x = -PLAYER_SPEED;
        }
        if input.right {
            self.vel.x = PLAYER_SPEED;
        }
        if !input.left && !input.right {
            self.vel.x *= FRICTION;
        }

        if input.jump && self.grounded {
            self.vel.y = JUMP_FORCE;
            self.grounded = false;
        }

        if !self.grounded {
            self.vel.y += GRAVITY;
        }
        self.pos += self.vel;

        // Hard floor at the very bottom of the map
        let floor = VIEW_HEIGHT - self.size.y - GROUND_THICKNESS;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.grounded = true;
            self.vel.y = 0.0;
        } else {
            self.grounded = false;
        }

        self.pos.x = self.pos.x.clamp(0.0, map_width - self.size.x);

        if input.fire && now_ms - self.last_shot_ms > self.weapon.cooldown_ms() {
            self.last_shot_ms = now_ms;
            self.fire(input.aim, projectiles);
        }
    }

    /// Spawn this weapon's projectiles toward the aim point (world space)
    fn fire(&self, aim: Vec2, projectiles: &mut Vec<Projectile>) {
        let origin = self.center();
        let angle = (aim.y - origin.y).atan2(aim.x - origin.x);
        let spread = self.weapon.spread();
        let damage = self.weapon.damage() / spread.len() as f32;
        for &offset in spread {
            projectiles.push(Projectile::fired(
                origin,
                angle + offset,
                BULLET_SPEED,
                Vec2::new(8.0, 4.0),
                damage,
                Owner::Player,
            ));
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Enemy behavior variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Melee,
    Shooter,
}

impl EnemyKind {
    pub fn max_health(&self) -> f32 {
        match self {
            EnemyKind::Melee => 30.0,
            EnemyKind::Shooter => 50.0,
        }
    }
}

/// A scripted enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub health: f32,
    /// Set once the player comes within activation range; never cleared
    pub active: bool,
    pub last_shot_ms: f64,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            kind,
            health: kind.max_health(),
            active: false,
            last_shot_ms: 0.0,
        }
    }

    /// Per-tick behavior: wake, chase or shoot, absorb player fire
    pub fn update(&mut self, player: &Player, projectiles: &mut Vec<Projectile>, now_ms: f64) {
        if (player.pos.x - self.pos.x).abs() < ENEMY_ACTIVATION_RANGE {
            self.active = true;
        }
        if !self.active {
            return;
        }

        match self.kind {
            EnemyKind::Melee => {
                if player.pos.x > self.pos.x {
                    self.pos.x += MELEE_SPEED;
                } else if player.pos.x < self.pos.x {
                    self.pos.x -= MELEE_SPEED;
                }
            }
            EnemyKind::Shooter => {
                if now_ms - self.last_shot_ms > SHOOTER_COOLDOWN_MS {
                    self.last_shot_ms = now_ms;
                    let angle =
                        (player.pos.y - self.pos.y).atan2(player.pos.x - self.pos.x);
                    projectiles.push(Projectile::fired(
                        self.pos + self.size / 2.0,
                        angle,
                        BULLET_SPEED,
                        Vec2::new(8.0, 4.0),
                        SHOOTER_DAMAGE,
                        Owner::Hostile,
                    ));
                }
            }
        }

        self.health -= super::combat::drain_hits(projectiles, self.pos, self.size, Owner::Player);
    }
}

/// The level boss
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    /// Set once the player crosses into the boss arena; never cleared
    pub active: bool,
    pub last_shot_ms: f64,
}

impl Boss {
    pub fn new(map_width: f32) -> Self {
        Self {
            pos: Vec2::new(map_width - BOSS_SPAWN_OFFSET, BOSS_SPAWN_Y),
            size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
            health: BOSS_MAX_HEALTH,
            active: false,
            last_shot_ms: 0.0,
        }
    }

    /// Per-tick behavior: wake, home in, fire the 4-shot spread, absorb
    /// player fire. The terminal transition on death is the tick's job.
    pub fn update(
        &mut self,
        player: &Player,
        map_width: f32,
        projectiles: &mut Vec<Projectile>,
        now_ms: f64,
    ) {
        if player.pos.x > map_width - BOSS_ACTIVATION_RANGE {
            self.active = true;
        }
        if !self.active {
            return;
        }

        if player.pos.x > self.pos.x {
            self.pos.x += BOSS_SPEED;
        } else if player.pos.x < self.pos.x {
            self.pos.x -= BOSS_SPEED;
        }

        if now_ms - self.last_shot_ms > BOSS_COOLDOWN_MS {
            self.last_shot_ms = now_ms;
            let aim = (player.pos.y - self.pos.y).atan2(player.pos.x - self.pos.x);
            for i in 0..4 {
                let angle = aim + (i as f32 - 1.5) * 0.3;
                projectiles.push(Projectile::fired(
                    self.pos + self.size / 2.0,
                    angle,
                    BULLET_SPEED * BOSS_BULLET_SPEED_MULT,
                    Vec2::new(12.0, 6.0),
                    BOSS_DAMAGE,
                    Owner::Hostile,
                ));
            }
        }

        self.health -= super::combat::drain_hits(projectiles, self.pos, self.size, Owner::Player);
    }
}

/// A weapon pickup lying in the world
#[derive(Debug, Clone)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: Vec2,
    pub weapon: Weapon,
    pub active: bool,
}

impl Pickup {
    pub fn new(x: f32, y: f32, weapon: Weapon) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(PICKUP_SIZE),
            weapon,
            active: true,
        }
    }

    pub fn collides_with(&self, player: &Player) -> bool {
        crate::aabb_overlap(player.pos, player.size, self.pos, self.size)
    }
}

/// Horizontal camera offset tracking the player
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Center on the player, clamped to the map bounds
    pub fn recenter(&mut self, player_x: f32, map_width: f32) {
        self.x = (player_x - VIEW_WIDTH / 2.0).clamp(0.0, (map_width - VIEW_WIDTH).max(0.0));
    }
}

/// Run lifecycle of a world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Running,
    /// Lethal hit landed; the world keeps simulating until the deadline,
    /// giving the final frames a chance to render
    Dying { deadline_ms: f64 },
    /// Terminal win; the world is frozen until the deadline
    Won { deadline_ms: f64, boss: bool },
    /// The run is over; ticks are no-ops
    Ended,
}

/// Outcomes surfaced to the session / UI collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    HealthChanged(f32),
    /// `Some(hp)` while a boss bar should show, `None` to hide it
    BossHealthChanged(Option<f32>),
    WeaponCollected(Weapon),
    PlayerDied,
    /// Player reached the exit door of a non-boss level
    ExitReached,
    BossDefeated,
    /// Emitted by the session once progress has been updated
    LevelComplete(u32),
}

/// Complete mutable state of one level attempt
#[derive(Debug, Clone)]
pub struct World {
    pub width: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub player: Player,
    pub camera: Camera,
    pub phase: Phase,
}

impl World {
    /// Empty world over a ground platform spanning the full width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            platforms: vec![Platform::new(
                0.0,
                GROUND_Y,
                width,
                GROUND_THICKNESS,
                super::platform::Slope::Flat,
            )],
            enemies: Vec::new(),
            pickups: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            player: Player::new(),
            camera: Camera::default(),
            phase: Phase::Running,
        }
    }

    /// Whether the run has reached a terminal state
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }
}
