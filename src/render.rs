//! Canvas2D presentation layer
//!
//! Draws one frame of a `World` onto the game canvas. Pure presentation:
//! reads world state, never mutates it. All world-space x coordinates are
//! shifted by the camera before drawing.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::customization::PlayerStyle;
use crate::sim::{EnemyKind, Owner, Slope, Weapon, World};

/// Canvas2D draw state for the game view
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one complete frame
    ///
    /// `aim` is the mouse position in world space; it only affects the
    /// angle the player's gun is drawn at.
    pub fn draw(&self, world: &World, style: &PlayerStyle, aim: Vec2) -> Result<(), JsValue> {
        let cam = world.camera.x as f64;

        self.draw_background(world, cam)?;

        for platform in &world.platforms {
            self.draw_platform(platform, cam);
        }
        for pickup in &world.pickups {
            self.draw_pickup(pickup, cam)?;
        }
        for enemy in &world.enemies {
            self.draw_enemy(enemy, cam);
        }
        if let Some(boss) = &world.boss {
            self.draw_boss(boss, cam)?;
        }
        for projectile in &world.projectiles {
            let color = match projectile.owner {
                Owner::Player => "#ffff00",
                Owner::Hostile => "#ff5555",
            };
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                projectile.pos.x as f64 - cam,
                projectile.pos.y as f64,
                projectile.size.x as f64,
                projectile.size.y as f64,
            );
        }

        self.draw_player(world, style, aim, cam)?;
        Ok(())
    }

    /// Night sky, parallax hills and the exit door
    fn draw_background(&self, world: &World, cam: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let width = world.width as f64;
        let height = VIEW_HEIGHT as f64;

        ctx.set_fill_style_str("#0a1a35");
        ctx.fill_rect(-cam, 0.0, width, height);

        // Hills scroll at a fifth of the camera speed
        ctx.set_fill_style_str("#2a3f5f");
        let mut x = 0.0;
        while x < width {
            ctx.begin_path();
            ctx.move_to(x - cam * 0.2, height - 100.0);
            ctx.line_to(x + 300.0 - cam * 0.2, height - 300.0);
            ctx.line_to(x + 600.0 - cam * 0.2, height - 100.0);
            ctx.close_path();
            ctx.fill();
            x += 600.0;
        }

        // Exit door at the right edge of the map
        ctx.set_fill_style_str("#8a6d3b");
        ctx.fill_rect(width - 40.0 - cam, height - 150.0, 30.0, 100.0);
        ctx.set_fill_style_str("#5a4a2a");
        ctx.fill_rect(width - 35.0 - cam, height - 100.0, 20.0, 20.0);
        Ok(())
    }

    fn draw_platform(&self, platform: &crate::sim::Platform, cam: f64) {
        let ctx = &self.ctx;
        let x = platform.pos.x as f64 - cam;
        let y = platform.pos.y as f64;
        let w = platform.size.x as f64;
        let h = platform.size.y as f64;

        ctx.set_fill_style_str("#5d8aa8");
        match platform.slope {
            Slope::Flat => ctx.fill_rect(x, y, w, h),
            slope => {
                // Ramps render as right triangles over the platform box
                ctx.begin_path();
                ctx.move_to(x, y + h);
                ctx.line_to(x + w, y + h);
                match slope {
                    Slope::Rising => ctx.line_to(x + w, y),
                    _ => ctx.line_to(x, y),
                }
                ctx.close_path();
                ctx.fill();
            }
        }
    }

    fn draw_pickup(&self, pickup: &crate::sim::Pickup, cam: f64) -> Result<(), JsValue> {
        if !pickup.active {
            return Ok(());
        }
        let ctx = &self.ctx;
        let x = pickup.pos.x as f64 - cam;
        let y = pickup.pos.y as f64;

        let color = match pickup.weapon {
            Weapon::Shotgun => "#ffcc00",
            _ => "#00ccff",
        };
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, y, pickup.size.x as f64, pickup.size.y as f64);

        let initial = pickup
            .weapon
            .as_str()
            .chars()
            .next()
            .unwrap_or('?')
            .to_ascii_uppercase();
        ctx.set_fill_style_str("black");
        ctx.set_font("10px Arial");
        ctx.fill_text(&initial.to_string(), x + 7.0, y + 12.0)?;
        Ok(())
    }

    fn draw_enemy(&self, enemy: &crate::sim::Enemy, cam: f64) {
        // Dormant enemies are invisible until the player wakes them
        if !enemy.active {
            return;
        }
        let ctx = &self.ctx;
        let x = enemy.pos.x as f64 - cam;
        let y = enemy.pos.y as f64;
        let w = enemy.size.x as f64;

        let color = match enemy.kind {
            EnemyKind::Shooter => "#ff6b6b",
            EnemyKind::Melee => "#ffaa33",
        };
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, y, w, enemy.size.y as f64);

        // Health bar floating above
        let ratio = (enemy.health / enemy.kind.max_health()).clamp(0.0, 1.0) as f64;
        ctx.set_fill_style_str("red");
        ctx.fill_rect(x, y - 8.0, w, 4.0);
        ctx.set_fill_style_str("lime");
        ctx.fill_rect(x, y - 8.0, w * ratio, 4.0);
    }

    fn draw_boss(&self, boss: &crate::sim::Boss, cam: f64) -> Result<(), JsValue> {
        if !boss.active {
            return Ok(());
        }
        let ctx = &self.ctx;
        let x = boss.pos.x as f64 - cam;
        let y = boss.pos.y as f64;

        ctx.set_fill_style_str("#b00000");
        ctx.fill_rect(x, y, boss.size.x as f64, boss.size.y as f64);
        ctx.set_fill_style_str("yellow");
        ctx.set_font("14px Arial");
        ctx.fill_text("FINAL BOSS", x + 5.0, y - 10.0)?;
        Ok(())
    }

    fn draw_player(
        &self,
        world: &World,
        style: &PlayerStyle,
        aim: Vec2,
        cam: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let player = &world.player;
        let x = player.pos.x as f64 - cam;
        let y = player.pos.y as f64;
        let w = player.size.x as f64;
        let h = player.size.y as f64;

        ctx.set_fill_style_str(style.torso);
        ctx.fill_rect(x, y, w, h * 0.7);

        ctx.set_fill_style_str(&style.skin);
        ctx.begin_path();
        ctx.arc(x + w / 2.0, y + 10.0, 12.0, 0.0, std::f64::consts::TAU)?;
        ctx.fill();

        ctx.set_fill_style_str(&style.eyes);
        ctx.fill_rect(x + w / 2.0 - 5.0, y + 5.0, 3.0, 3.0);
        ctx.fill_rect(x + w / 2.0 + 2.0, y + 5.0, 3.0, 3.0);

        let center = player.center();
        let angle = (aim.y - center.y).atan2(aim.x - center.x) as f64;
        ctx.save();
        ctx.translate(x + w / 2.0, y + h / 2.0)?;
        ctx.rotate(angle)?;
        self.draw_gun(player.weapon);
        ctx.restore();

        ctx.set_fill_style_str("white");
        ctx.set_font("12px Arial");
        ctx.fill_text(&player.weapon.as_str().to_uppercase(), x, y - 10.0)?;
        Ok(())
    }

    /// Gun silhouette, drawn in gun-local space (origin at the player
    /// center, x axis along the aim direction)
    fn draw_gun(&self, weapon: Weapon) {
        let ctx = &self.ctx;
        match weapon {
            Weapon::Pistol => {
                ctx.set_fill_style_str("#333");
                ctx.fill_rect(0.0, -3.0, 25.0, 6.0);
                ctx.fill_rect(20.0, -8.0, 8.0, 16.0);
            }
            Weapon::Shotgun => {
                ctx.set_fill_style_str("#222");
                ctx.fill_rect(0.0, -4.0, 35.0, 8.0);
                ctx.fill_rect(30.0, -10.0, 10.0, 20.0);
                ctx.set_fill_style_str("#555");
                ctx.fill_rect(10.0, -3.0, 3.0, 2.0);
                ctx.fill_rect(10.0, 1.0, 3.0, 2.0);
            }
            Weapon::Rifle => {
                ctx.set_fill_style_str("#111");
                ctx.fill_rect(0.0, -2.0, 50.0, 4.0);
                ctx.fill_rect(45.0, -6.0, 12.0, 12.0);
                ctx.set_fill_style_str("#444");
                ctx.fill_rect(15.0, -10.0, 5.0, 10.0);
                ctx.fill_rect(25.0, -1.0, 20.0, 2.0);
            }
        }
    }
}
