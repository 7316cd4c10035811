//! Gunrun entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CustomEvent, CustomEventInit, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent, MouseEvent,
    };

    use glam::Vec2;
    use gunrun::consts::*;
    use gunrun::render::Renderer;
    use gunrun::sim::{GameEvent, TickInput};
    use gunrun::{Customization, GameSession, Outfit, PlayerStyle};

    /// Everything the shell needs between frames
    struct Game {
        session: GameSession,
        renderer: Renderer,
        style: PlayerStyle,
        input: TickInput,
        /// Last mouse position in canvas coordinates
        mouse: Vec2,
    }

    impl Game {
        fn new(renderer: Renderer) -> Self {
            Self {
                session: GameSession::new(),
                renderer,
                style: PlayerStyle::from_customization(&Customization::load()),
                input: TickInput::default(),
                mouse: Vec2::ZERO,
            }
        }

        /// One frame: simulate, react to events, draw, refresh the HUD
        fn frame(&mut self, now_ms: f64) {
            if !self.session.is_running() {
                return;
            }

            // Aim in world space: mouse plus horizontal scroll
            let cam_x = self
                .session
                .world
                .as_ref()
                .map(|w| w.camera.x)
                .unwrap_or(0.0);
            self.input.aim = self.mouse + Vec2::new(cam_x, 0.0);

            let input = self.input;
            let events = self.session.frame(&input, now_ms);
            for event in &events {
                self.handle_event(event);
            }

            if let Some(world) = &self.session.world {
                if let Err(e) = self.renderer.draw(world, &self.style, self.input.aim) {
                    log::warn!("Render error: {e:?}");
                }
            }
            self.update_hud();
        }

        fn handle_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::WeaponCollected(weapon) => {
                    log::info!("Picked up {}", weapon.as_str());
                }
                GameEvent::PlayerDied => {
                    dispatch_event("player-died", JsValue::NULL);
                    show_screen("landing");
                }
                GameEvent::BossDefeated | GameEvent::ExitReached => {
                    dispatch_event("boss-defeated", JsValue::NULL);
                    show_screen("winScreen");
                }
                GameEvent::LevelComplete(id) => {
                    dispatch_event("level-complete", JsValue::from_f64(*id as f64));
                    refresh_level_buttons(&self.session);
                }
                // Bars are polled every frame in update_hud
                GameEvent::HealthChanged(_) | GameEvent::BossHealthChanged(_) => {}
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            let Some(world) = &self.session.world else {
                return;
            };

            let health = world.player.health.clamp(0.0, PLAYER_MAX_HEALTH) as f64;
            if let Some(el) = document.get_element_by_id("healthFill") {
                if let Some(el) = el.dyn_ref::<web_sys::HtmlElement>() {
                    let _ = el.style().set_property("width", &format!("{health}%"));
                    let color = if health > 60.0 {
                        "#00ffaa"
                    } else if health > 30.0 {
                        "#ffcc00"
                    } else {
                        "#ff5555"
                    };
                    let _ = el.style().set_property("background", color);
                }
            }
            if let Some(el) = document.get_element_by_id("healthValue") {
                el.set_text_content(Some(&(health.floor() as i32).to_string()));
            }

            // Boss bar shows only while an awake boss is in the world
            let boss = world.boss.as_ref().filter(|b| b.active);
            if let Some(el) = document.get_element_by_id("bossHealth") {
                let _ = el.set_attribute(
                    "class",
                    if boss.is_some() { "" } else { "hidden" },
                );
            }
            if let (Some(boss), Some(el)) = (boss, document.get_element_by_id("bossFill")) {
                if let Some(el) = el.dyn_ref::<web_sys::HtmlElement>() {
                    let pct = (boss.health.max(0.0) / BOSS_MAX_HEALTH * 100.0) as f64;
                    let _ = el.style().set_property("width", &format!("{pct}%"));
                }
            }
        }
    }

    /// Show one overlay screen, hiding the others
    fn show_screen(id: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for screen in ["landing", "story", "customize", "levelSelect", "game", "winScreen"] {
            if let Some(el) = document.get_element_by_id(screen) {
                let _ = el.set_attribute("class", if screen == id { "screen" } else { "screen hidden" });
            }
        }
    }

    /// Dispatch a DOM CustomEvent so page scripts can react
    fn dispatch_event(name: &str, detail: JsValue) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        if let Ok(event) = CustomEvent::new_with_event_init_dict(name, &init) {
            let _ = document.dispatch_event(&event);
        }
    }

    /// Enable/disable level buttons to match unlock state
    fn refresh_level_buttons(session: &GameSession) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for level in session.levels() {
            if let Some(btn) = document.get_element_by_id(&format!("level-btn-{}", level.id)) {
                if session.progress.is_unlocked(level.id) {
                    let _ = btn.remove_attribute("disabled");
                } else {
                    let _ = btn.set_attribute("disabled", "disabled");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Gunrun starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("no #gameCanvas element");
                return;
            }
        };
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let renderer = match Renderer::new(&canvas) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to create renderer: {e:?}");
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(renderer)));
        refresh_level_buttons(&game.borrow().session);

        setup_input_handlers(&canvas, game.clone());
        setup_menu_buttons(game.clone());
        setup_customization_form(game.clone());

        request_animation_frame(game);

        log::info!("Gunrun running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        // Keyboard: a/d move, w or space jumps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "a" => g.input.left = true,
                    "d" => g.input.right = true,
                    "w" | " " => g.input.jump = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "a" => g.input.left = false,
                    "d" => g.input.right = false,
                    "w" | " " => g.input.jump = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse: hold to fire, move to aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.fire = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.fire = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                game.borrow_mut().mouse = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // One button per campaign level
        let ids: Vec<u32> = game.borrow().session.levels().iter().map(|l| l.id).collect();
        for id in ids {
            if let Some(btn) = document.get_element_by_id(&format!("level-btn-{id}")) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    if g.session.start_level(id) {
                        g.input = TickInput::default();
                        show_screen("game");
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // The endless gauntlet, seeded off the clock
        if let Some(btn) = document.get_element_by_id("btn-start-game") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.session.start_game(js_sys::Date::now() as u64);
                g.input = TickInput::default();
                show_screen("game");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btn-start-landing") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                show_screen("story");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btn-enter-door") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                show_screen("customize");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Reads the form on save, persists it and refreshes the draw style
    fn setup_customization_form(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("btn-save-custom") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let mut custom = Customization::default();
                if let Some(input) = document
                    .get_element_by_id("skinColor")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    custom.skin = input.value();
                }
                if let Some(input) = document
                    .get_element_by_id("eyeColor")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    custom.eyes = input.value();
                }
                if let Some(select) = document
                    .get_element_by_id("outfit")
                    .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                {
                    if let Some(outfit) = Outfit::from_str(&select.value()) {
                        custom.outfit = outfit;
                    }
                }
                custom.save();
                game.borrow_mut().style = PlayerStyle::from_customization(&custom);
                show_screen("levelSelect");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gunrun (native) starting...");
    log::info!("Native mode has no presentation layer - run with `trunk serve` for the web version");

    // Exercise a few frames of the simulation headless
    let mut world = gunrun::levels::gauntlet(0).build();
    let input = gunrun::sim::TickInput::default();
    for frame in 0..120 {
        let _ = gunrun::sim::tick(&mut world, &input, frame as f64 * (1000.0 / 60.0));
    }
    log::info!(
        "Simulated 120 frames: player at ({:.1}, {:.1}), {} projectiles live",
        world.player.pos.x,
        world.player.pos.y,
        world.projectiles.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
