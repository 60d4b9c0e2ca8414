//! Cookie Raccoon entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use cookie_raccoon::audio::{AudioManager, SoundEffect};
    use cookie_raccoon::consts::*;
    use cookie_raccoon::render::Renderer;
    use cookie_raccoon::sim::{tick, GameEvent, GameState, PowerUpKind, TickInput};
    use cookie_raccoon::Settings;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state: GameState::new(seed),
                renderer: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.use_power = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = 60000.0 / (time - oldest);
            }
        }

        /// Drain simulation events into audio cues
        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jump => self.audio.play(SoundEffect::Jump),
                    GameEvent::EnemyDefeated { .. } => self.audio.play(SoundEffect::Stomp),
                    GameEvent::PlayerDied => self.audio.play(SoundEffect::PlayerDied),
                    GameEvent::PowerUpCollected(_) => {
                        self.audio.play(SoundEffect::PowerUpCollect)
                    }
                    GameEvent::PowerUpExpired => self.audio.play(SoundEffect::PowerUpExpire),
                    GameEvent::Earthquake => self.audio.play(SoundEffect::Earthquake),
                    GameEvent::Tsunami => self.audio.play(SoundEffect::Tsunami),
                    GameEvent::FlyStarted => self.audio.set_flying(true),
                    GameEvent::FlyStopped => self.audio.set_flying(false),
                    GameEvent::FlagReached => self.audio.play(SoundEffect::FlagReached),
                    GameEvent::LevelComplete => self.audio.play(SoundEffect::LevelComplete),
                    GameEvent::GameOver => self.audio.play(SoundEffect::GameOver),
                    GameEvent::GameComplete => self.audio.play(SoundEffect::GameComplete),
                }
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            if let Some(renderer) = &self.renderer {
                renderer.draw(&self.state, &self.settings, time, Some(self.fps));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&(self.state.level_index + 1).to_string()));
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }

            if let Some(el) = document.get_element_by_id("powerup") {
                match self.state.player.power_up {
                    Some(PowerUpKind::Fly) => {
                        el.set_text_content(Some("Power: Flying (Use Arrow Keys)"));
                    }
                    Some(kind) => {
                        el.set_text_content(Some(&format!("Power: {} (Press E)", kind.label())));
                    }
                    None => el.set_text_content(Some("")),
                }
                if let Some(kind) = self.state.player.power_up {
                    let _ = el
                        .dyn_ref::<web_sys::HtmlElement>()
                        .map(|h| h.style().set_property("color", kind.css_color()));
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.audio.set_flying(false);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cookie Raccoon starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(VIEW_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let ctx: web_sys::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().renderer = Some(Renderer::new(ctx));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_mute_on_blur(game.clone());

        request_animation_frame(game);

        log::info!("Cookie Raccoon running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Audio needs a user gesture to start
                g.audio.resume();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" => g.input.up = true,
                    "ArrowDown" => g.input.down = true,
                    " " => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    "e" | "E" => g.input.use_power = true,
                    "r" | "R" => {
                        let seed = js_sys::Date::now() as u64;
                        g.restart(seed);
                        log::info!("Game restarted with seed: {}", seed);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" => g.input.up = false,
                    "ArrowDown" => g.input.down = false,
                    " " => g.input.jump = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_on_blur(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.process_events();
            g.audio.update(time);
            g.render(time);
            g.update_hud();
        }

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
    log::info!("Cookie Raccoon (native) starting...");
    log::info!("The game targets the browser - build with trunk for the web version");

    println!("\nRunning simulation smoke test...");
    smoke_test();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test() {
    use cookie_raccoon::consts::SIM_DT;
    use cookie_raccoon::sim::{tick, GamePhase, GameState, TickInput};

    let mut state = GameState::new(42);
    let input = TickInput::default();
    for _ in 0..600 {
        tick(&mut state, &input, SIM_DT);
    }
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.player.on_ground, "player should have settled");
    println!(
        "✓ 600 ticks simulated: x={:.0} score={} lives={}",
        state.player.pos.x, state.score, state.lives
    );
}
