//! Car Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use car_hop::audio::{AudioManager, SoundEffect};
    use car_hop::consts::CANVAS_HEIGHT;
    use car_hop::persistence::LocalStorage;
    use car_hop::platform::{FpsCounter, FrameClock, dom, run_seed};
    use car_hop::renderer::{RenderState, scene};
    use car_hop::sim::{GameEvent, GameState, TickInput, tick};
    use car_hop::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        clock: FrameClock,
        fps: FpsCounter,
        input: TickInput,
        settings: Settings,
        high_score: HighScore,
        storage: Option<LocalStorage>,
        audio: AudioManager,
    }

    impl Game {
        /// Run the fixed steps owed for this frame and react to their events
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance(time);
            for _ in 0..steps {
                tick(&mut self.state, &self.input);
                // Clear one-shot inputs after processing
                self.input.jump = false;
            }
            self.fps.record(time);

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::NewHighScore(score) = event {
                    self.persist_high_score(score);
                }
            }
        }

        fn persist_high_score(&mut self, score: u64) {
            if !self.high_score.record(score) {
                return;
            }
            let Some(storage) = self.storage.as_mut() else {
                return;
            };
            if let Err(e) = self.high_score.save(storage) {
                log::warn!("Could not save high score: {}", e);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene::build(&self.state, &self.settings);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = dom::document() else {
                return;
            };

            dom::set_text(&document, "score", &format!("Score: {}", self.state.score()));
            dom::set_text(
                &document,
                "high-score",
                &format!("High Score: {}", self.state.high_score()),
            );

            dom::set_hidden(&document, "game-over", !self.state.game_over);
            if self.state.game_over {
                dom::set_text(&document, "final-score", &self.state.final_score.to_string());
                dom::set_text(
                    &document,
                    "final-high-score",
                    &self.state.final_high_score.to_string(),
                );
            }

            if self.settings.show_fps {
                dom::set_text(&document, "fps", &format!("{} FPS", self.fps.fps()));
            }
        }

        /// Match the canvas to the window width
        fn resize(&mut self, viewport_width: f32) {
            self.state.resize(viewport_width);
            let (w, h) = (self.state.canvas_width, self.state.canvas_height);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(w as u32, h as u32, (w, h));
            }
        }

        fn restart(&mut self) {
            self.state.restart();
            self.clock.reset();
            self.input = TickInput::default();
        }
    }

    fn viewport_width() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as f32
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Car Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas")?
            .dyn_into()?;

        let mut storage = match LocalStorage::open() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("{} - scores will not persist", e);
                None
            }
        };
        let (settings, high_score) = match storage.as_mut() {
            Some(s) => (Settings::load_or_init(s), HighScore::load(s)),
            None => (Settings::default(), HighScore::default()),
        };

        let seed = run_seed();
        let state = GameState::with_settings(
            seed,
            viewport_width(),
            high_score.best(),
            settings.difficulty,
        );
        log::info!("Game initialized with seed: {}", seed);

        let (width, height) = (state.canvas_width, CANVAS_HEIGHT);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width as u32,
            height as u32,
            (width, height),
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create device: {}", e)))?;

        let game = Rc::new(RefCell::new(Game {
            state,
            render_state: Some(render_state),
            canvas,
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            input: TickInput::default(),
            audio: AudioManager::new(settings.effective_volume()),
            settings,
            high_score,
            storage,
        }));

        game.borrow().update_hud();
        dom::set_hidden(&document, "fps", !game.borrow().settings.show_fps);

        setup_input_handlers(game.clone())?;
        setup_restart_button(game.clone())?;
        setup_resize(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Car Hop running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Keyboard: Space / ArrowUp, ignoring auto-repeat
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if matches!(event.code().as_str(), "Space" | "ArrowUp") {
                    event.prevent_default();
                    game.borrow_mut().input.jump = true;
                }
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Tap anywhere
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.jump = true;
            });
            document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = dom::document().ok_or("no document")?;

        let Some(btn) = document.get_element_by_id("restart-button") else {
            log::warn!("No #restart-button; restart is unavailable");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().restart();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(viewport_width());
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Car Hop failed to start: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Steps the headless run gives up after (about 10 minutes of play)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_STEP_LIMIT: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use car_hop::persistence::MemoryStorage;
    use car_hop::platform::run_seed;
    use car_hop::sim::{GameEvent, GameState, TickInput, tick};
    use car_hop::{HighScore, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Car Hop (native) starting headless run...");
    log::info!("The playable game is the web build - run with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(run_seed);

    let mut storage = MemoryStorage::new();
    let settings = Settings::load_or_init(&mut storage);
    let mut high_score = HighScore::load(&storage);
    let mut state = GameState::with_settings(
        seed,
        car_hop::consts::MAX_CANVAS_WIDTH,
        high_score.best(),
        settings.difficulty,
    );

    let mut jumps = 0u32;
    while !state.game_over && state.time_ticks < HEADLESS_STEP_LIMIT {
        let input = TickInput {
            jump: autopilot_should_jump(&state),
        };
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::NewHighScore(score) => {
                    if high_score.record(score) {
                        if let Err(e) = high_score.save(&mut storage) {
                            log::warn!("Could not save high score: {}", e);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Seed {}: score {} after {} steps and {} jumps ({})",
        seed,
        state.score(),
        state.time_ticks,
        jumps,
        if state.game_over { "crashed" } else { "survived" }
    );
}

/// Jump when the nearest car will reach the runner in about a third of a jump
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_should_jump(state: &car_hop::sim::GameState) -> bool {
    use car_hop::sim::{car_hitbox, player_hitbox};

    let runner = player_hitbox(&state.player);
    state
        .cars
        .iter()
        .filter(|car| car_hitbox(car).right() > runner.x)
        .map(|car| (car_hitbox(car).x - runner.right(), car.speed))
        .any(|(distance, speed)| distance > 0.0 && distance < speed * 12.0)
}
