//! Color Catch entry point
//!
//! Web: wires the DOM, input and `requestAnimationFrame` to a [`Session`].
//! Native: plays one headless autopilot game and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    use color_catch::highscore::LocalStorageStore;
    use color_catch::renderer::{CanvasRenderer, FrameSnapshot, Renderer};
    use color_catch::sim::{GameEvent, GamePhase, TickInput, autopilot};
    use color_catch::{Session, Settings, Viewport};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        settings: Settings,
        input: TickInput,
        autopilot: bool,
        /// rAF timestamp of the previous frame; None right after start
        last_time: Option<f64>,
    }

    impl Game {
        /// Current window size, also applied to the canvas
        fn viewport(&self) -> Viewport {
            let window = web_sys::window().expect("no window");
            let w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1.0);
            let h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1.0);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            Viewport::new(w as f32, h as f32)
        }

        /// Run one frame. Returns false once the loop should stop.
        fn frame(&mut self, time: f64) -> bool {
            let elapsed = match self.last_time {
                Some(last) => (time - last) as f32,
                None => 0.0,
            };
            self.last_time = Some(time);

            if self.autopilot {
                if let Some(cmd) = autopilot::choose(&self.session.state) {
                    self.input.push(cmd);
                }
            }

            let viewport = self.viewport();
            let events = self.session.frame(&self.input, elapsed, viewport);
            self.input.clear();

            let frame = FrameSnapshot::new(&self.session.state, &self.settings);
            self.renderer.draw(&frame);
            self.update_hud();

            if events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                self.show_game_over();
                return false;
            }
            self.session.phase() == GamePhase::Playing
        }

        fn update_hud(&self) {
            let document = document();
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.session.score())));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&format!("Lives: {}", self.session.state.lives)));
            }
        }

        fn show_game_over(&self) {
            let document = document();
            set_display(&document, "gameCanvas", "none");
            set_display(&document, "gameOver", "block");
            if let Some(el) = document.get_element_by_id("lastScore") {
                el.set_text_content(Some(&format!("Your score: {}", self.session.score())));
            }
            if let Some(el) = document.get_element_by_id("highScore") {
                el.set_text_content(Some(&format!("Best: {}", self.session.high_score())));
            }
            set_display(&document, "lastScore", "block");
            set_display(&document, "highScore", "block");
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_display(document: &Document, id: &str, value: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", value);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Color Catch starting...");

        let document = document();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let session = Session::new(
            seed,
            Viewport::new(canvas.width() as f32, canvas.height() as f32),
            LocalStorageStore,
        );
        log::info!(
            "Session created with seed {} (high score {})",
            seed,
            session.high_score()
        );

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer: CanvasRenderer::new(canvas.clone(), ctx),
            canvas,
            settings,
            input: TickInput::default(),
            autopilot: false,
            last_time: None,
        }));

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());
        setup_restart_button(game);

        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            if let Some(cmd) = g.settings.command_for_key(&key) {
                g.session.command(cmd);
            } else if g.settings.is_autopilot_key(&key) {
                g.autopilot = !g.autopilot;
                log::info!("Autopilot: {}", g.autopilot);
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let started = {
                    let mut g = game.borrow_mut();
                    let viewport = g.viewport();
                    let started = g.session.start(viewport);
                    if started {
                        g.last_time = None;
                        g.input.clear();
                    }
                    started
                };
                if started {
                    let document = document();
                    set_display(&document, "startScreen", "none");
                    set_display(&document, "gameOver", "none");
                    set_display(&document, "lastScore", "none");
                    set_display(&document, "highScore", "none");
                    set_display(&document, "gameCanvas", "block");
                    game.borrow().update_hud();
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if game.borrow_mut().session.restart() {
                    let document = document();
                    set_display(&document, "gameOver", "none");
                    set_display(&document, "gameCanvas", "none");
                    set_display(&document, "startScreen", "flex");
                    log::info!("Back to start screen");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = game.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use color_catch::consts::NOMINAL_FRAME_MS;
    use color_catch::sim::{GameEvent, GamePhase, TickInput, autopilot};
    use color_catch::{MemoryStore, Session, Tuning, Viewport};

    /// Stop a game that somehow never ends (about an hour at 60 Hz)
    const MAX_FRAMES: u64 = 60 * 60 * 60;

    env_logger::init();
    log::info!("Color Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot game - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Could not load tuning from {}: {}, using defaults", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let viewport = Viewport::new(1280.0, 720.0);
    let mut session = Session::with_tuning(seed, viewport, tuning, MemoryStore::new());
    session.start(viewport);

    let mut spawned = 0u64;
    while session.phase() == GamePhase::Playing && session.state.frame < MAX_FRAMES {
        let mut input = TickInput::default();
        if let Some(cmd) = autopilot::choose(&session.state) {
            input.push(cmd);
        }
        for event in session.frame(&input, NOMINAL_FRAME_MS, viewport) {
            match event {
                GameEvent::BallSpawned { .. } => spawned += 1,
                GameEvent::LifeLost { color, lives } => {
                    log::info!("Missed a {:?} ball, {} lives left", color, lives)
                }
                _ => {}
            }
        }
    }

    println!(
        "seed {}: score {} after {} frames ({} balls spawned), high score {}",
        seed,
        session.score(),
        session.state.frame,
        spawned,
        session.high_score()
    );
}
