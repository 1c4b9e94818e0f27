//! Retro Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use retro_pong::audio::AudioManager;
    use retro_pong::input::Bounds;
    use retro_pong::render::Renderer;
    use retro_pong::sim::SessionState;
    use retro_pong::{Command, GameSettings, Session};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<Renderer>,
        audio: AudioManager,
        bounds: Bounds,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = GameSettings::default();
            let mut audio = AudioManager::new();
            audio.set_enabled(settings.sound_enabled);
            Self {
                session: Session::new(settings, seed),
                renderer: None,
                audio,
                bounds: Bounds::default(),
                last_time: 0.0,
            }
        }

        /// Run one frame: simulate, play cues, render
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                retro_pong::consts::FRAME_MS
            };
            self.last_time = time;

            for cue in self.session.frame(elapsed, time) {
                self.audio.play(cue);
            }

            if let Some(renderer) = &self.renderer {
                renderer.draw(
                    &self.session.sim,
                    &self.session.settings,
                    &self.session.frame_geom(),
                );
            }
        }

        /// Swap in new settings from the configuration surface
        fn apply_settings(&mut self, settings: GameSettings) {
            self.audio.set_enabled(settings.sound_enabled);
            self.session.update_settings(settings);
        }

        fn command(&mut self, command: Command, now: f64) {
            self.session.apply(command, now);
        }

        /// Update score and overlay elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let (player, ai) = self.session.scores();
            if let Some(el) = document.get_element_by_id("hud-player-score") {
                el.set_text_content(Some(&player.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-ai-score") {
                el.set_text_content(Some(&ai.to_string()));
            }

            let state = self.session.state();
            set_overlay(&document, "menu", state == SessionState::Menu);
            set_overlay(&document, "pause-overlay", state == SessionState::Paused);
            set_overlay(&document, "game-over", state == SessionState::GameOver);
            set_overlay(&document, "demo-banner", state == SessionState::Demo);

            if state == SessionState::GameOver {
                if let Some(el) = document.get_element_by_id("winner") {
                    let text = match self.session.winner() {
                        Some(side) => side.as_str(),
                        None => "",
                    };
                    el.set_text_content(Some(text));
                }
            }

            // Surface the active theme and FX toggles so the CSS overlay
            // layer (scanlines, noise, warp) can react to them
            if let Some(body) = document.body() {
                let s = &self.session.settings;
                let _ = body.set_attribute("data-theme", s.theme.as_str());
                let _ = body.set_attribute("data-text-size", s.text_size.as_str());
                let _ = body.set_attribute("data-effects", flag(s.effects_enabled));
                let _ = body.set_attribute("data-crt", flag(s.crt_effect));
                let _ = body.set_attribute("data-fuzzy", flag(s.fuzzy_background));
                let _ = body.set_attribute("data-glitch", flag(s.glitch_effect));
            }
        }
    }

    fn flag(on: bool) -> &'static str {
        if on { "on" } else { "off" }
    }

    fn set_overlay(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "overlay" } else { "overlay hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    /// Scale the canvas CSS size to fit the window, keeping the logical
    /// aspect ratio, and record the displayed bounds for input mapping.
    fn layout_canvas(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let mut g = game.borrow_mut();

        let frame = g.session.frame_geom();
        let (logical_w, logical_h) = (frame.width() as f64, frame.height() as f64);
        canvas.set_width(logical_w as u32);
        canvas.set_height(logical_h as u32);

        let avail_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(logical_w);
        let avail_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(logical_h);
        let scale = (avail_w / logical_w).min(avail_h / logical_h).min(1.5);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{:.0}px", logical_w * scale));
        let _ = style.set_property("height", &format!("{:.0}px", logical_h * scale));

        let rect = canvas.get_bounding_client_rect();
        g.bounds = Bounds {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Retro Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = now_ms() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        let ctx: web_sys::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        game.borrow_mut().renderer = Some(Renderer::new(ctx));

        layout_canvas(&canvas, &game);
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_settings_listener(canvas.clone(), game.clone());
        setup_resize(canvas.clone(), game.clone());

        request_animation_frame(game);

        log::info!("Retro Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let bounds = g.bounds;
                let frame = g.session.frame_geom();
                g.session.input.set_pointer(
                    &frame,
                    &bounds,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - unlocks audio, exits demo
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.session.notice_press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let bounds = g.bounds;
                    let frame = g.session.frame_geom();
                    g.session.input.set_pointer(
                        &frame,
                        &bounds,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.session.notice_press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                if g.session.notice_press() {
                    return;
                }
                let key = event.key();
                match key.as_str() {
                    " " => {
                        match g.session.state() {
                            SessionState::Playing => g.command(Command::Pause, now_ms()),
                            SessionState::Paused => g.command(Command::Resume, now_ms()),
                            _ => {}
                        }
                        event.prevent_default();
                    }
                    "Escape" => match g.session.state() {
                        SessionState::Playing | SessionState::Paused => {
                            g.command(Command::Quit, now_ms());
                        }
                        SessionState::GameOver => g.command(Command::Exit, now_ms()),
                        _ => {}
                    },
                    _ => {
                        if g.session.input.set_key(&key, true) {
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.input.set_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let buttons: [(&str, Command); 6] = [
            ("start-btn", Command::Start),
            ("demo-btn", Command::StartDemo),
            ("resume-btn", Command::Resume),
            ("quit-btn", Command::Quit),
            ("retry-btn", Command::Retry),
            ("exit-btn", Command::Exit),
        ];

        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");
        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.command(command, now_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// The settings panel serializes its state into a hidden input and
    /// fires "change"; parse it and hand it to the session. Orientation
    /// changes re-derive the canvas layout too.
    fn setup_settings_listener(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");
        let Some(el) = document.get_element_by_id("settings-json") else {
            return;
        };
        let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
            return;
        };

        let source = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match GameSettings::from_json(&source.value()) {
                Ok(settings) => {
                    game.borrow_mut().apply_settings(settings);
                    layout_canvas(&canvas, &game);
                }
                Err(e) => log::warn!("ignoring malformed settings: {e}"),
            }
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            layout_canvas(&canvas, &game);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();
            g.frame(time);
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
    use retro_pong::consts::FRAME_MS;
    use retro_pong::{Command, GameSettings, Session};

    env_logger::init();
    log::info!("Retro Pong (native) starting...");
    log::info!("The playable build targets wasm32 - running a headless demo rally");

    // Ten seconds of attract mode at a fixed step, as a smoke run
    let mut session = Session::new(GameSettings::default(), 0xC0FFEE);
    session.apply(Command::StartDemo, 0.0);
    for i in 0..600u32 {
        session.frame(FRAME_MS, i as f64 * FRAME_MS);
    }

    let ball = session.sim.ball.pos;
    log::info!(
        "demo rally finished: ball at ({:.1}, {:.1}), speed {:.1}",
        ball.x,
        ball.y,
        session.sim.ball.speed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
