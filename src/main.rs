//! PacMac entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Response};

    use pacmac::assets::{BytesSource, GHOST_IMAGES, GhostSprites};
    use pacmac::consts::*;
    use pacmac::hud::Overlay;
    use pacmac::platform::{FixedStep, FpsCounter, Key, KeyEvent};
    use pacmac::renderer::{RenderState, build_frame};
    use pacmac::session::Flow;
    use pacmac::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        sprites: GhostSprites,
        render_state: Option<RenderState>,
        step: FixedStep,
        fps: FpsCounter,
        last_time: f64,
        show_fps: bool,
        /// Cleared by the quit key; the frame loop stops rescheduling
        running: bool,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings, sprites: GhostSprites) -> Self {
            Self {
                session: Session::new(seed, sprites.identity_count()),
                sprites,
                render_state: None,
                step: FixedStep::new(),
                fps: FpsCounter::default(),
                last_time: 0.0,
                show_fps: settings.show_fps,
                running: true,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            for _ in 0..self.step.advance(dt) {
                self.session.tick();
            }
            self.fps.record(time);

            for event in self.session.state_mut().drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn handle_key(&mut self, event: KeyEvent) {
            if self.session.handle_key(event) == Flow::Quit {
                log::info!("Quit requested");
                self.running = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(self.session.state(), &self.sprites);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let overlay = Overlay::for_state(self.session.state());

            if let Some(el) = document.query_selector("#hud-score").ok().flatten() {
                el.set_text_content(Some(&overlay.score));
            }

            if self.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.fps().to_string()));
                }
            }

            if let Some(el) = document.get_element_by_id("banner") {
                let _ = el.class_list().toggle_with_force("hidden", overlay.banner.is_none());
                if let Some(text) = overlay.banner {
                    el.set_text_content(Some(text));
                }
            }

            if let Some(el) = document.get_element_by_id("hint") {
                let _ = el.class_list().toggle_with_force("hidden", overlay.hint.is_none());
                if let Some(text) = overlay.hint {
                    el.set_text_content(Some(text));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("PacMac starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        // Write back so the stored entry exists and can be edited by hand
        settings.save();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let images = fetch_ghost_images(&settings.asset_dir).await;
        let sprites = GhostSprites::load(&images);
        let game = Rc::new(RefCell::new(Game::new(seed, &settings, sprites)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        if let Some(el) = document.get_element_by_id("hud-fps") {
            let _ = el.class_list().toggle_with_force("hidden", !settings.show_fps);
        }

        setup_input_handlers(game.clone());
        setup_visibility_handler(game.clone(), &document);

        request_animation_frame(game);

        log::info!("PacMac running!");
    }

    /// Fetch the ghost images relative to the page; failures are left for
    /// the sprite loader to replace with placeholders
    async fn fetch_ghost_images(dir: &str) -> BytesSource {
        let mut images = BytesSource::new();
        for name in GHOST_IMAGES {
            let url = format!("{}/{}", dir, name);
            match fetch_bytes(&url).await {
                Ok(bytes) => images.insert(name, bytes),
                Err(e) => log::warn!("Failed to fetch {}: {:?}", url, e),
            }
        }
        images
    }

    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let buffer = JsFuture::from(response.array_buffer()?).await?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_dom_key(&event.key());
                if key == Key::Other {
                    return;
                }
                // Arrow keys would otherwise scroll the page
                event.prevent_default();
                if !event.repeat() {
                    game.borrow_mut().handle_key(KeyEvent::Pressed(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_dom_key(&event.key());
                if key != Key::Other {
                    game.borrow_mut().handle_key(KeyEvent::Released(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Drop accumulated time while the tab is hidden so it does not replay
    fn setup_visibility_handler(game: Rc<RefCell<Game>>, document: &Document) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                g.step.reset();
                g.last_time = 0.0;
                log::info!("Tab hidden, frame clock reset");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
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
            if !g.running {
                log::info!("PacMac stopped");
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("PacMac (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the playable web version");

    native_demo::run(&pacmac::Settings::load());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless, paced demo driven by the autopilot
#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use pacmac::assets::{DirSource, GhostSprites};
    use pacmac::hud::Overlay;
    use pacmac::platform::{Autopilot, FrameLimiter};
    use pacmac::renderer::build_frame;
    use pacmac::session::Flow;
    use pacmac::{Session, Settings};

    /// Frames the end screen stays up before the autopilot restarts
    const END_SCREEN_FRAMES: u32 = 120;

    pub fn run(settings: &Settings) {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let sprites = GhostSprites::load(&DirSource::new(&settings.asset_dir));
        let mut session = Session::new(seed, sprites.identity_count());
        let mut pilot = Autopilot::new();
        // Separate stream so the autopilot never perturbs ghost behaviour
        let mut pilot_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let mut limiter = FrameLimiter::new(settings.target_fps);
        let mut end_frames = 0;

        log::info!(
            "Running {} frames at {} fps (seed {})",
            settings.demo_frames,
            settings.target_fps,
            seed
        );

        for frame in 0..settings.demo_frames {
            let playing = session.state().is_playing();
            if playing {
                end_frames = 0;
            } else {
                end_frames += 1;
            }

            let restart_due = settings.demo_restart && end_frames >= END_SCREEN_FRAMES;
            if playing || restart_due {
                for event in pilot.next_events(playing, &mut pilot_rng) {
                    if session.handle_key(event) == Flow::Quit {
                        log::info!("Quit requested");
                        return;
                    }
                }
            }

            session.tick();

            for event in session.state_mut().drain_events() {
                log::debug!("frame {}: {:?}", frame, event);
            }

            if !session.state().is_playing() && end_frames == 0 {
                for line in Overlay::for_state(session.state()).lines() {
                    println!("{}", line);
                }
            }

            if frame % 600 == 0 {
                let vertices = build_frame(session.state(), &sprites);
                log::debug!("frame {}: {} vertices", frame, vertices.len());
            }

            limiter.wait();
        }

        println!("{}", Overlay::for_state(session.state()).score);
        log::info!("Demo finished after {} completed runs", session.runs());
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }
}
