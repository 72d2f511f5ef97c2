//! Duel Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Most simulation steps run for a single wakeup or animation frame
const MAX_STEPS_PER_FRAME: u32 = 64;

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::error::Error;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use winit::application::ApplicationHandler;
    use winit::event::{ElementState, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::window::{Window, WindowId};

    use duel_pong::GameConfig;
    use duel_pong::platform::{FramePacer, StepClock, key_role_for_winit};
    use duel_pong::renderer::{RenderState, scene_vertices};
    use duel_pong::sim::{GameState, KeyState, tick};

    use super::MAX_STEPS_PER_FRAME;

    struct App {
        config: GameConfig,
        state: GameState,
        keys: KeyState,
        pacer: FramePacer,
        clock: StepClock,
        last_wake: Instant,
        /// Set while the post-round pause is running
        resume_at: Option<Instant>,
        window: Option<Arc<Window>>,
        render_state: Option<RenderState>,
    }

    impl App {
        fn new(config: GameConfig, seed: u64) -> Self {
            Self {
                state: GameState::new(&config, seed),
                keys: KeyState::default(),
                pacer: FramePacer::new(config.frame_period()),
                clock: StepClock::new(config.frame_rate, MAX_STEPS_PER_FRAME),
                last_wake: Instant::now(),
                resume_at: None,
                window: None,
                render_state: None,
                config,
            }
        }

        fn title(&self) -> String {
            format!("Pong - {}", self.state.score)
        }

        /// Run every step owed since the last wakeup
        fn step(&mut self, now: Instant) {
            let elapsed = now.duration_since(self.last_wake).as_secs_f64();
            self.last_wake = now;

            if let Some(until) = self.resume_at {
                if now < until {
                    return;
                }
                self.resume_at = None;
                self.clock.reset();
                return;
            }

            let steps = self.clock.advance(elapsed);
            for _ in 0..steps {
                let events = tick(&mut self.state, &self.keys, &self.config);
                if events.round_over.is_some() {
                    self.resume_at = Some(now + self.config.round_reset_delay());
                    if let Some(window) = &self.window {
                        window.set_title(&self.title());
                    }
                    break;
                }
            }

            if steps > 0 {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene_vertices(&self.state);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    async fn init_graphics(window: Arc<Window>, world: Vec2) -> Result<RenderState, Box<dyn Error>> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, size.width, size.height, world).await?;
        Ok(render_state)
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }

            let attributes = Window::default_attributes()
                .with_title(self.title())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                ))
                .with_resizable(false);

            let window = match event_loop.create_window(attributes) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let world = Vec2::new(self.config.window_width, self.config.window_height);
            match pollster::block_on(init_graphics(window.clone(), world)) {
                Ok(render_state) => self.render_state = Some(render_state),
                Err(e) => {
                    log::error!("Failed to initialize graphics: {}", e);
                    event_loop.exit();
                    return;
                }
            }

            self.window = Some(window);
            self.last_wake = Instant::now();
            self.pacer.restart();
        }

        fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Final score {}", self.state.score);
                    event_loop.exit();
                }
                WindowEvent::Resized(size) => {
                    if let Some(render_state) = &mut self.render_state {
                        render_state.resize(size.width, size.height);
                    }
                }
                WindowEvent::Focused(false) => {
                    self.keys.release_all();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some(role) = key_role_for_winit(event.physical_key) {
                        self.keys.set(role, event.state == ElementState::Pressed);
                    }
                }
                WindowEvent::RedrawRequested => {
                    self.render();
                }
                _ => {}
            }
        }

        fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_none() {
                return;
            }

            let now = Instant::now();
            if self.pacer.is_due(now) {
                self.step(now);
                self.pacer.advance(now);
            }

            let wake = match self.resume_at {
                Some(until) => until,
                None => self.pacer.deadline(),
            };
            event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }

    fn load_config() -> GameConfig {
        let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
            return GameConfig::default();
        };
        match GameConfig::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                GameConfig::default()
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        log::info!("Duel Pong (native) starting...");

        let config = load_config();
        let seed = config.seed.unwrap_or_else(clock_seed);
        log::info!(
            "{}x{} window, {} steps/s, seed {}",
            config.window_width,
            config.window_height,
            config.frame_rate,
            seed
        );

        let event_loop = EventLoop::new()?;
        let mut app = App::new(config, seed);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use duel_pong::GameConfig;
    use duel_pong::platform::{StepClock, key_role_for_code};
    use duel_pong::renderer::{RenderState, scene_vertices};
    use duel_pong::sim::{GameState, KeyState, tick};

    use super::MAX_STEPS_PER_FRAME;

    /// Game instance holding all state
    struct Game {
        config: GameConfig,
        state: GameState,
        keys: KeyState,
        clock: StepClock,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Animation-frame timestamp (ms) at which the post-round pause ends
        resume_at: Option<f64>,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64) -> Self {
            Self {
                state: GameState::new(&config, seed),
                keys: KeyState::default(),
                clock: StepClock::new(config.frame_rate, MAX_STEPS_PER_FRAME),
                render_state: None,
                last_time: 0.0,
                resume_at: None,
                config,
            }
        }

        /// Run simulation steps owed for this animation frame
        fn update(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                0.0
            };
            self.last_time = time;

            if let Some(until) = self.resume_at {
                if time < until {
                    return;
                }
                self.resume_at = None;
                self.clock.reset();
                return;
            }

            let steps = self.clock.advance(elapsed);
            for _ in 0..steps {
                let events = tick(&mut self.state, &self.keys, &self.config);
                if events.round_over.is_some() {
                    self.resume_at = Some(time + self.config.round_reset_delay_ms as f64);
                    self.update_hud();
                    break;
                }
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the score line in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Duel Pong starting...");

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

        let config = GameConfig::load_stored();
        // Written back so it can be edited from the browser devtools
        config.save_stored();

        // Backing store matches the playfield, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (config.window_width as f64 * dpr) as u32;
        let height = (config.window_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        // Display box follows the configured playfield shape
        if let Err(e) = canvas.style().set_property("aspect-ratio", &config.css_aspect_ratio()) {
            log::warn!("Could not set canvas aspect ratio: {:?}", e);
        }

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let world = Vec2::new(config.window_width, config.window_height);
        let game = Rc::new(RefCell::new(Game::new(config, seed)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("No usable GPU adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, world).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                return;
            }
        }

        game.borrow().update_hud();
        setup_input_handlers(game.clone());
        setup_focus_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Duel Pong running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        for (kind, held) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(role) = key_role_for_code(&event.code()) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                    game.borrow_mut().keys.set(role, held);
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keys released while the page is unfocused never arrive
    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::debug!("Window blur, keys released");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.keys.release_all();
                    // Time spent hidden is not credited on return
                    g.last_time = 0.0;
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
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
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
