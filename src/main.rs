//! Arena Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use arena_shooter::audio::WebAudio;
    use arena_shooter::platform::{HudSink, HudSnapshot, InputState, NullSurface};
    use arena_shooter::renderer::RenderState;
    use arena_shooter::{Session, Settings, Tuning};

    /// HUD backed by DOM text nodes
    struct DomHud {
        document: Document,
        last: Option<HudSnapshot>,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl HudSink for DomHud {
        fn update(&mut self, hud: &HudSnapshot) {
            // Skip DOM writes when nothing changed
            if self.last.as_ref() == Some(hud) {
                return;
            }
            self.set_text("score", &hud.score.to_string());
            self.set_text("kills", &hud.kills.to_string());
            self.set_text("health", &format!("\u{2764} {}", hud.health));
            self.set_text("ammo-count", &hud.ammo.to_string());
            self.last = Some(*hud);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        render_state: Option<RenderState>,
        audio: WebAudio,
        hud: DomHud,
        /// An animation frame is scheduled
        loop_active: bool,
    }

    impl Game {
        fn frame(&mut self, time: f64) -> bool {
            let Game {
                session,
                input,
                render_state,
                audio,
                hud,
                ..
            } = self;
            match render_state.as_mut() {
                Some(render) => session.frame(time, input, render, hud, audio),
                None => session.frame(time, input, &mut NullSurface, hud, audio),
            }
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.input.clear();
            self.hud.last = None;
            self.session.start(seed);
            self.audio.resume();
            set_menu_visible(&self.hud.document, false);
        }

        fn stop(&mut self) {
            self.session.stop();
            self.input.clear();
            set_menu_visible(&self.hud.document, true);
        }
    }

    fn set_menu_visible(document: &Document, visible: bool) {
        let Some(menu) = document
            .get_element_by_id("menu")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        let _ = menu.style().set_property("display", display);
    }

    /// Read an optional JSON config block from the page
    fn config_text(document: &Document, id: &str) -> Option<String> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = config_text(document, "tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arena Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("c")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = fit_canvas(&window, &canvas);

        let tuning = load_tuning(&document);
        let settings = config_text(&document, "settings")
            .map(|json| Settings::from_json(&json))
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            audio: WebAudio::new(&settings),
            session: Session::new(tuning, settings, seed),
            input: InputState::new(),
            render_state: None,
            hud: DomHud {
                document: document.clone(),
                last: None,
            },
            loop_active: false,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => {
                log::info!("Using adapter: {:?}", adapter.get_info().name);
                match RenderState::new(surface, &adapter, width, height).await {
                    Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::error!("Failed to create device: {}", e),
                }
            }
            Err(e) => log::error!("No graphics adapter: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_menu(game.clone());
        setup_focus_handlers(game.clone());
        setup_resize(canvas, game);

        // Start menu shows by default
        set_menu_visible(&document, true);
        log::info!("Arena Shooter ready");
    }

    /// Size the canvas backing store to its CSS box
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_menu(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
                ensure_loop(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("spawnBotBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let id = game.borrow_mut().session.spawn_bot();
                log::info!("Spawned bot {}", id);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().stop();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard: held state by physical key code
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.code()) && event.code() == "Space" {
                    // Don't scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the canvas captures the pointer
        {
            let canvas_clone = canvas.clone();
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if !game.borrow().input.pointer_locked {
                    canvas_clone.request_pointer_lock();
                }
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer lock change
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let document = web_sys::window().unwrap().document().unwrap();
                let locked = document.pointer_lock_element().is_some();
                log::debug!("Pointer lock: {}", locked);
                game.borrow_mut().input.pointer_locked = locked;
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Relative mouse motion turns the player
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input
                    .add_mouse_delta(event.movement_x() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Left button fires
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if event.button() == 0 && g.session.is_running() {
                    g.input.request_fire();
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Quick tap fires
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.session.is_running() {
                    g.input.request_fire();
                }
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(true);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Block page scroll while playing on touch devices
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    /// Release held keys when focus leaves the page, or they stick
    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.clear();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let (w, h) = fit_canvas(&window, &canvas);
            if let Some(render) = game.borrow_mut().render_state.as_mut() {
                render.resize(w, h);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Schedule the loop unless a frame is already pending
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.loop_active {
            return;
        }
        g.loop_active = true;
        drop(g);
        request_animation_frame(game);
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
        let keep_going = {
            let mut g = game.borrow_mut();
            let ran = g.frame(time);
            g.loop_active = ran;
            ran
        };

        // A stopped session stops rescheduling
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_shooter::platform::{HudSink, HudSnapshot, InputState, NullAudio, NullSurface};
    use arena_shooter::{Session, Settings, Tuning};

    /// Logs the HUD whenever score or health changes
    struct LogHud(Option<HudSnapshot>);

    impl HudSink for LogHud {
        fn update(&mut self, hud: &HudSnapshot) {
            let changed = self
                .0
                .is_none_or(|last| last.score != hud.score || last.health != hud.health);
            if changed {
                log::info!(
                    "score {} | kills {} | health {} | ammo {}",
                    hud.score,
                    hud.kills,
                    hud.health,
                    hud.ammo
                );
            }
            self.0 = Some(*hud);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arena Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let mut session = Session::new(Tuning::default(), Settings::default(), seed);
    session.start(seed);

    // Spin slowly in place, holding the trigger: one minute at 60 fps
    let mut input = InputState::new();
    input.pointer_locked = true;
    let mut hud = LogHud(None);
    for frame in 0..3600u32 {
        input.add_mouse_delta(4.0);
        input.request_fire();
        let now_ms = frame as f64 * 1000.0 / 60.0;
        session.frame(now_ms, &mut input, &mut NullSurface, &mut hud, &mut NullAudio);
    }

    let player = &session.state().player;
    log::info!(
        "Demo finished: score {}, kills {}, bots left {}",
        player.score,
        player.kills,
        session.state().bots.len()
    );
    session.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
