//! Lunar Nightmare entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use lunar_nightmare::audio::AudioManager;
    use lunar_nightmare::consts::*;
    use lunar_nightmare::sim::tick::objective_line;
    use lunar_nightmare::Settings;
    use lunar_nightmare::sim::{Effect, GameState, TickInput, tick};

    // JS bindings for pointer lock and the three.js scene bridge. The scene
    // bridge forwards the frame snapshot to `window.sceneUpdate` when the
    // page defines one; without it the game still runs HUD-and-audio only.
    #[wasm_bindgen(inline_js = "
        export function request_pointer_lock() {
            const el = document.getElementById('viewport') || document.body;
            if (el && el.requestPointerLock) {
                el.requestPointerLock();
            }
        }

        export function scene_update(px, pz, eye, yaw, pitch,
                                     mx, mz, mvisible,
                                     rx, rz, kx, kz, distort) {
            if (typeof window.sceneUpdate === 'function') {
                window.sceneUpdate({
                    player: { x: px, z: pz, eye: eye, yaw: yaw, pitch: pitch },
                    monster: { x: mx, z: mz, visible: mvisible },
                    radioTower: { x: rx, z: rz },
                    rocket: { x: kx, z: kz },
                    distort: distort,
                });
            }
        }
    ")]
    extern "C" {
        fn request_pointer_lock();
        #[allow(clippy::too_many_arguments)]
        fn scene_update(
            px: f32,
            pz: f32,
            eye: f32,
            yaw: f32,
            pitch: f32,
            mx: f32,
            mz: f32,
            mvisible: bool,
            rx: f32,
            rz: f32,
            kx: f32,
            kz: f32,
            distort: bool,
        );
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        pointer_locked: bool,
        ambient_started: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            Self {
                state: GameState::new(seed),
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                pointer_locked: false,
                ambient_started: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let mut input = self.input;
                input.pointer_locked = self.pointer_locked;
                let effects = tick(&mut self.state, &input, SIM_DT);
                self.apply_effects(&effects);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.interact = false;
                self.input.look_dx = 0.0;
                self.input.look_dy = 0.0;
            }
        }

        /// Push the frame snapshot to the scene bridge
        fn render(&self) {
            let frame = self.state.render_frame();
            scene_update(
                frame.player_pos.x,
                frame.player_pos.y,
                frame.eye_height,
                frame.yaw,
                frame.pitch,
                frame.monster_pos.x,
                frame.monster_pos.y,
                frame.monster_visible,
                frame.radio_tower_pos.x,
                frame.radio_tower_pos.y,
                frame.rocket_pos.x,
                frame.rocket_pos.y,
                frame.distortion && !self.settings.reduced_motion,
            );
        }

        fn apply_effects(&mut self, effects: &[Effect]) {
            for effect in effects {
                match *effect {
                    Effect::HudOxygen(pct) => set_text("oxygen", &format!("Oxygen: {pct}%")),
                    Effect::HudObjective(text) => set_text("objective", text),
                    Effect::HudMessage(text) => set_text("message", text),
                    Effect::PlayCue(cue) => self.audio.play(cue),
                    Effect::SetLoopVolume(track, vol) => self.audio.set_loop_volume(track, vol),
                    Effect::SetLoopRate(track, rate) => self.audio.set_loop_rate(track, rate),
                    Effect::StopAmbient => self.audio.stop_ambient(),
                    Effect::SetDistortion(on) => {
                        set_body_filter(on && !self.settings.reduced_motion);
                    }
                    Effect::SessionReset => {
                        if self.ambient_started {
                            self.audio.start_ambient();
                        }
                        self.redraw_hud();
                    }
                }
            }
        }

        /// Full HUD redraw from current state (startup and session reset)
        fn redraw_hud(&self) {
            set_text("oxygen", &format!("Oxygen: {}%", self.state.oxygen_percent()));
            set_text("objective", objective_line(self.state.objectives.current()));
            set_text("message", "");
            set_body_filter(false);
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle the hallucination screen filter on the page body
    fn set_body_filter(on: bool) {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            let style = body.style();
            let filter = if on {
                "hue-rotate(90deg) saturate(2.5) contrast(1.3)"
            } else {
                ""
            };
            let _ = style.set_property("filter", filter);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lunar Nightmare starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow().redraw_hud();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_focus_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Lunar Nightmare running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Pointer lock change handler
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let document = web_sys::window().unwrap().document().unwrap();
                let locked = document.pointer_lock_element().is_some();
                game.borrow_mut().pointer_locked = locked;
                log::info!("Pointer lock: {}", locked);
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Mouse move - accumulate relative deltas while locked
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.pointer_locked {
                    g.input.look_dx += event.movement_x() as f32;
                    g.input.look_dy += event.movement_y() as f32;
                }
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - request pointer lock; first gesture also unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.ambient_started {
                    g.audio.start_ambient();
                    g.ambient_started = true;
                }
                if !g.pointer_locked {
                    drop(g);
                    request_pointer_lock();
                }
            });
            let _ = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => g.input.forward = true,
                    "KeyS" | "ArrowDown" => g.input.backward = true,
                    "KeyA" | "ArrowLeft" => g.input.left = true,
                    "KeyD" | "ArrowRight" => g.input.right = true,
                    "KeyE" => g.input.interact = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "KeyW" | "ArrowUp" => g.input.forward = false,
                    "KeyS" | "ArrowDown" => g.input.backward = false,
                    "KeyA" | "ArrowLeft" => g.input.left = false,
                    "KeyD" | "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden =
                    document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(hidden);
                }
                // Tab-hide is the one reliable moment to flush preferences
                if hidden {
                    g.settings.save();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur/focus
        {
            let game_blur = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game_blur.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(false);
                }
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

            g.update(dt);
            g.render();
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
    use lunar_nightmare::consts::SIM_DT;
    use lunar_nightmare::sim::{GameState, SessionPhase, TickInput, tick};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Lunar Nightmare (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    let input = TickInput::default();

    // Idle the simulation for half a minute as a smoke run
    for _ in 0..(30.0 / SIM_DT) as u64 {
        tick(&mut state, &input, SIM_DT);
        if state.phase == SessionPhase::GameOver {
            break;
        }
    }

    println!(
        "After 30s idle: oxygen {}%, phase {:?}, monster at {:.1} units",
        state.oxygen_percent(),
        state.phase,
        state.monster_distance()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
