//! Frog Hop entry point
//!
//! On the web: wires the canvas, keyboard and a 16ms tick timer to a
//! [`Session`](frog_hop::Session). Natively: plays a headless demo run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use frog_hop::autopilot::demo_input;
    use frog_hop::consts::*;
    use frog_hop::platform::timer::{Interval, leak_callback};
    use frog_hop::platform::{dom, fresh_seed};
    use frog_hop::renderer::canvas::CanvasPainter;
    use frog_hop::renderer::{Palette, draw_list, hud};
    use frog_hop::settings::QueryOverrides;
    use frog_hop::sim::GamePhase;
    use frog_hop::{GameVariant, Session, Settings};

    /// Everything the page owns
    struct App {
        session: Session,
        settings: Settings,
        painter: CanvasPainter,
        /// Tick callback, created once
        tick_fn: Option<js_sys::Function>,
        /// Present only while the game is playing
        interval: Option<Interval>,
        /// Autopilot plays instead of the keyboard
        attract: bool,
    }

    impl App {
        /// Start the tick timer if the game is playing and none is running
        fn arm(&mut self) {
            if self.interval.is_some() || !self.session.is_running() {
                return;
            }
            if let Some(f) = &self.tick_fn {
                self.interval = Interval::start(f, TICK_MS);
            }
        }

        /// One timer firing: update, then render
        fn step(&mut self) {
            let phase = if self.attract {
                let input = demo_input(self.session.game());
                self.session.tick_with(&input)
            } else {
                self.session.tick()
            };
            self.present();

            if phase == GamePhase::GameOver {
                // Dropping the handle clears the timer
                self.interval = None;
            }
        }

        fn present(&self) {
            let game = self.session.game();
            self.painter.paint(&draw_list(game, &self.settings));

            let text = hud(game);
            dom::set_text("hud-score", &text.score);
            dom::set_text("hud-info", &text.instructions);
            match text.game_over {
                Some(lines) => {
                    dom::set_lines("game-over-summary", &lines);
                    dom::set_visible("game-over", true);
                }
                None => dom::set_visible("game-over", false),
            }
        }

        fn restart(&mut self) {
            let seed = fresh_seed();
            self.session.restart(seed);
            self.arm();
            self.present();
        }

        /// Persist accessibility toggles and redraw with them
        fn apply_settings(&mut self) {
            self.settings.save();
            self.painter.set_palette(Palette::for_settings(&self.settings));
            self.present();
        }

        fn switch_variant(&mut self) {
            let next = match self.session.game().variant() {
                GameVariant::Runner => GameVariant::Platformer,
                GameVariant::Platformer => GameVariant::Runner,
            };
            self.settings.variant = next;
            self.settings.save();

            self.interval = None;
            self.session.switch_variant(next, fresh_seed());
            self.arm();
            self.present();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Frog Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let query = window.location().search().unwrap_or_default();
        let overrides = QueryOverrides::parse(&query);
        let mut settings = Settings::load();
        settings.apply_overrides(&overrides);
        let seed = overrides.seed.unwrap_or_else(fresh_seed);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
            .expect("no 2d context");

        let app = Rc::new(RefCell::new(App {
            session: Session::new(settings.variant, seed),
            painter: CanvasPainter::new(ctx, Palette::for_settings(&settings)),
            settings,
            tick_fn: None,
            interval: None,
            attract: false,
        }));

        let tick_fn = {
            let app = app.clone();
            leak_callback(move || app.borrow_mut().step())
        };
        {
            let mut a = app.borrow_mut();
            a.tick_fn = Some(tick_fn);
            a.arm();
            a.present();
        }

        setup_keyboard(app.clone());
        setup_restart_button(app.clone());
        setup_blur(app);

        log::info!("Frog Hop running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut a = app.borrow_mut();
                if a.session.key_down(&code) {
                    // Keep Space/arrows from scrolling the page
                    event.prevent_default();
                }
                match code.as_str() {
                    "Enter" | "KeyR" if !a.session.is_running() => a.restart(),
                    "KeyI" => {
                        a.attract = !a.attract;
                        log::info!("Attract mode: {}", a.attract);
                    }
                    "KeyV" => a.switch_variant(),
                    "KeyH" => {
                        a.settings.high_contrast = !a.settings.high_contrast;
                        a.apply_settings();
                    }
                    "KeyM" => {
                        a.settings.reduced_motion = !a.settings.reduced_motion;
                        a.apply_settings();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().session.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No restart button; use Enter or R after a game over");
        }
    }

    /// Keys released while the window is unfocused never send keyup
    fn setup_blur(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().session.release_all();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::{Parser, ValueEnum};

    use frog_hop::autopilot::demo_input;
    use frog_hop::platform::fresh_seed;
    use frog_hop::renderer::hud;
    use frog_hop::{GameVariant, Session};

    /// Five minutes of play at 60 ticks per second
    const DEMO_TICKS: u32 = 5 * 60 * 60;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum VariantArg {
        Runner,
        Platformer,
    }

    impl From<VariantArg> for GameVariant {
        fn from(arg: VariantArg) -> Self {
            match arg {
                VariantArg::Runner => GameVariant::Runner,
                VariantArg::Platformer => GameVariant::Platformer,
            }
        }
    }

    /// Frog Hop headless demo - the autopilot plays one run
    #[derive(Debug, Parser)]
    #[command(name = "frog-hop")]
    #[command(about = "Play a headless Frog Hop run with the autopilot")]
    #[command(version)]
    pub struct Args {
        /// Game to play
        #[arg(value_enum, default_value_t = VariantArg::Runner)]
        pub variant: VariantArg,

        /// World seed (defaults to the clock)
        pub seed: Option<u64>,

        /// Print the final state as JSON
        #[arg(long)]
        pub dump: bool,
    }

    pub fn run(args: Args) {
        let variant = GameVariant::from(args.variant);
        let seed = args.seed.unwrap_or_else(fresh_seed);

        log::info!("Frog Hop (native) headless demo");

        let mut session = Session::new(variant, seed);
        let mut ticks = 0;
        while ticks < DEMO_TICKS && session.is_running() {
            let input = demo_input(session.game());
            session.tick_with(&input);
            ticks += 1;
        }

        let text = hud(session.game());
        println!("{} after {} ticks", text.score, ticks);
        for line in text.game_over.unwrap_or_default() {
            println!("  {}", line);
        }

        if args.dump {
            match serde_json::to_string_pretty(session.game()) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Could not serialize state: {}", e),
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    native::run(native::Args::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
