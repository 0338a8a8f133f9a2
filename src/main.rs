//! Lane Runner entry point
//!
//! On the web: wires keyboard events, the animation-frame loop, reset timers
//! and DOM banners to the game core. Natively: runs the core headless on a
//! virtual clock and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::{Rc, Weak};
    use std::time::Duration;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use lane_runner::RunRecords;
    use lane_runner::RunnerConfig;
    use lane_runner::platform::{Banner, Hud, Renderer, ResetTicket, Scene, Scheduler};
    use lane_runner::sim::RunnerGame;

    /// Pixels per world unit in the top-down view
    const SCALE: f64 = 24.0;
    /// How far ahead of the character the view reaches
    const VIEW_AHEAD: f32 = 30.0;

    /// Browser implementation of the game's host capabilities
    struct WebHost {
        document: Document,
        ctx: CanvasRenderingContext2d,
        size: (f64, f64),
        app: Weak<RefCell<App>>,
        loop_active: bool,
        frame_pending: bool,
        timers: HashMap<ResetTicket, i32>,
    }

    struct App {
        game: RunnerGame,
        host: WebHost,
        records: RunRecords,
    }

    impl Renderer for WebHost {
        fn render(&mut self, scene: &Scene<'_>) {
            let (w, h) = self.size;
            let ctx = &self.ctx;
            let origin_x = w / 2.0;
            // Character sits near the bottom; distance grows upward
            let origin_y = h - 3.0 * SCALE;
            let to_screen = |x: f32, z: f32| {
                (
                    origin_x + x as f64 * SCALE,
                    origin_y - (z - scene.character.z) as f64 * SCALE,
                )
            };

            ctx.set_fill_style_str("#2d5a27");
            ctx.fill_rect(0.0, 0.0, w, h);

            // Path (5 units wide), scrolled by the ground offset
            ctx.set_fill_style_str("#6b8e23");
            ctx.fill_rect(origin_x - 2.5 * SCALE, 0.0, 5.0 * SCALE, h);
            ctx.set_fill_style_str("#557a1f");
            let stripe = SCALE * 2.0;
            let offset = scene.view.ground_offset as f64 * stripe * 2.0;
            let mut y = -stripe * 2.0 + offset;
            while y < h {
                ctx.fill_rect(origin_x - 2.5 * SCALE, y, 5.0 * SCALE, stripe);
                y += stripe * 2.0;
            }

            // Obstacles in view
            ctx.set_fill_style_str("#ff0000");
            for obstacle in scene.obstacles {
                let ahead = obstacle.pos.z - scene.character.z;
                if !(-3.0..=VIEW_AHEAD).contains(&ahead) {
                    continue;
                }
                let (sx, sy) = to_screen(obstacle.pos.x, obstacle.pos.z);
                ctx.fill_rect(sx - SCALE / 2.0, sy - SCALE / 2.0, SCALE, SCALE);
            }

            // Character
            ctx.set_fill_style_str("#0000ff");
            let (sx, sy) = to_screen(scene.character.x, scene.character.z);
            ctx.fill_rect(sx - SCALE / 2.0, sy - SCALE / 2.0, SCALE, SCALE);

            if let Some(el) = self.document.get_element_by_id("distance") {
                el.set_text_content(Some(&format!("{:.0}", scene.character.z)));
            }
        }
    }

    impl Hud for WebHost {
        fn set_banner(&mut self, banner: Banner, visible: bool) {
            let Some(el) = banner_element(&self.document, banner) else {
                log::warn!("Missing banner element #{}", banner.element_id());
                return;
            };
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    impl Scheduler for WebHost {
        fn set_loop_active(&mut self, active: bool) {
            self.loop_active = active;
            if active && !self.frame_pending {
                self.frame_pending = true;
                request_animation_frame(self.app.clone());
            }
        }

        fn schedule_reset(&mut self, ticket: ResetTicket, delay: Duration) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let app = self.app.clone();
            let closure = Closure::once(move || {
                if let Some(app) = app.upgrade() {
                    let mut app = app.borrow_mut();
                    let App { game, host, .. } = &mut *app;
                    host.timers.remove(&ticket);
                    game.fire_reset(ticket, host);
                }
            });
            let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            ) {
                Ok(handle) => {
                    self.timers.insert(ticket, handle);
                }
                Err(e) => log::error!("setTimeout failed: {:?}", e),
            }
            closure.forget();
        }

        fn cancel_reset(&mut self, ticket: ResetTicket) {
            if let (Some(handle), Some(window)) = (self.timers.remove(&ticket), web_sys::window()) {
                window.clear_timeout_with_handle(handle);
            }
        }
    }

    /// Banner element by id; the level-complete banner is created on demand
    fn banner_element(document: &Document, banner: Banner) -> Option<HtmlElement> {
        if let Some(el) = document.get_element_by_id(banner.element_id()) {
            return el.dyn_into::<HtmlElement>().ok();
        }
        let el = document.create_element("div").ok()?;
        el.set_id(banner.element_id());
        el.set_text_content(Some(banner.text()));
        document.body()?.append_child(&el).ok()?;
        el.dyn_into::<HtmlElement>().ok()
    }

    fn request_animation_frame(app: Weak<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Weak<RefCell<App>>) {
        let Some(app) = app.upgrade() else {
            return;
        };
        let mut app = app.borrow_mut();
        let App {
            game,
            host,
            records,
        } = &mut *app;

        host.frame_pending = false;
        if !host.loop_active {
            return;
        }

        if let Some(outcome) = game.tick(host) {
            if records.record(&outcome) {
                log::info!("New best distance: {:.1}", records.best_distance);
            }
            records.save();
        }

        if host.loop_active && !host.frame_pending {
            host.frame_pending = true;
            request_animation_frame(host.app.clone());
        }
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                let App { game, host, .. } = &mut *app;
                game.on_key_name_down(&event.key(), host);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.on_key_name_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Lane Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas element")?
            .dyn_into()?;
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d canvas context unavailable")?
            .dyn_into()?;

        let config = RunnerConfig::load();
        let records = RunRecords::load();
        if !records.is_empty() {
            log::info!(
                "Best distance so far: {:.1} ({} attempts)",
                records.best_distance,
                records.attempts
            );
        }

        let app = Rc::new_cyclic(|weak| {
            RefCell::new(App {
                game: RunnerGame::new(config),
                host: WebHost {
                    document,
                    ctx,
                    size: (width as f64, height as f64),
                    app: weak.clone(),
                    loop_active: false,
                    frame_pending: false,
                    timers: HashMap::new(),
                },
                records,
            })
        });

        setup_input_handlers(app.clone())?;

        {
            let mut app = app.borrow_mut();
            let App { game, host, .. } = &mut *app;
            for banner in Banner::ALL {
                host.set_banner(banner, false);
            }
            game.start(host);
        }

        log::info!("Lane Runner running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};

    use lane_runner::platform::HeadlessHost;
    use lane_runner::sim::{Outcome, RunnerGame};
    use lane_runner::{CourseSpec, RunRecords, RunnerConfig};

    #[derive(Debug, Clone, Copy, ValueEnum)]
    enum CourseArg {
        Training,
        Full,
        Generated,
    }

    /// Run the lane runner headless on a virtual 60 Hz clock
    #[derive(Debug, Parser)]
    #[command(name = "lane-runner", version)]
    struct Args {
        /// Course to run (overrides the config file)
        #[arg(long, value_enum)]
        course: Option<CourseArg>,
        /// Seed for generated courses
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Obstacle count for generated courses
        #[arg(long, default_value_t = 20)]
        count: u32,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Stop after this many frames
        #[arg(long, default_value_t = 20_000)]
        frames: u32,
        /// Stop after this many finished runs
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Let the autopilot steer
        #[arg(long)]
        autopilot: bool,
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => RunnerConfig::load_file(path)?,
            None => RunnerConfig::default(),
        };
        if let Some(course) = args.course {
            config.course = match course {
                CourseArg::Training => CourseSpec::Training,
                CourseArg::Full => CourseSpec::Full,
                CourseArg::Generated => CourseSpec::Generated {
                    seed: args.seed,
                    count: args.count,
                },
            };
        }
        config.validate()?;

        log::info!("Lane Runner (native, headless) starting...");

        let mut game = RunnerGame::new(config);
        let mut host = HeadlessHost::new();
        let mut records = RunRecords::new();
        if args.autopilot {
            game.set_autopilot(true);
        }
        game.start(&mut host);

        let mut frames = 0;
        while frames < args.frames && records.attempts < args.runs {
            for outcome in host.advance(&mut game, 1) {
                match outcome {
                    Outcome::Collision {
                        obstacle_index,
                        distance,
                    } => log::info!(
                        "Run {}: hit obstacle {} at {:.1}",
                        records.attempts + 1,
                        obstacle_index,
                        distance
                    ),
                    Outcome::Finished { distance } => log::info!(
                        "Run {}: finished at {:.1}",
                        records.attempts + 1,
                        distance
                    ),
                }
                records.record(&outcome);
            }
            frames += 1;
        }

        println!(
            "runs: {}  finishes: {}  collisions: {}  best: {:.1}  frames: {}",
            records.attempts, records.finishes, records.collisions, records.best_distance, frames
        );
        if let Some(index) = records.deadliest_obstacle() {
            println!("deadliest obstacle: #{}", index);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}
