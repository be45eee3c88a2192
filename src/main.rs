//! Tea Museum entry point
//!
//! On the web, mounts every widget the page has room for and routes the
//! keyboard. Natively, plays a scripted headless session through the same
//! state machines and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use wasm_bindgen::prelude::*;

    use tea_museum::Settings;
    use tea_museum::sim::{KeyCommand, KeyContext, route_key};
    use tea_museum::view::{
        self, contest, contest::SharedContest, gallery, gallery::SharedGallery, sequencer,
        sequencer::SharedSequencer, tutorial,
    };

    /// Every widget mounted on this page, built once and cloned into handlers
    #[derive(Clone, Default)]
    struct App {
        sequencer: Option<SharedSequencer>,
        contest: Option<SharedContest>,
        gallery: Option<SharedGallery>,
    }

    impl App {
        fn key_context(&self) -> KeyContext {
            KeyContext {
                sequencer_can_advance: self
                    .sequencer
                    .as_ref()
                    .is_some_and(|s| s.borrow().can_advance()),
                contest_can_play: self
                    .contest
                    .as_ref()
                    .is_some_and(|c| c.borrow().can_play()),
            }
        }

        fn dispatch(&self, command: KeyCommand) {
            match command {
                KeyCommand::AdvanceStep => {
                    if let Some(s) = &self.sequencer {
                        sequencer::advance(s);
                    }
                }
                KeyCommand::PlayCategory(category) => {
                    if let Some(c) = &self.contest {
                        contest::play_round(c, category);
                    }
                }
                KeyCommand::NextWare => {
                    if let Some(g) = &self.gallery {
                        gallery::next(g);
                    }
                }
                KeyCommand::PreviousWare => {
                    if let Some(g) = &self.gallery {
                        gallery::previous(g);
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Tea museum widgets starting...");

        let document = match view::document() {
            Ok(document) => document,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut app = App::default();

        // Museum page widgets share the customs scene
        match view::mount_point(&document, ".customs-scene") {
            Ok(container) => {
                app.sequencer = sequencer::mount(&document, &container, &settings, seed)
                    .map_err(|e| log::error!("Whisking simulator not mounted: {}", e))
                    .ok();
                app.contest = contest::mount(&document, &container, &settings, seed.wrapping_add(1))
                    .map_err(|e| log::error!("Tea contest not mounted: {}", e))
                    .ok();
                app.gallery = gallery::mount(&document, &container, &settings)
                    .map_err(|e| log::error!("Tea-ware gallery not mounted: {}", e))
                    .ok();
            }
            Err(e) => log::error!("No mount point for museum widgets: {}", e),
        }

        // Tutorial page only
        if document.query_selector(".brewing-steps").ok().flatten().is_some() {
            if let Err(e) = tutorial::mount(&document, &settings) {
                log::error!("Tutorial navigation not mounted: {}", e);
            }
        }
        if let Err(e) = tutorial::mount_video(&document) {
            log::debug!("No video controls: {}", e);
        }

        setup_keyboard(app);

        log::info!("Tea museum widgets ready (seed {})", seed);
    }

    fn setup_keyboard(app: App) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(command) = route_key(&event.code(), app.key_context()) else {
                return;
            };
            if command.prevents_default() {
                event.prevent_default();
            }
            app.dispatch(command);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tea museum (native) starting...");
    log::info!("Widgets need a browser - build for wasm32 and serve the page for the real thing");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session over the pure state machines
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use tea_museum::Settings;
    use tea_museum::sim::{
        Category, ContestGame, GalleryBrowser, SeededRandom, StepSequencer, Transition,
        VideoStepNav, song_tea_set,
    };

    pub fn run(seed: u64) {
        let settings = Settings::load();
        let mut rng = SeededRandom::new(seed);
        log::info!("Seed {}", seed);

        whisking(&mut rng);
        contest(&settings, &mut rng);
        gallery(&settings);
        tutorial();
    }

    fn whisking(rng: &mut SeededRandom) {
        let mut seq = StepSequencer::whisking();
        let mut clock = 0.0;
        let mut transition = seq.toggle_auto_play(clock, rng);
        while let Transition::Entered {
            index,
            next_tick: Some(tick),
        } = transition
        {
            log::info!(
                "[{}] {} {} - quality {:.0}%",
                seq.elapsed_label(clock),
                seq.steps()[index].icon,
                seq.steps()[index].name,
                seq.state().quality
            );
            clock += tick.delay_ms as f64;
            transition = seq.auto_tick(tick, rng);
        }
        if let Transition::Finished(result) = transition {
            log::info!(
                "[{}] {} ({:.0}%) {}",
                seq.elapsed_label(clock),
                result.grade.label(),
                result.quality,
                result.grade.verse()
            );
        }
    }

    fn contest(settings: &Settings, rng: &mut SeededRandom) {
        let mut game = ContestGame::new(settings.max_rounds);
        game.start_game();
        let mut categories = Category::ALL.iter().cycle();
        while game.can_play() {
            let Some(&category) = categories.next() else { break };
            game.play_round(category, rng);
        }
        game.end_game();
        for entry in &game.log {
            log::info!("{}", entry.message);
        }
    }

    fn gallery(settings: &Settings) {
        let Ok(gallery) = GalleryBrowser::new(song_tea_set()) else {
            return;
        };
        let mut gallery = gallery.with_rotation_step(settings.rotation_step_deg);
        for _ in 0..gallery.items().len() {
            let ware = gallery.current();
            log::info!(
                "{} - {} ({})",
                ware.name,
                ware.description,
                ware.preview_background()
            );
            gallery.next();
        }
    }

    fn tutorial() {
        let mut nav = VideoStepNav::new(5);
        while let Some(change) = nav.next() {
            log::info!("Step {} - cue {} Hz", nav.position_label(), change.cue_hz);
        }
        nav.mark_all_complete();
        log::info!("All {} tutorial steps complete", nav.len());
    }
}
