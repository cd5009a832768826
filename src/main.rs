//! House Cup entry point
//!
//! Web: scoreboards plus the Cup Jump game on a 2D canvas.
//! Native: prints scoreboards and results from JSON files, then plays a
//! headless scripted demo run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};
    use std::time::Duration;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AbortController, AddEventListenerOptions, CanvasRenderingContext2d, Document, Element,
        EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, RequestInit, Response,
        TouchEvent, Window,
    };

    use house_cup::consts::*;
    use house_cup::sim::{Aabb, GamePhase, GameState, TickInput, avatar_box, obstacle_box, tick};
    use house_cup::results::{FilterContext, FilteredRecord, apply_filter};
    use house_cup::source::{self, Competition, SourceError};
    use house_cup::{HighScores, ScoreField, Scoreboards, Settings, SourceConfig, Standings};

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    /// DOM listener, removed from its target on drop
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn new(
            target: &EventTarget,
            kind: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Result<Self, JsValue> {
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
            target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
            Ok(Self {
                target: target.clone(),
                kind,
                callback,
            })
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
        }
    }

    /// `setInterval` timer, cleared on drop
    struct IntervalGuard {
        window: Window,
        handle: i32,
        _callback: Closure<dyn FnMut()>,
    }

    impl IntervalGuard {
        fn new(window: &Window, period_ms: f64, handler: impl FnMut() + 'static) -> Result<Self, JsValue> {
            let callback = Closure::<dyn FnMut()>::new(handler);
            let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            )?;
            Ok(Self {
                window: window.clone(),
                handle,
                _callback: callback,
            })
        }
    }

    impl Drop for IntervalGuard {
        fn drop(&mut self) {
            self.window.clear_interval_with_handle(self.handle);
        }
    }

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// Self-rescheduling `requestAnimationFrame` loop, cancelled on drop
    struct FrameGuard {
        window: Window,
        handle: Rc<Cell<Option<i32>>>,
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl FrameGuard {
        fn start(window: &Window, game: Rc<RefCell<Game>>) -> Result<Self, JsValue> {
            let handle = Rc::new(Cell::new(None));
            let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

            let this = Rc::downgrade(&callback);
            let next = handle.clone();
            let win = window.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                next.set(None);
                game.borrow_mut().frame(time);

                let Some(callback) = this.upgrade() else {
                    return;
                };
                if let Some(callback) = callback.borrow().as_ref() {
                    match win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(id) => next.set(Some(id)),
                        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                    }
                }
            }));

            if let Some(first) = callback.borrow().as_ref() {
                handle.set(Some(window.request_animation_frame(first.as_ref().unchecked_ref())?));
            }

            Ok(Self {
                window: window.clone(),
                handle,
                callback,
            })
        }
    }

    impl Drop for FrameGuard {
        fn drop(&mut self) {
            if let Some(id) = self.handle.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            self.callback.borrow_mut().take();
        }
    }

    /// Everything a page visit owns; dropping it stops the game
    struct Session {
        _listeners: Vec<Listener>,
        _frame: FrameGuard,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        last_time: f64,
        settings: Settings,
        highscores: HighScores,
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Backdrop timer for the current run
        backdrop: Option<IntervalGuard>,
        this: Weak<RefCell<Game>>,
    }

    impl Game {
        /// Run one tick and repaint
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                NOMINAL_FRAME_MS
            };
            self.last_time = time;

            let outcome = tick(&mut self.state, &self.input, dt);
            self.input.clear_events();

            if outcome.started {
                self.start_backdrop_cycle();
            }
            if outcome.collided_with.is_some() {
                self.backdrop = None;
                self.record_run();
            }
            if self.state.cosmetics.custom_avatar != self.settings.custom_avatar {
                self.settings.custom_avatar = self.state.cosmetics.custom_avatar;
                self.settings.save();
            }

            self.draw();
            self.update_hud();
        }

        /// Replace the backdrop timer for a fresh run
        fn start_backdrop_cycle(&mut self) {
            self.backdrop = None;
            if !self.settings.effective_backdrop_cycle() {
                return;
            }
            let game = self.this.clone();
            let guard = IntervalGuard::new(&self.window, BACKDROP_TOGGLE_MS, move || {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().input.toggle_backdrop = true;
                }
            });
            match guard {
                Ok(guard) => self.backdrop = Some(guard),
                Err(e) => log::warn!("Backdrop timer unavailable: {:?}", e),
            }
        }

        fn record_run(&mut self) {
            let score = self.state.score;
            if let Some(rank) = self
                .highscores
                .add_score(score, self.state.speed, js_sys::Date::now())
            {
                log::info!("Run of {} placed #{}", score, rank);
                self.highscores.save();
            }
        }

        fn resize_canvas(&mut self, width: f32) {
            self.canvas.set_width(width.max(0.0) as u32);
            self.canvas.set_height(GAME_HEIGHT as u32);
            self.input.resize = Some(width);
        }

        fn draw(&self) {
            let ctx = &self.ctx;
            let width = f64::from(self.state.viewport.width);
            let (background, avatar_color) = if self.state.cosmetics.dark_backdrop {
                ("#111827", "#f9fafb")
            } else {
                ("#f9fafb", "#111827")
            };

            ctx.set_fill_style_str(background);
            ctx.fill_rect(0.0, 0.0, width, f64::from(GAME_HEIGHT));

            let skin = if self.state.cosmetics.custom_avatar {
                "#f59e0b"
            } else {
                avatar_color
            };
            ctx.set_fill_style_str(skin);
            fill_box(ctx, &avatar_box(&self.state.avatar, &self.state.viewport));

            ctx.set_fill_style_str("#eab308");
            for obstacle in &self.state.obstacles {
                fill_box(ctx, &obstacle_box(obstacle));
            }
        }

        fn update_hud(&self) {
            set_text(&self.document, "score", &self.state.score.to_string());
            set_text(&self.document, "high-score", &self.state.high_score.to_string());
            set_hidden(&self.document, "start-overlay", self.state.phase != GamePhase::Idle);
            set_hidden(&self.document, "game-over", self.state.phase != GamePhase::GameOver);
            if self.state.phase == GamePhase::GameOver {
                set_text(&self.document, "final-score", &self.state.score.to_string());
            }
            set_hidden(&self.document, "debug", !self.settings.show_debug);
            if self.settings.show_debug {
                let line = format!(
                    "tick {} | speed {:.1} | cups {}",
                    self.state.ticks,
                    self.state.scaled_speed(),
                    self.state.obstacles.len()
                );
                set_text(&self.document, "debug", &line);
            }
        }
    }

    fn fill_box(ctx: &CanvasRenderingContext2d, aabb: &Aabb) {
        let size = aabb.max - aabb.min;
        ctx.fill_rect(
            f64::from(aabb.min.x),
            f64::from(aabb.min.y),
            f64::from(size.x),
            f64::from(size.y),
        );
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn js_error(e: JsValue) -> SourceError {
        SourceError::Request(format!("{:?}", e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("House Cup starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let body = document.body().ok_or("no body")?;
        let config = SourceConfig::from_lookup(|key| body.get_attribute(&data_attribute(key)));

        start_game(&window, &document)?;
        let boards = load_standings(&window, &document, &config).await;
        for competition in Competition::ALL {
            load_results(&window, &document, &config, competition, &boards).await;
        }

        log::info!("House Cup running!");
        Ok(())
    }

    /// `HOUSE_CUP_API_BASE` -> `data-house-cup-api-base`
    fn data_attribute(key: &str) -> String {
        format!("data-{}", key.to_lowercase().replace('_', "-"))
    }

    fn start_game(window: &Window, document: &Document) -> Result<(), JsValue> {
        let container = document
            .get_element_by_id("game-container")
            .ok_or("no game container")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let highscores = HighScores::load();
        let width = container.client_width() as f32;
        let mut state = GameState::new(width).with_high_score(highscores.top_score().unwrap_or(0));
        state.cosmetics = settings.cosmetics();

        let game = Rc::new_cyclic(|this| {
            RefCell::new(Game {
                state,
                input: TickInput::default(),
                last_time: 0.0,
                settings,
                highscores,
                window: window.clone(),
                document: document.clone(),
                canvas,
                ctx,
                backdrop: None,
                this: this.clone(),
            })
        });
        game.borrow_mut().resize_canvas(width);

        let listeners = setup_input_handlers(window, document, &container, &game)?;
        let frame = FrameGuard::start(window, game)?;

        SESSION.with(|session| {
            *session.borrow_mut() = Some(Session {
                _listeners: listeners,
                _frame: frame,
            });
        });

        // Teardown on page hide; not a guarded listener since it drops the guards
        let teardown = Closure::once_into_js(move |_event: web_sys::Event| {
            SESSION.with(|session| session.borrow_mut().take());
            log::info!("Session closed");
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "pagehide",
            teardown.unchecked_ref(),
            &options,
        )?;

        Ok(())
    }

    fn setup_input_handlers(
        window: &Window,
        document: &Document,
        container: &Element,
        game: &Rc<RefCell<Game>>,
    ) -> Result<Vec<Listener>, JsValue> {
        let mut listeners = Vec::new();

        // Keyboard
        {
            let game = game.clone();
            listeners.push(Listener::new(window, "keydown", move |event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                    if game.borrow_mut().input.apply_key_code(&key.code()) {
                        event.prevent_default();
                    }
                }
            })?);
        }

        // Click anywhere on the playfield
        {
            let game = game.clone();
            listeners.push(Listener::new(container, "click", move |_event| {
                game.borrow_mut().input.jump = true;
            })?);
        }

        // Touch, except the hidden corner
        {
            let game = game.clone();
            let target = container.clone();
            listeners.push(Listener::new(container, "touchstart", move |event| {
                let Some(touch) = event.dyn_ref::<TouchEvent>().and_then(|t| t.touches().get(0)) else {
                    return;
                };
                let rect = target.get_bounding_client_rect();
                let x = (f64::from(touch.client_x()) - rect.left()) as f32;
                let y = (f64::from(touch.client_y()) - rect.top()) as f32;
                if game.borrow_mut().input.apply_touch(x, y) {
                    event.prevent_default();
                }
            })?);
        }

        // Start / Play Again
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listeners.push(Listener::new(&btn, "click", move |event| {
                    event.stop_propagation();
                    game.borrow_mut().input.restart = true;
                })?);
            }
        }

        // Hidden avatar button
        if let Some(btn) = document.get_element_by_id("secret-btn") {
            let game = game.clone();
            listeners.push(Listener::new(&btn, "click", move |event| {
                event.stop_propagation();
                game.borrow_mut().input.secret_tap = true;
            })?);
        }

        // Resize
        {
            let game = game.clone();
            let target = container.clone();
            listeners.push(Listener::new(window, "resize", move |_event| {
                game.borrow_mut().resize_canvas(target.client_width() as f32);
            })?);
        }

        Ok(listeners)
    }

    /// Fetch a URL as text, aborting after `timeout`
    async fn fetch_text(window: &Window, url: &str, timeout: Duration) -> Result<String, SourceError> {
        let controller = AbortController::new().map_err(js_error)?;
        let signal = controller.signal();
        let abort = Closure::once(move || controller.abort());
        let timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                abort.as_ref().unchecked_ref(),
                timeout.as_millis() as i32,
            )
            .map_err(js_error)?;

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_signal(Some(&signal));

        let result = async {
            let response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
                .await
                .map_err(|e| {
                    if signal.aborted() {
                        SourceError::Timeout(timeout.as_millis() as u64)
                    } else {
                        js_error(e)
                    }
                })?;
            let response: Response = response.dyn_into().map_err(js_error)?;
            if !response.ok() {
                return Err(SourceError::Status(response.status()));
            }
            let text = JsFuture::from(response.text().map_err(js_error)?)
                .await
                .map_err(js_error)?;
            text.as_string()
                .ok_or_else(|| SourceError::Request("response body is not text".to_string()))
        }
        .await;

        window.clear_timeout_with_handle(timer);
        drop(abort);
        result
    }

    async fn load_standings(window: &Window, document: &Document, config: &SourceConfig) -> Scoreboards {
        let fetched = fetch_text(window, &config.houses_url(), config.fetch_timeout)
            .await
            .and_then(|json| source::decode_houses(&json));
        let loaded = source::load_houses(fetched);

        if let Some(advisory) = &loaded.advisory {
            set_text(document, "advisory", advisory);
        }
        set_hidden(document, "advisory", loaded.advisory.is_none());

        let boards = Scoreboards::project(&loaded.data);
        if let Err(e) = render_standings(document, &boards) {
            log::error!("Failed to render standings: {:?}", e);
        }
        boards
    }

    async fn load_results(
        window: &Window,
        document: &Document,
        config: &SourceConfig,
        competition: Competition,
        boards: &Scoreboards,
    ) {
        let fetched = fetch_text(window, &config.results_url(competition), config.fetch_timeout)
            .await
            .and_then(|json| source::decode_event_rows(&json));
        let loaded = source::load_event_rows(competition, fetched);
        let records = apply_filter(&loaded.data, &FilterContext::all());

        let id = format!("results-{}", competition.as_str().to_lowercase());
        let Some(root) = document.get_element_by_id(&id) else {
            return;
        };
        let leader = boards
            .board(competition.score_field())
            .leader()
            .map(|entry| entry.house.name.as_str());
        let advisory = loaded.advisory.as_deref();
        if let Err(e) = render_results(document, &root, leader, advisory, &records) {
            log::error!("Failed to render {} results: {:?}", competition.as_str(), e);
        }
    }

    fn render_results(
        document: &Document,
        root: &Element,
        leader: Option<&str>,
        advisory: Option<&str>,
        records: &[FilteredRecord],
    ) -> Result<(), JsValue> {
        root.set_text_content(None);
        if let Some(leader) = leader {
            let line = document.create_element("p")?;
            line.class_list().add_1("leader")?;
            line.set_text_content(Some(&format!("Leading: {leader}")));
            root.append_child(&line)?;
        }
        if let Some(advisory) = advisory {
            let line = document.create_element("p")?;
            line.class_list().add_1("advisory")?;
            line.set_text_content(Some(advisory));
            root.append_child(&line)?;
        }

        let list = document.create_element("ul")?;
        for record in records {
            let base = &record.base;
            let item = document.create_element("li")?;
            let title = document.create_element("strong")?;
            title.set_text_content(Some(&base.event));
            item.append_child(&title)?;
            for (position, placement) in base.placements() {
                let line = document.create_element("div")?;
                let names = if base.is_group_event() {
                    placement.houses.joined()
                } else {
                    placement.names.joined()
                };
                line.set_text_content(Some(&format!(
                    "{} {}",
                    position.label(),
                    names.unwrap_or_else(|| "-".to_string())
                )));
                item.append_child(&line)?;
            }
            list.append_child(&item)?;
        }
        root.append_child(&list)?;
        Ok(())
    }

    fn board_title(field: ScoreField) -> &'static str {
        match field {
            ScoreField::Points => "Overall",
            ScoreField::Layatharang => "Layatharang",
            ScoreField::Chakravyuh => "Chakravyuh",
        }
    }

    fn render_standings(document: &Document, boards: &Scoreboards) -> Result<(), JsValue> {
        let Some(root) = document.get_element_by_id("standings") else {
            return Ok(());
        };
        root.set_text_content(None);

        for field in ScoreField::ALL {
            let section = document.create_element("section")?;
            let title = document.create_element("h3")?;
            title.set_text_content(Some(board_title(field)));
            section.append_child(&title)?;
            render_board(document, &section, boards.board(field))?;
            root.append_child(&section)?;
        }
        Ok(())
    }

    fn render_board(document: &Document, section: &Element, standings: &Standings) -> Result<(), JsValue> {
        let list = document.create_element("ol")?;
        for (i, entry) in standings.entries.iter().enumerate() {
            let item = document.create_element("li")?;
            if i < standings.podium().len() {
                item.class_list().add_1("podium")?;
            }
            let label = document.create_element("span")?;
            label.set_text_content(Some(&format!("{}. {} - {}", entry.rank, entry.house.name, entry.score)));
            item.append_child(&label)?;

            let bar: HtmlElement = document.create_element("div")?.dyn_into()?;
            bar.class_list().add_1("bar")?;
            let style = bar.style();
            style.set_property("width", &format!("{:.1}%", standings.progress(entry) * 100.0))?;
            style.set_property("background-color", &entry.house.color)?;
            item.append_child(&bar)?;

            list.append_child(&item)?;
        }
        section.append_child(&list)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use house_cup::consts::*;
    use house_cup::results::{FilterContext, FilterOptions, FilteredRecord, Position, apply_filter};
    use house_cup::sim::{GameState, Interval, TickInput, tick};
    use house_cup::source::{self, Competition, RevalidateRequest, SourceError};
    use house_cup::{HighScores, ScoreField, Scoreboards, Settings, SourceConfig};

    use clap::Parser;

    /// Demo runs stop after this many ticks (about a minute at 60 fps)
    const DEMO_TICKS: u32 = 3600;
    /// The scripted demo presses jump once every this many ticks
    const DEMO_JUMP_EVERY: u32 = 40;

    #[derive(Parser, Debug)]
    #[command(name = "house-cup")]
    #[command(about = "Print house standings and event results, then play a demo run", long_about = None)]
    pub struct Args {
        /// JSON files in order: houses, Layatharang results, Chakravyuh results
        #[arg(value_name = "FILE", num_args = 0..=3)]
        files: Vec<String>,

        /// Event, participant or house to filter results by ("all" for everything)
        #[arg(long)]
        filter: Option<String>,

        /// Check a revalidation request: `<token>[:<path>]`
        #[arg(long, value_name = "TOKEN[:PATH]")]
        revalidate: Option<String>,
    }

    fn read_json(path: Option<&String>) -> Result<String, SourceError> {
        let path = path.ok_or_else(|| SourceError::Request("no file given".to_string()))?;
        Ok(std::fs::read_to_string(path)?)
    }

    pub fn run(config: &SourceConfig, args: &Args) {
        if let Some(arg) = &args.revalidate {
            revalidate(config, arg);
        }

        let houses = source::load_houses(
            read_json(args.files.first()).and_then(|json| source::decode_houses(&json)),
        );
        if let Some(advisory) = &houses.advisory {
            println!("! {advisory}");
        }
        let boards = Scoreboards::project(&houses.data);
        print_scoreboards(&boards);

        for (i, competition) in Competition::ALL.into_iter().enumerate() {
            let rows = source::load_event_rows(
                competition,
                read_json(args.files.get(i + 1)).and_then(|json| source::decode_event_rows(&json)),
            );
            let options = FilterOptions::from_rows(&rows.data);
            let ctx = match &args.filter {
                Some(value) => FilterContext::resolve(value, &options),
                None => FilterContext::all(),
            };
            let records = apply_filter(&rows.data, &ctx);
            println!("\n== {} ({:?} \"{}\") ==", competition.as_str(), ctx.mode, ctx.value);
            if let Some(leader) = boards.board(competition.score_field()).leader() {
                println!("  leading: {} ({})", leader.house.name, leader.score);
            }
            if records.is_empty() {
                println!("  no results");
            }
            for record in &records {
                print_record(record);
            }
        }

        play_demo();
    }

    fn revalidate(config: &SourceConfig, arg: &str) {
        let (token, path) = match arg.split_once(':') {
            Some((token, path)) => (token, Some(path.to_string())),
            None => (arg, None),
        };
        let request = RevalidateRequest {
            token: Some(token.to_string()),
            path,
        };
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        match source::revalidate(&request, config.revalidation_token.as_deref(), now) {
            Ok(ok) => println!("200 {}", serde_json::to_string(&ok).unwrap_or_default()),
            Err(e) => println!("{} {}", e.status(), e.body()),
        }
    }

    fn print_scoreboards(boards: &Scoreboards) {
        for field in ScoreField::ALL {
            let standings = boards.board(field);
            println!("\n== {} ==", field.as_str());
            if standings.is_empty() {
                println!("  no houses");
            }
            for entry in &standings.entries {
                let filled = (standings.progress(entry) * 20.0).round() as usize;
                let trophy = if entry.rank <= standings.podium().len() { "*" } else { " " };
                println!(
                    "{trophy} {:>2}. {:<12} {:>4} {}",
                    entry.rank,
                    entry.house.name,
                    entry.score,
                    "#".repeat(filled)
                );
            }
        }
    }

    fn print_record(record: &FilteredRecord) {
        let base = &record.base;
        let tag = if base.is_group_event() { " [group]" } else { "" };
        println!("- {}{}", base.event, tag);
        for (position, placement) in base.placements() {
            let names = record
                .filter
                .as_ref()
                .and_then(|f| f.names_at(position))
                .unwrap_or(&placement.names);
            println!(
                "    {:<6} {} ({})",
                position.label(),
                names.joined().unwrap_or_else(|| "-".to_string()),
                placement.houses.joined().unwrap_or_else(|| "-".to_string()),
            );
        }
        if let Some(projection) = &record.filter {
            let held: Vec<&str> = projection.positions.iter().map(Position::label).collect();
            println!("    {} placed: {}", projection.house, held.join(", "));
        }
    }

    /// Scripted inputs for demo tick `i`: start the run, then jump on a fixed beat
    fn demo_input(i: u32) -> TickInput {
        TickInput {
            restart: i == 0,
            jump: i > 0 && i % DEMO_JUMP_EVERY == 0,
            ..Default::default()
        }
    }

    /// Headless scripted run
    fn play_demo() {
        let settings = Settings::load();
        let mut highscores = HighScores::load();
        let mut state = GameState::new(DEFAULT_VIEWPORT_WIDTH)
            .with_high_score(highscores.top_score().unwrap_or(0));
        state.cosmetics = settings.cosmetics();

        let mut backdrop = Interval::new(BACKDROP_TOGGLE_MS);
        let mut flip_pending = false;
        let mut toggles = 0;

        for i in 0..DEMO_TICKS {
            let mut input = demo_input(i);
            input.toggle_backdrop = std::mem::take(&mut flip_pending);
            let outcome = tick(&mut state, &input, NOMINAL_FRAME_MS);

            if outcome.started {
                backdrop.reset();
            }
            if outcome.collided_with.is_some() {
                break;
            }
            if settings.effective_backdrop_cycle() && backdrop.advance(NOMINAL_FRAME_MS) % 2 == 1 {
                flip_pending = true;
                toggles += 1;
            }
        }

        if let Some(rank) = highscores.add_score(state.score, state.speed, 0.0) {
            highscores.save();
            log::info!("Demo run placed #{}", rank);
        }
        println!(
            "\nCup Jump demo: {:?} after {} ticks, score {}, speed {:.1}, backdrop flips {}",
            state.phase, state.ticks, state.score, state.speed, toggles
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_parse_files_and_flags() {
            let args = Args::try_parse_from([
                "house-cup",
                "--filter",
                "Red",
                "--revalidate=s3cret:/results",
                "houses.json",
                "layatharang.json",
            ])
            .unwrap();
            assert_eq!(args.files, vec!["houses.json", "layatharang.json"]);
            assert_eq!(args.filter.as_deref(), Some("Red"));
            assert_eq!(args.revalidate.as_deref(), Some("s3cret:/results"));
        }

        #[test]
        fn test_args_reject_mistyped_flag() {
            assert!(Args::try_parse_from(["house-cup", "--filtr=Red"]).is_err());
            assert!(Args::try_parse_from(["house-cup", "a.json", "b.json", "c.json", "d.json"]).is_err());
        }

        #[test]
        fn test_demo_input_starts_then_jumps_on_beat() {
            assert!(demo_input(0).restart);
            assert!(!demo_input(0).jump);
            assert!(!demo_input(1).jump);
            assert!(demo_input(DEMO_JUMP_EVERY).jump);
            assert!(!demo_input(DEMO_JUMP_EVERY).restart);
        }

        #[test]
        fn test_scripted_demo_starts_a_run() {
            let mut state = GameState::new(DEFAULT_VIEWPORT_WIDTH);
            let outcome = tick(&mut state, &demo_input(0), NOMINAL_FRAME_MS);
            assert!(outcome.started);
            for i in 1..DEMO_JUMP_EVERY {
                tick(&mut state, &demo_input(i), NOMINAL_FRAME_MS);
            }
            assert!(state.is_running());
            assert_eq!(state.ticks, u64::from(DEMO_JUMP_EVERY));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let _ = dotenvy::dotenv();
    env_logger::init();
    let args = native::Args::parse();
    let config = house_cup::SourceConfig::from_env();
    log::info!("House Cup (native) starting, data API at {}", config.houses_url());

    native::run(&config, &args);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
