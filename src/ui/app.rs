//! Terminal adapter state: turns key presses into [`ViewEvent`]s and keeps the
//! scroll position the visibility trigger is fed from.

use {
    super::grid::TuiGrid,
    crate::{
        config::GalleryConfig,
        fetch::{Aggregate, AggregateError},
        logging::DebugLog,
        session::Session,
        view::{SearchDebouncer, ViewEvent},
    },
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    std::{sync::Arc, time::Instant},
};

/// Terminal rows taken by one card
pub const CARD_HEIGHT: u16 = 6;

pub enum Phase {
    Loading { started: Instant },
    Failed(AggregateError),
    Ready(Box<Session<TuiGrid>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    TagPicker,
}

pub struct App {
    pub phase: Phase,
    pub mode: InputMode,
    pub search_input: String,
    pub debouncer: SearchDebouncer,
    /// Index of the focused card in the grid
    pub selected: usize,
    /// First card shown in the grid pane
    pub scroll: usize,
    /// Cards that fit in the grid pane, updated on every draw
    pub grid_rows: usize,
    pub tag_cursor: usize,
    pub show_debug: bool,
    pub debug: Arc<DebugLog>,
    pub config: GalleryConfig,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: GalleryConfig, debug: Arc<DebugLog>) -> Self {
        Self {
            phase: Phase::Loading {
                started: Instant::now(),
            },
            mode: InputMode::Browse,
            search_input: String::new(),
            debouncer: SearchDebouncer::new(config.search_debounce),
            selected: 0,
            scroll: 0,
            grid_rows: 1,
            tag_cursor: 0,
            show_debug: false,
            debug,
            config,
            should_quit: false,
        }
    }

    pub fn on_loaded(&mut self, result: Result<Aggregate, AggregateError>) {
        self.phase = match result {
            Ok(aggregate) => {
                log::info!("Gallery ready: {} bots", aggregate.records.len());
                Phase::Ready(Box::new(Session::new(aggregate, &self.config, TuiGrid::default())))
            }
            Err(e) => Phase::Failed(e),
        };
        self.sync_viewport();
    }

    pub fn session(&self) -> Option<&Session<TuiGrid>> {
        match &self.phase {
            Phase::Ready(session) => Some(&**session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session<TuiGrid>> {
        match &mut self.phase {
            Phase::Ready(session) => Some(&mut **session),
            _ => None,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            InputMode::Browse => self.on_browse_key(key),
            InputMode::Search => self.on_search_key(key, now),
            InputMode::TagPicker => self.on_tag_key(key),
        }
        self.sync_viewport();
    }

    fn on_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('d') => self.show_debug = !self.show_debug,
            _ if self.session().is_none() => {}
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('t') => {
                self.tag_cursor = 0;
                self.mode = InputMode::TagPicker;
            }
            KeyCode::Char('s') => self.dispatch(ViewEvent::CycleSort),
            KeyCode::Char('u') => self.dispatch(ViewEvent::CycleUserFilter),
            KeyCode::Char('c') => self.dispatch(ViewEvent::ClearTags),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                let tag = self
                    .selected_card_tag(index)
                    .map(str::to_string);
                if let Some(tag) = tag {
                    self.dispatch(ViewEvent::ToggleTag(tag));
                }
            }
            KeyCode::Char('[') => self.with_carousel(|c| c.prev()),
            KeyCode::Char(']') => self.with_carousel(|c| c.next()),
            KeyCode::Char('p') => self.with_carousel(|c| c.toggle_pause()),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(self.grid_rows as isize),
            KeyCode::PageUp => self.move_selection(-(self.grid_rows as isize)),
            KeyCode::Home | KeyCode::Char('g') => self.move_selection(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.move_selection(isize::MAX),
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.mode = InputMode::Browse,
            KeyCode::Enter => {
                if let Some(term) = self.debouncer.flush() {
                    self.dispatch(ViewEvent::SearchChanged(term));
                }
                self.mode = InputMode::Browse;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.debouncer.input(&self.search_input, now);
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.debouncer.input(&self.search_input, now);
            }
            _ => {}
        }
    }

    fn on_tag_key(&mut self, key: KeyEvent) {
        let tag_count = self.session().map(|s| s.tags().len()).unwrap_or(0);
        match key.code {
            KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => self.mode = InputMode::Browse,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.tag_cursor + 1 < tag_count {
                    self.tag_cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.tag_cursor = self.tag_cursor.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let tag = self
                    .session()
                    .and_then(|s| s.tags().get(self.tag_cursor).map(|(tag, _)| tag.clone()));
                if let Some(tag) = tag {
                    self.dispatch(ViewEvent::ToggleTag(tag));
                }
            }
            KeyCode::Char('c') => self.dispatch(ViewEvent::ClearTags),
            _ => {}
        }
    }

    /// Release the debounced search term once its quiet period is over
    pub fn on_search_due(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now) {
            self.dispatch(ViewEvent::SearchChanged(term));
            self.sync_viewport();
        }
    }

    pub fn on_carousel_tick(&mut self) {
        self.with_carousel(|c| {
            c.tick();
        });
    }

    fn with_carousel(&mut self, f: impl FnOnce(&mut crate::session::Carousel)) {
        if let Some(session) = self.session_mut() {
            f(session.carousel_mut());
        }
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let changed = self
            .session_mut()
            .map(|session| session.handle(event))
            .unwrap_or(false);
        if changed {
            self.selected = 0;
            self.scroll = 0;
        }
    }

    fn selected_card_tag(&self, index: usize) -> Option<&str> {
        self.session()?
            .grid()
            .cards()
            .get(self.selected)?
            .tags
            .get(index)
            .map(String::as_str)
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.session().map(|s| s.grid().cards().len()).unwrap_or(0);
        if count == 0 {
            self.selected = 0;
            return;
        }
        let target = (self.selected as isize).saturating_add(delta);
        self.selected = target.clamp(0, count as isize - 1) as usize;
    }

    /// Keep the selection on screen, then let the trigger see the viewport.
    ///
    /// Loads as many batches as it takes for the sentinel to leave the
    /// lookahead margin.
    pub fn sync_viewport(&mut self) {
        let rows = self.grid_rows.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }

        let viewport_bottom = self.scroll + rows - 1;
        if let Some(session) = self.session_mut() {
            while session.observe_viewport(viewport_bottom) {}
        }
    }

    pub fn set_grid_height(&mut self, height: u16) {
        self.grid_rows = (height / CARD_HEIGHT).max(1) as usize;
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{model::BotRecord, testing::record, view::SortKey},
        crossterm::event::KeyEventKind,
        std::time::Duration,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app(n: usize) -> App {
        let config = GalleryConfig {
            user_ids: vec!["a".to_string(), "b".to_string()],
            lookahead_rows: 1,
            ..GalleryConfig::default()
        };
        let records: Vec<BotRecord> = (0..n)
            .map(|i| {
                let mut bot = record(&format!("Bot {:03}", i), "a");
                bot.tags = vec![if i % 2 == 0 { "even" } else { "odd" }.to_string()];
                bot
            })
            .collect();

        let mut app = App::new(config, Arc::new(DebugLog::default()));
        app.grid_rows = 5;
        app.on_loaded(Ok(Aggregate {
            records: records.into(),
            sources: Vec::new(),
        }));
        app
    }

    fn displayed(app: &App) -> usize {
        app.session().unwrap().displayed()
    }

    #[test]
    fn test_scrolling_to_the_end_loads_everything() {
        let mut app = ready_app(45);
        assert_eq!(displayed(&app), 20);

        for _ in 0..44 {
            app.on_key(key(KeyCode::Down), Instant::now());
        }
        assert_eq!(app.selected, 44);
        assert_eq!(displayed(&app), 45);
        assert!(app.session().unwrap().is_exhausted());
    }

    #[test]
    fn test_search_is_debounced() {
        let mut app = ready_app(30);
        let start = Instant::now();

        app.on_key(key(KeyCode::Char('/')), start);
        assert_eq!(app.mode, InputMode::Search);
        for c in "BOT 01".chars() {
            app.on_key(key(KeyCode::Char(c)), start);
        }
        assert_eq!(app.session().unwrap().visible(), 30);

        app.on_search_due(start + Duration::from_millis(100));
        assert_eq!(app.session().unwrap().visible(), 30);

        app.on_search_due(start + Duration::from_millis(300));
        assert_eq!(app.session().unwrap().state().search_term, "bot 01");
        assert_eq!(app.session().unwrap().visible(), 10);
    }

    #[test]
    fn test_card_tag_and_sort_keys() {
        let mut app = ready_app(10);

        app.on_key(key(KeyCode::Char('1')), Instant::now());
        assert_eq!(app.session().unwrap().visible(), 5);
        assert!(app.session().unwrap().state().active_tags.contains("even"));

        app.on_key(key(KeyCode::Char('c')), Instant::now());
        assert_eq!(app.session().unwrap().visible(), 10);

        app.on_key(key(KeyCode::Char('s')), Instant::now());
        assert_eq!(app.session().unwrap().state().sort_key, SortKey::Chats);
    }

    #[test]
    fn test_failed_load_ignores_view_keys() {
        let config = GalleryConfig::default();
        let mut app = App::new(config, Arc::new(DebugLog::default()));
        app.on_loaded(Err(AggregateError::TotalFailure { sources: Vec::new() }));

        app.on_key(key(KeyCode::Char('s')), Instant::now());
        assert!(matches!(app.phase, Phase::Failed(_)));

        let mut quit = key(KeyCode::Char('q'));
        quit.kind = KeyEventKind::Press;
        app.on_key(quit, Instant::now());
        assert!(app.should_quit);
    }
}
