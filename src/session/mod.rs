//! Session-scoped context for one run of the gallery
//!
//! A [`Session`] is built once, after aggregation succeeds, and lives until
//! the process exits. It owns everything that used to be loose page state:
//! the immutable collection, the view state, the incremental renderer with
//! its visibility trigger, and the featured carousel.
//!
//! ## Flow
//!
//! 1. `handle(ViewEvent)` mutates the view state
//! 2. On change, the view is recomputed and the renderer reset (first batch
//!    loads eagerly, trigger rebinds to the new sentinel)
//! 3. `observe_viewport` feeds scroll position to the trigger, which pulls
//!    further batches until the view is exhausted

pub mod carousel;

use {
    crate::{
        config::GalleryConfig,
        fetch::{Aggregate, SourceSummary},
        model::BotRecord,
        render::{BatchOutcome, GridSink, IncrementalRenderer, VisibilityTrigger},
        view::{featured, tag_cloud, view, EmptyReason, ViewEvent, ViewState},
    },
    std::sync::Arc,
};

pub use carousel::{Carousel, FEATURED_COUNT};

pub struct Session<S> {
    collection: Arc<[BotRecord]>,
    sources: Vec<String>,
    summaries: Vec<SourceSummary>,
    state: ViewState,
    renderer: IncrementalRenderer<S>,
    trigger: VisibilityTrigger,
    carousel: Carousel,
    profile_base: String,
}

impl<S: GridSink> Session<S> {
    pub fn new(aggregate: Aggregate, config: &GalleryConfig, sink: S) -> Self {
        let carousel = Carousel::new(featured(&aggregate.records, FEATURED_COUNT));

        let mut session = Self {
            collection: aggregate.records,
            sources: config.user_ids.clone(),
            summaries: aggregate.sources,
            state: ViewState::new(),
            renderer: IncrementalRenderer::new(sink, config.batch_size),
            trigger: VisibilityTrigger::new(config.lookahead_rows),
            carousel,
            profile_base: config.profile_base.clone(),
        };
        session.refresh();
        session
    }

    /// Apply a view event; recomputes and resets the grid only on change
    pub fn handle(&mut self, event: ViewEvent) -> bool {
        log::debug!("View event: {:?}", event);
        if !self.state.apply(event, &self.sources) {
            return false;
        }
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        let items = view(&self.collection, &self.state);
        let reason = EmptyReason::for_state(&self.state);
        log::debug!(
            "View recomputed: {} of {} bots (sort={}, user={})",
            items.len(),
            self.collection.len(),
            self.state.sort_key.label(),
            self.state.user_filter
        );

        match self.renderer.reset(items, reason) {
            Some(sentinel) => self.trigger.bind(sentinel),
            None => self.trigger.unbind(),
        }
    }

    /// Report the last item row the viewport reaches.
    ///
    /// Loads at most one batch per call; returns whether one was loaded.
    pub fn observe_viewport(&mut self, viewport_bottom: usize) -> bool {
        let sentinel_row = self.renderer.displayed();
        let Some(sentinel) = self.trigger.observe(sentinel_row, viewport_bottom) else {
            return false;
        };

        match self.renderer.load_batch(sentinel) {
            BatchOutcome::Loaded { exhausted, .. } => {
                if exhausted {
                    self.trigger.unbind();
                }
                true
            }
            BatchOutcome::Exhausted => {
                self.trigger.unbind();
                false
            }
            BatchOutcome::Stale => false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn summaries(&self) -> &[SourceSummary] {
        &self.summaries
    }

    /// Size of the aggregated collection (the header count)
    pub fn total(&self) -> usize {
        self.collection.len()
    }

    /// Size of the current filtered view
    pub fn visible(&self) -> usize {
        self.renderer.total()
    }

    pub fn displayed(&self) -> usize {
        self.renderer.displayed()
    }

    pub fn is_exhausted(&self) -> bool {
        self.renderer.is_exhausted()
    }

    pub fn tags(&self) -> Vec<(String, usize)> {
        tag_cloud(&self.collection)
    }

    pub fn collection(&self) -> &[BotRecord] {
        &self.collection
    }

    pub fn profile_url(&self, bot: &BotRecord) -> Option<String> {
        bot.profile_url(&self.profile_base)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn grid(&self) -> &S {
        self.renderer.sink()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            render::RecordingSink,
            testing::record,
            view::{SortKey, UserFilter},
        },
    };

    fn aggregate(n: usize) -> Aggregate {
        let records: Vec<BotRecord> = (0..n)
            .map(|i| {
                let mut bot = record(&format!("Bot {:03}", i), if i % 2 == 0 { "a" } else { "b" });
                bot.bot_likes_in_int = Some(i as i64);
                if i % 3 == 0 {
                    bot.tags = vec!["Fantasy".to_string()];
                }
                bot
            })
            .collect();

        Aggregate {
            records: records.into(),
            sources: Vec::new(),
        }
    }

    fn config() -> GalleryConfig {
        GalleryConfig {
            user_ids: vec!["a".to_string(), "b".to_string()],
            lookahead_rows: 2,
            ..GalleryConfig::default()
        }
    }

    #[test]
    fn test_initial_render_loads_first_batch() {
        let session = Session::new(aggregate(45), &config(), RecordingSink::default());
        assert_eq!(session.total(), 45);
        assert_eq!(session.visible(), 45);
        assert_eq!(session.displayed(), 20);
        assert_eq!(session.carousel().items().len(), FEATURED_COUNT);
        assert_eq!(
            session.carousel().current().unwrap().character_name,
            "Bot 044"
        );
    }

    #[test]
    fn test_scrolling_pulls_batches_until_exhausted() {
        let mut session = Session::new(aggregate(45), &config(), RecordingSink::default());

        // viewport far from the sentinel
        assert!(!session.observe_viewport(5));
        assert!(session.observe_viewport(18));
        assert_eq!(session.displayed(), 40);
        assert!(!session.observe_viewport(18));
        assert!(session.observe_viewport(39));
        assert_eq!(session.displayed(), 45);
        assert!(session.is_exhausted());
        assert!(!session.observe_viewport(100));

        assert_eq!(session.grid().batches, vec![20, 20, 5]);
        assert_eq!(session.grid().sentinel_removals, 1);
    }

    #[test]
    fn test_event_resets_grid() {
        let mut session = Session::new(aggregate(45), &config(), RecordingSink::default());
        session.observe_viewport(20);

        assert!(session.handle(ViewEvent::SetUserFilter(UserFilter::User("b".to_string()))));
        assert_eq!(session.visible(), 22);
        assert_eq!(session.displayed(), 20);
        assert_eq!(session.grid().batches, vec![20]);

        assert!(!session.handle(ViewEvent::SetSort(SortKey::Name)));
        assert!(session.handle(ViewEvent::SetSort(SortKey::Likes)));
        assert_eq!(session.grid().cards[0], "Bot 043");
    }

    #[test]
    fn test_zero_matches_shows_message() {
        let mut session = Session::new(aggregate(10), &config(), RecordingSink::default());
        session.handle(ViewEvent::AddTag("Missing".to_string()));

        assert_eq!(session.visible(), 0);
        assert_eq!(
            session.grid().empty.as_deref(),
            Some("No bots found with the tag \"Missing\".")
        );
        assert!(!session.observe_viewport(100));

        session.handle(ViewEvent::ClearTags);
        assert_eq!(session.visible(), 10);
        assert_eq!(session.grid().empty, None);
    }

    #[test]
    fn test_collection_survives_refilters() {
        let mut session = Session::new(aggregate(30), &config(), RecordingSink::default());
        let before = session.collection().to_vec();

        session.handle(ViewEvent::AddTag("Fantasy".to_string()));
        session.handle(ViewEvent::SearchChanged("bot 00".to_string()));
        session.handle(ViewEvent::SetSort(SortKey::Chats));
        assert_eq!(session.visible(), 4);

        assert_eq!(session.collection(), &before[..]);
    }
}
