//! Integration tests: aggregation through to the incrementally rendered grid
//!
//! Drives the public API end to end with an in-memory page source:
//! - Multi-page sources merged and name-sorted
//! - Batched reveal as the viewport scrolls
//! - Filter changes resetting the grid to a fresh first batch
//! - Partial and total source failure

#[cfg(test)]
mod gallery_flow_tests {
    use async_trait::async_trait;
    use botgallery::{
        aggregate,
        model::{PageResult, RawBotRecord},
        render::{GridSink, Sentinel},
        view::{SortKey, UserFilter, ViewEvent},
        AggregateError, BotRecord, GalleryConfig, PageSource, Session,
    };
    use std::collections::HashMap;

    /// Serves fixed pages per user; anything unlisted is a failed request
    struct MapSource {
        pages: HashMap<(String, u32), PageResult>,
    }

    impl MapSource {
        fn new() -> Self {
            Self { pages: HashMap::new() }
        }

        /// Split `records` into pages of `per_page` under `user_id`
        fn with_user(mut self, user_id: &str, records: Vec<RawBotRecord>, per_page: usize) -> Self {
            let chunks: Vec<Vec<RawBotRecord>> = records.chunks(per_page).map(|c| c.to_vec()).collect();
            let pages = chunks.len() as u32;
            for (i, chunk) in chunks.into_iter().enumerate() {
                let page = i as u32 + 1;
                self.pages.insert(
                    (user_id.to_string(), page),
                    PageResult { records: chunk, page, pages },
                );
            }
            self
        }
    }

    #[async_trait]
    impl PageSource for MapSource {
        async fn fetch_page(&self, user_id: &str, page: u32) -> Option<PageResult> {
            tokio::task::yield_now().await;
            self.pages.get(&(user_id.to_string(), page)).cloned()
        }
    }

    /// Grid that only remembers what is on screen
    #[derive(Default)]
    struct ScreenGrid {
        cards: Vec<String>,
        sentinel: Option<Sentinel>,
        empty: Option<String>,
    }

    impl GridSink for ScreenGrid {
        fn clear(&mut self) {
            self.cards.clear();
            self.sentinel = None;
            self.empty = None;
        }

        fn install_sentinel(&mut self, sentinel: Sentinel) {
            self.sentinel = Some(sentinel);
        }

        fn append(&mut self, items: &[BotRecord]) {
            self.cards.extend(items.iter().map(|bot| bot.character_name.clone()));
        }

        fn remove_sentinel(&mut self) {
            self.sentinel = None;
        }

        fn show_empty(&mut self, message: &str) {
            self.empty = Some(message.to_string());
        }
    }

    fn bot(name: &str, tags: &[&str], likes: i64) -> RawBotRecord {
        RawBotRecord {
            bot_id: Some(name.to_lowercase().replace(' ', "-")),
            character_name: Some(name.to_string()),
            introduce: Some(format!("I am {}", name)),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            bot_likes_in_int: Some(likes),
            ..Default::default()
        }
    }

    fn config(users: &[&str]) -> GalleryConfig {
        GalleryConfig {
            user_ids: users.iter().map(|u| u.to_string()).collect(),
            lookahead_rows: 3,
            ..GalleryConfig::default()
        }
    }

    /// 45 alpha bots over three pages, 10 beta bots on one page
    fn two_sources() -> MapSource {
        let alpha = (0..45)
            .map(|i| {
                let tags: &[&str] = if i % 2 == 0 { &["Fantasy"] } else { &[] };
                bot(&format!("Alpha {:02}", i), tags, i)
            })
            .collect();
        let beta = (0..10)
            .map(|i| bot(&format!("Beta {:02}", i), &["Fantasy", "Romance"], 100 + i))
            .collect();
        MapSource::new()
            .with_user("alpha", alpha, 20)
            .with_user("beta", beta, 20)
    }

    async fn session_for(source: &MapSource, users: &[&str]) -> Session<ScreenGrid> {
        let config = config(users);
        let result = aggregate(source, &config.user_ids, config.page_limit)
            .await
            .expect("at least one source loads");
        Session::new(result, &config, ScreenGrid::default())
    }

    #[tokio::test]
    async fn test_scroll_reveals_everything_in_batches() {
        let source = two_sources();
        let mut session = session_for(&source, &["alpha", "beta"]).await;

        assert_eq!(session.total(), 55);
        assert_eq!(session.displayed(), 20);
        assert_eq!(session.grid().cards[0], "Alpha 00");
        assert!(session.grid().sentinel.is_some());

        // Sentinel at row 20 is outside 9 + 3
        assert!(!session.observe_viewport(9));
        assert_eq!(session.displayed(), 20);

        // Within the lookahead margin; a repeat observation is a no-op
        assert!(session.observe_viewport(17));
        assert!(!session.observe_viewport(17));
        assert_eq!(session.displayed(), 40);

        assert!(session.observe_viewport(54));
        assert_eq!(session.displayed(), 55);
        assert!(session.is_exhausted());
        assert!(session.grid().sentinel.is_none());
        assert_eq!(session.grid().cards.last().map(String::as_str), Some("Beta 09"));

        // Exhausted view never loads again
        assert!(!session.observe_viewport(100));
        assert_eq!(session.grid().cards.len(), 55);
    }

    #[tokio::test]
    async fn test_filter_change_resets_to_first_batch() {
        let source = two_sources();
        let mut session = session_for(&source, &["alpha", "beta"]).await;
        assert!(session.observe_viewport(17));
        assert_eq!(session.displayed(), 40);

        assert!(session.handle(ViewEvent::AddTag("Fantasy".to_string())));
        assert_eq!(session.visible(), 33);
        assert_eq!(session.displayed(), 20);
        assert_eq!(session.grid().cards.len(), 20);

        assert!(session.handle(ViewEvent::AddTag("Romance".to_string())));
        assert_eq!(session.visible(), 10);
        assert!(session.is_exhausted());
        assert!(session.grid().cards.iter().all(|name| name.starts_with("Beta")));

        assert!(session.handle(ViewEvent::SetSort(SortKey::Likes)));
        assert_eq!(session.grid().cards[0], "Beta 09");
    }

    #[tokio::test]
    async fn test_user_filter_and_search_combine() {
        let source = two_sources();
        let mut session = session_for(&source, &["alpha", "beta"]).await;

        assert!(session.handle(ViewEvent::SetUserFilter(UserFilter::User("alpha".to_string()))));
        assert_eq!(session.visible(), 45);

        assert!(session.handle(ViewEvent::SearchChanged("ALPHA 1".to_string())));
        assert_eq!(session.visible(), 10);

        // Unknown users are ignored
        assert!(!session.handle(ViewEvent::SetUserFilter(UserFilter::User("gamma".to_string()))));
        assert_eq!(session.state().user_filter, UserFilter::User("alpha".to_string()));
    }

    #[tokio::test]
    async fn test_empty_view_shows_message() {
        let source = two_sources();
        let mut session = session_for(&source, &["alpha", "beta"]).await;

        assert!(session.handle(ViewEvent::AddTag("Horror".to_string())));
        assert_eq!(session.displayed(), 0);
        assert!(session.grid().cards.is_empty());
        assert_eq!(
            session.grid().empty.as_deref(),
            Some("No bots found with the tag \"Horror\".")
        );

        assert!(session.handle(ViewEvent::ClearTags));
        assert_eq!(session.grid().empty, None);
        assert_eq!(session.displayed(), 20);
    }

    #[tokio::test]
    async fn test_failed_source_keeps_the_rest() {
        let source = two_sources();
        let mut session = session_for(&source, &["alpha", "missing", "beta"]).await;

        assert_eq!(session.total(), 55);
        let missing = session
            .summaries()
            .iter()
            .find(|s| s.user_id == "missing")
            .expect("summary for every source");
        assert_eq!(missing.records, 0);
        assert!(!missing.completed);

        // The failed source still counts as a filter option
        assert!(session.handle(ViewEvent::SetUserFilter(UserFilter::User("missing".to_string()))));
        assert_eq!(session.visible(), 0);
        assert_eq!(session.grid().empty.as_deref(), Some("No bots found."));
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_total_failure() {
        let source = MapSource::new();
        let config = config(&["alpha", "beta"]);

        let result = aggregate(&source, &config.user_ids, config.page_limit).await;
        match result {
            Err(AggregateError::TotalFailure { sources }) => assert_eq!(sources.len(), 2),
            Ok(aggregate) => panic!("expected failure, got {} records", aggregate.records.len()),
        }
    }
}
