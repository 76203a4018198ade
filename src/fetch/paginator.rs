use {
    super::PageSource,
    crate::model::BotRecord,
};

/// Everything one source contributed, plus how the walk ended
#[derive(Debug, Clone, Default)]
pub struct SourceLoad {
    pub user_id: String,
    pub records: Vec<BotRecord>,
    pub pages_fetched: u32,
    /// Records rejected by validation (missing name or introduce)
    pub dropped: usize,
    /// False when a fetch failed or the page limit cut the walk short
    pub completed: bool,
}

/// Walk one source's pages starting at 1.
///
/// Stops when a fetch fails (keeping what was accumulated), when the server
/// reports the last page, or at `page_limit`. A failing first page yields an
/// empty load, never an error.
pub async fn load_source(source: &dyn PageSource, user_id: &str, page_limit: u32) -> SourceLoad {
    log::info!("Loading bots for user {}...", user_id);

    let mut load = SourceLoad {
        user_id: user_id.to_string(),
        completed: true,
        ..Default::default()
    };
    let mut page = 1;

    loop {
        let Some(result) = source.fetch_page(user_id, page).await else {
            log::warn!("No bot data for {} (page {})", user_id, page);
            load.completed = false;
            break;
        };
        load.pages_fetched += 1;

        for raw in result.records {
            match BotRecord::from_raw(raw, user_id) {
                Ok(record) => load.records.push(record),
                Err(e) => {
                    load.dropped += 1;
                    log::warn!("Dropping record from {} page {}: {}", user_id, page, e);
                }
            }
        }

        if result.page.max(page) >= result.pages {
            break;
        }
        if page >= page_limit {
            log::warn!(
                "Stopping {} at page limit {} ({} pages reported)",
                user_id,
                page_limit,
                result.pages
            );
            load.completed = false;
            break;
        }
        page += 1;
    }

    log::info!("Loaded {} bots for {}", load.records.len(), user_id);
    load
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::testing::{page, ScriptedSource},
    };

    #[tokio::test]
    async fn test_walks_until_last_page_and_stamps_source() {
        let source = ScriptedSource::new().with_pages(
            "lMjZp",
            vec![
                Some(page(1, 3, &["Ann", "Bob"])),
                Some(page(2, 3, &["Cy"])),
                Some(page(3, 3, &["Dee"])),
                Some(page(4, 3, &["never"])),
            ],
        );

        let load = load_source(&source, "lMjZp", 1000).await;
        assert_eq!(load.pages_fetched, 3);
        assert!(load.completed);
        let names: Vec<_> = load.records.iter().map(|r| r.character_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy", "Dee"]);
        assert!(load.records.iter().all(|r| r.from_user == "lMjZp"));
        assert_eq!(source.calls("lMjZp"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_keeps_accumulated_records() {
        let source = ScriptedSource::new()
            .with_pages("u", vec![Some(page(1, 5, &["Ann"])), None, Some(page(3, 5, &["Cy"]))]);

        let load = load_source(&source, "u", 1000).await;
        assert_eq!(load.records.len(), 1);
        assert!(!load.completed);
        assert_eq!(source.calls("u"), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_empty() {
        let source = ScriptedSource::new().with_pages("u", vec![None]);

        let load = load_source(&source, "u", 1000).await;
        assert!(load.records.is_empty());
        assert_eq!(load.pages_fetched, 0);
        assert!(!load.completed);
    }

    #[tokio::test]
    async fn test_zero_pages_reported_stops_after_first() {
        let source = ScriptedSource::new().with_pages("u", vec![Some(page(1, 0, &[]))]);

        let load = load_source(&source, "u", 1000).await;
        assert!(load.records.is_empty());
        assert!(load.completed);
        assert_eq!(source.calls("u"), vec![1]);
    }

    #[tokio::test]
    async fn test_page_limit_caps_runaway_source() {
        let pages = (1..=10).map(|n| Some(page(n, 99, &["x"]))).collect();
        let source = ScriptedSource::new().with_pages("u", pages);

        let load = load_source(&source, "u", 4).await;
        assert_eq!(load.pages_fetched, 4);
        assert!(!load.completed);
    }

    #[tokio::test]
    async fn test_invalid_records_are_dropped() {
        let mut first = page(1, 1, &["Ann", "Bob"]);
        first.records[1].introduce = None;
        let source = ScriptedSource::new().with_pages("u", vec![Some(first)]);

        let load = load_source(&source, "u", 1000).await;
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.dropped, 1);
    }
}
