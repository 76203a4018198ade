use {
    super::{load_source, PageSource, SourceLoad},
    crate::model::{locale_cmp, BotRecord},
    futures::future::join_all,
    std::sync::Arc,
};

/// Per-source outcome, kept for the status line and the debug panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub user_id: String,
    pub records: usize,
    pub pages: u32,
    pub dropped: usize,
    pub completed: bool,
}

impl From<&SourceLoad> for SourceSummary {
    fn from(load: &SourceLoad) -> Self {
        Self {
            user_id: load.user_id.clone(),
            records: load.records.len(),
            pages: load.pages_fetched,
            dropped: load.dropped,
            completed: load.completed,
        }
    }
}

/// The merged, name-sorted collection for the whole session
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub records: Arc<[BotRecord]>,
    pub sources: Vec<SourceSummary>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AggregateError {
    /// Every source failed or came back empty
    #[error("no bots were loaded from any of {} sources", .sources.len())]
    TotalFailure { sources: Vec<SourceSummary> },
}

/// Load every source concurrently and merge the results.
///
/// Sources are joined with an all-complete barrier; a failed source simply
/// contributes nothing. Records are concatenated in source declaration order
/// and then stable-sorted by name.
pub async fn aggregate(
    source: &dyn PageSource,
    user_ids: &[String],
    page_limit: u32,
) -> Result<Aggregate, AggregateError> {
    log::info!("Initiating bot fetch for {} sources...", user_ids.len());

    let loads = join_all(
        user_ids
            .iter()
            .map(|user_id| load_source(source, user_id, page_limit)),
    )
    .await;

    let sources: Vec<SourceSummary> = loads.iter().map(SourceSummary::from).collect();
    let mut records: Vec<BotRecord> = loads.into_iter().flat_map(|load| load.records).collect();
    records.sort_by(|a, b| locale_cmp(&a.character_name, &b.character_name));

    log::info!("Aggregation complete: Total {} bots loaded.", records.len());

    if records.is_empty() {
        log::error!("CRITICAL: No bots were loaded from any user.");
        return Err(AggregateError::TotalFailure { sources });
    }

    Ok(Aggregate {
        records: records.into(),
        sources,
    })
}
