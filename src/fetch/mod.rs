//! Fetch side of the gallery: HTTP client, per-source pagination and the
//! concurrent aggregation of every configured source.
//!
//! ## Module Organization
//!
//! - `client` - reqwest-backed [`FetchClient`], one GET per call
//! - `paginator` - walks one source's pages until exhaustion or failure
//! - `aggregator` - runs all paginators concurrently and merges by name

pub mod aggregator;
pub mod client;
pub mod paginator;

use {crate::model::PageResult, async_trait::async_trait};

pub use aggregator::{aggregate, Aggregate, AggregateError, SourceSummary};
pub use client::{generate_fingerprint, FetchClient};
pub use paginator::{load_source, SourceLoad};

/// Anything that can produce one page of a source's listing.
///
/// `None` means the page could not be fetched; callers treat it as the end
/// of that source.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, user_id: &str, page: u32) -> Option<PageResult>;
}
