//! Bot Gallery - browse bot profiles gathered from several creator accounts
//!
//! Profiles are fetched page by page for every configured user, merged into
//! one name-sorted collection, then filtered, sorted and revealed in batches
//! as the grid scrolls.
//!
//! ## Module Organization
//!
//! - `fetch` - HTTP client, pagination and concurrent aggregation
//! - `model` - wire records and the validated [`model::BotRecord`]
//! - `view` - view state, filter/sort engine, search debounce
//! - `render` - incremental renderer and visibility trigger
//! - `session` - one browsing session tying the above together
//! - `ui` - ratatui terminal front end
//! - `config`, `logging`, `error` - ambient plumbing

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod render;
pub mod session;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testing;

pub use {
    config::{ConfigError, GalleryConfig},
    error::GalleryError,
    fetch::{aggregate, Aggregate, AggregateError, FetchClient, PageSource},
    model::BotRecord,
    session::Session,
};
