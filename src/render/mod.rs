//! Incremental rendering of a view collection
//!
//! The renderer owns how many items of the current view are materialized and
//! pushes them into a [`GridSink`]; the visibility trigger decides when the
//! next batch is wanted. The terminal grid is one sink, tests use another.

pub mod renderer;
pub mod trigger;

use crate::model::BotRecord;

pub use renderer::{BatchOutcome, IncrementalRenderer, DEFAULT_BATCH_SIZE};
pub use trigger::{VisibilityTrigger, DEFAULT_LOOKAHEAD};

/// Marker placed after the last materialized item of one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    pub(crate) generation: u64,
}

/// Display surface the renderer writes into
pub trait GridSink {
    /// Drop every displayed item, message and sentinel
    fn clear(&mut self);
    fn install_sentinel(&mut self, sentinel: Sentinel);
    /// Append in order, before the sentinel
    fn append(&mut self, items: &[BotRecord]);
    fn remove_sentinel(&mut self);
    /// Show a single explanatory message instead of any items
    fn show_empty(&mut self, message: &str);
}

/// Sink that records what it was asked to do
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cards: Vec<String>,
    pub batches: Vec<usize>,
    pub clears: usize,
    pub sentinel_removals: usize,
    pub has_sentinel: bool,
    pub empty: Option<String>,
}

#[cfg(test)]
impl GridSink for RecordingSink {
    fn clear(&mut self) {
        self.cards.clear();
        self.batches.clear();
        self.sentinel_removals = 0;
        self.has_sentinel = false;
        self.empty = None;
        self.clears += 1;
    }

    fn install_sentinel(&mut self, _sentinel: Sentinel) {
        self.has_sentinel = true;
    }

    fn append(&mut self, items: &[BotRecord]) {
        assert!(self.has_sentinel, "items must land before a live sentinel");
        self.cards
            .extend(items.iter().map(|bot| bot.character_name.clone()));
        self.batches.push(items.len());
    }

    fn remove_sentinel(&mut self) {
        self.has_sentinel = false;
        self.sentinel_removals += 1;
    }

    fn show_empty(&mut self, message: &str) {
        self.empty = Some(message.to_string());
    }
}
