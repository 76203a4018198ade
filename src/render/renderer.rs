use {
    super::{GridSink, Sentinel},
    crate::{model::BotRecord, view::EmptyReason},
};

pub const DEFAULT_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// `count` items were appended; `exhausted` is set on the final batch
    Loaded { count: usize, exhausted: bool },
    /// Everything is already displayed
    Exhausted,
    /// The request belongs to a collection that has since been replaced
    Stale,
}

/// Materializes a view collection into a [`GridSink`] one batch at a time.
///
/// Every [`reset`](Self::reset) starts a new generation. Batch requests carry
/// the sentinel of the generation they were issued for, so a request queued
/// before a reset can never append items from the old collection.
pub struct IncrementalRenderer<S> {
    sink: S,
    items: Vec<BotRecord>,
    offset: usize,
    batch_size: usize,
    generation: u64,
    sentinel: Option<Sentinel>,
}

impl<S: GridSink> IncrementalRenderer<S> {
    pub fn new(sink: S, batch_size: usize) -> Self {
        Self {
            sink,
            items: Vec::new(),
            offset: 0,
            batch_size: batch_size.max(1),
            generation: 0,
            sentinel: None,
        }
    }

    /// Replace the displayed collection and eagerly load its first batch.
    ///
    /// Returns the live sentinel to observe, or `None` when nothing more can
    /// load (empty view, or everything fit in the first batch).
    pub fn reset(&mut self, items: Vec<BotRecord>, empty: EmptyReason) -> Option<Sentinel> {
        self.sink.clear();
        self.generation += 1;
        self.offset = 0;
        self.sentinel = None;
        self.items = items;

        if self.items.is_empty() {
            self.sink.show_empty(&empty.message());
            return None;
        }

        let sentinel = Sentinel {
            generation: self.generation,
        };
        self.sink.install_sentinel(sentinel);
        self.sentinel = Some(sentinel);

        self.load_batch(sentinel);
        self.sentinel
    }

    /// Append the next batch before the sentinel
    pub fn load_batch(&mut self, sentinel: Sentinel) -> BatchOutcome {
        if sentinel.generation != self.generation {
            log::debug!(
                "Ignoring batch request for generation {} (current {})",
                sentinel.generation,
                self.generation
            );
            return BatchOutcome::Stale;
        }
        if self.sentinel.is_none() {
            return BatchOutcome::Exhausted;
        }

        let end = (self.offset + self.batch_size).min(self.items.len());
        let batch = &self.items[self.offset..end];
        self.sink.append(batch);
        let count = batch.len();
        self.offset = end;

        let exhausted = self.offset >= self.items.len();
        if exhausted {
            self.sink.remove_sentinel();
            self.sentinel = None;
        }

        log::debug!(
            "Loaded batch of {} ({}/{} displayed)",
            count,
            self.offset,
            self.items.len()
        );
        BatchOutcome::Loaded { count, exhausted }
    }

    pub fn displayed(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.sentinel.is_none()
    }

    pub fn sentinel(&self) -> Option<Sentinel> {
        self.sentinel
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
