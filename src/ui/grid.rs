use crate::{
    model::BotRecord,
    render::{GridSink, Sentinel},
};

/// Card grid backing the terminal view
#[derive(Debug, Default)]
pub struct TuiGrid {
    cards: Vec<BotRecord>,
    empty: Option<String>,
    sentinel: Option<Sentinel>,
}

impl TuiGrid {
    pub fn cards(&self) -> &[BotRecord] {
        &self.cards
    }

    pub fn empty_message(&self) -> Option<&str> {
        self.empty.as_deref()
    }

    /// Whether more cards can still be loaded below the last one
    pub fn has_more(&self) -> bool {
        self.sentinel.is_some()
    }
}

impl GridSink for TuiGrid {
    fn clear(&mut self) {
        self.cards.clear();
        self.empty = None;
        self.sentinel = None;
    }

    fn install_sentinel(&mut self, sentinel: Sentinel) {
        self.sentinel = Some(sentinel);
    }

    fn append(&mut self, items: &[BotRecord]) {
        self.cards.extend_from_slice(items);
    }

    fn remove_sentinel(&mut self) {
        self.sentinel = None;
    }

    fn show_empty(&mut self, message: &str) {
        self.empty = Some(message.to_string());
    }
}
