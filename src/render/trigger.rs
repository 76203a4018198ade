use super::Sentinel;

pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Watches the sentinel's position against the bottom of the viewport.
///
/// The sentinel counts as visible once it is within `lookahead` rows of the
/// viewport bottom, so the next batch is requested before the user reaches
/// the end. Each sentinel position fires at most once; repeated observations
/// of the same position, or any observation while unbound, do nothing.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    lookahead: usize,
    bound: Option<Sentinel>,
    fired_at: Option<usize>,
}

impl VisibilityTrigger {
    pub fn new(lookahead: usize) -> Self {
        Self {
            lookahead,
            bound: None,
            fired_at: None,
        }
    }

    /// Observe a (new) sentinel; the same instance is reused across resets
    pub fn bind(&mut self, sentinel: Sentinel) {
        self.bound = Some(sentinel);
        self.fired_at = None;
    }

    pub fn unbind(&mut self) {
        self.bound = None;
        self.fired_at = None;
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Report where the sentinel sits and where the viewport ends.
    ///
    /// Returns the sentinel to load for when it has just become visible.
    pub fn observe(&mut self, sentinel_row: usize, viewport_bottom: usize) -> Option<Sentinel> {
        let sentinel = self.bound?;

        if sentinel_row > viewport_bottom.saturating_add(self.lookahead) {
            self.fired_at = None;
            return None;
        }
        if self.fired_at == Some(sentinel_row) {
            return None;
        }

        self.fired_at = Some(sentinel_row);
        Some(sentinel)
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}
