use crate::model::BotRecord;

pub const FEATURED_COUNT: usize = 10;

/// Looping featured strip; `tick` auto-advances unless paused
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    items: Vec<BotRecord>,
    index: usize,
    paused: bool,
}

impl Carousel {
    pub fn new(items: Vec<BotRecord>) -> Self {
        Self {
            items,
            index: 0,
            paused: false,
        }
    }

    pub fn current(&self) -> Option<&BotRecord> {
        self.items.get(self.index)
    }

    pub fn items(&self) -> &[BotRecord] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + self.items.len() - 1) % self.items.len();
        }
    }

    /// Auto-advance; returns whether the current item changed
    pub fn tick(&mut self) -> bool {
        if self.paused || self.items.len() < 2 {
            return false;
        }
        self.next();
        true
    }

    /// Hold the current item; `tick` does nothing until `resume`
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::testing::record};

    fn carousel(names: &[&str]) -> Carousel {
        Carousel::new(names.iter().map(|n| record(n, "u")).collect())
    }

    fn current(c: &Carousel) -> &str {
        c.current().map(|b| b.character_name.as_str()).unwrap_or("")
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut c = carousel(&["A", "B", "C"]);
        c.prev();
        assert_eq!(current(&c), "C");
        c.next();
        assert_eq!(current(&c), "A");
        c.next();
        c.next();
        c.next();
        assert_eq!(current(&c), "A");
    }

    #[test]
    fn test_tick_respects_pause() {
        let mut c = carousel(&["A", "B"]);
        assert!(c.tick());
        assert_eq!(current(&c), "B");

        c.pause();
        assert!(c.is_paused());
        assert!(!c.tick());
        assert_eq!(current(&c), "B");

        c.resume();
        assert!(c.tick());
        assert_eq!(current(&c), "A");

        c.toggle_pause();
        assert!(!c.tick());
        c.toggle_pause();
        assert!(!c.is_paused());
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut c = Carousel::default();
        c.next();
        c.prev();
        assert!(!c.tick());
        assert!(c.current().is_none());
    }
}
