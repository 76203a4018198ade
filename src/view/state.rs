use std::{collections::BTreeSet, fmt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Chats,
    Likes,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Chats,
            SortKey::Chats => SortKey::Likes,
            SortKey::Likes => SortKey::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Chats => "chats",
            SortKey::Likes => "likes",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserFilter {
    #[default]
    All,
    User(String),
}

impl UserFilter {
    /// Next filter in `all, sources[0], sources[1], ..., all` order
    pub fn next(&self, sources: &[String]) -> Self {
        let position = match self {
            UserFilter::All => None,
            UserFilter::User(id) => sources.iter().position(|s| s == id),
        };

        let next_index = position.map_or(0, |i| i + 1);
        match sources.get(next_index) {
            Some(id) => UserFilter::User(id.clone()),
            None => UserFilter::All,
        }
    }

    pub fn matches(&self, from_user: &str) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::User(id) => id == from_user,
        }
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserFilter::All => write!(f, "all"),
            UserFilter::User(id) => write!(f, "{}", id),
        }
    }
}

/// Intents emitted by the UI adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SetSort(SortKey),
    CycleSort,
    SetUserFilter(UserFilter),
    CycleUserFilter,
    /// Raw search text, already debounced
    SearchChanged(String),
    AddTag(String),
    RemoveTag(String),
    ToggleTag(String),
    ClearTags,
}

/// What the user is currently asking to see
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub user_filter: UserFilter,
    /// Always stored lowercased
    pub search_term: String,
    pub active_tags: BTreeSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event; returns whether anything changed.
    ///
    /// A user filter naming an unknown source is ignored.
    pub fn apply(&mut self, event: ViewEvent, sources: &[String]) -> bool {
        match event {
            ViewEvent::SetSort(key) => replace(&mut self.sort_key, key),
            ViewEvent::CycleSort => {
                let next = self.sort_key.next();
                replace(&mut self.sort_key, next)
            }
            ViewEvent::SetUserFilter(filter) => {
                if let UserFilter::User(id) = &filter {
                    if !sources.contains(id) {
                        log::warn!("Ignoring filter for unknown user {}", id);
                        return false;
                    }
                }
                replace(&mut self.user_filter, filter)
            }
            ViewEvent::CycleUserFilter => {
                let next = self.user_filter.next(sources);
                replace(&mut self.user_filter, next)
            }
            ViewEvent::SearchChanged(text) => {
                replace(&mut self.search_term, text.to_lowercase())
            }
            ViewEvent::AddTag(tag) => self.active_tags.insert(tag),
            ViewEvent::RemoveTag(tag) => self.active_tags.remove(&tag),
            ViewEvent::ToggleTag(tag) => {
                if !self.active_tags.remove(&tag) {
                    self.active_tags.insert(tag);
                }
                true
            }
            ViewEvent::ClearTags => {
                let changed = !self.active_tags.is_empty();
                self.active_tags.clear();
                changed
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
