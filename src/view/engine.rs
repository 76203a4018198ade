//! Filter/sort engine: derives the ordered view from the session collection.
//!
//! Everything here is a pure function of its inputs. The source collection is
//! only ever borrowed; every result is a fresh vector.

use {
    super::state::{SortKey, ViewState},
    crate::model::{locale_cmp, BotRecord},
    std::collections::BTreeMap,
};

/// Filter by source, tags and search text, then order by the sort key.
///
/// Tags are AND-combined and matched case-sensitively. The search term is
/// matched against the lowercased name and introduction, independently of
/// the tag filter. Sorting is stable, so ties keep the name order of the
/// aggregated collection.
pub fn view(collection: &[BotRecord], state: &ViewState) -> Vec<BotRecord> {
    let mut visible: Vec<BotRecord> = collection
        .iter()
        .filter(|bot| state.user_filter.matches(&bot.from_user))
        .filter(|bot| state.active_tags.iter().all(|tag| bot.has_tag(tag)))
        .filter(|bot| matches_search(bot, &state.search_term))
        .cloned()
        .collect();

    sort_records(&mut visible, state.sort_key);
    visible
}

fn matches_search(bot: &BotRecord, term: &str) -> bool {
    term.is_empty()
        || bot.character_name.to_lowercase().contains(term)
        || bot.introduce.to_lowercase().contains(term)
}

pub fn sort_records(records: &mut [BotRecord], key: SortKey) {
    match key {
        SortKey::Name => records.sort_by(|a, b| locale_cmp(&a.character_name, &b.character_name)),
        SortKey::Chats => records.sort_by(|a, b| b.chats().total_cmp(&a.chats())),
        SortKey::Likes => records.sort_by_key(|bot| std::cmp::Reverse(bot.likes())),
    }
}

/// Why a view came back empty; picks the message shown instead of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    Tags(Vec<String>),
    Search,
    Nothing,
}

impl EmptyReason {
    pub fn for_state(state: &ViewState) -> Self {
        if !state.active_tags.is_empty() {
            EmptyReason::Tags(state.active_tags.iter().cloned().collect())
        } else if !state.search_term.is_empty() {
            EmptyReason::Search
        } else {
            EmptyReason::Nothing
        }
    }

    pub fn message(&self) -> String {
        match self {
            EmptyReason::Tags(tags) => {
                let quoted: Vec<String> = tags.iter().map(|t| format!("\"{}\"", t)).collect();
                let noun = if tags.len() == 1 { "tag" } else { "tags" };
                format!("No bots found with the {} {}.", noun, quoted.join(", "))
            }
            EmptyReason::Search => "No bots match your search criteria.".to_string(),
            EmptyReason::Nothing => "No bots found.".to_string(),
        }
    }
}

/// Top `n` records by likes, for the featured carousel
pub fn featured(collection: &[BotRecord], n: usize) -> Vec<BotRecord> {
    let mut ranked = collection.to_vec();
    sort_records(&mut ranked, SortKey::Likes);
    ranked.truncate(n);
    ranked
}

/// Distinct tags with how many records carry each, most common first
pub fn tag_cloud(collection: &[BotRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in collection.iter().flat_map(|bot| bot.tags.iter()) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }

    let mut cloud: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    cloud.sort_by(|a, b| b.1.cmp(&a.1));
    cloud
}
