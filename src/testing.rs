//! Shared fixtures for unit tests

use {
    crate::{
        fetch::PageSource,
        model::{BotRecord, PageResult, RawBotRecord},
    },
    async_trait::async_trait,
    std::{collections::HashMap, sync::Mutex},
};

/// Wire record with just a name and an introduction
pub fn raw(name: &str) -> RawBotRecord {
    RawBotRecord {
        bot_id: Some(format!("id-{}", name.to_lowercase())),
        character_name: Some(name.to_string()),
        introduce: Some(format!("{} says hello", name)),
        ..Default::default()
    }
}

pub fn page(page: u32, pages: u32, names: &[&str]) -> PageResult {
    PageResult {
        records: names.iter().map(|name| raw(name)).collect(),
        page,
        pages,
    }
}

pub fn record(name: &str, from_user: &str) -> BotRecord {
    BotRecord::from_raw(raw(name), from_user).expect("fixture record is valid")
}

/// Page source that replays a fixed script per user; unknown users fail
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<String, Vec<Option<PageResult>>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, user_id: &str, pages: Vec<Option<PageResult>>) -> Self {
        self.pages.insert(user_id.to_string(), pages);
        self
    }

    /// Pages requested for `user_id`, in order
    pub fn calls(&self, user_id: &str) -> Vec<u32> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, page)| *page)
            .collect()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, user_id: &str, page: u32) -> Option<PageResult> {
        self.calls.lock().unwrap().push((user_id.to_string(), page));
        tokio::task::yield_now().await;

        self.pages
            .get(user_id)
            .and_then(|pages| pages.get(page as usize - 1))
            .cloned()
            .flatten()
    }
}
