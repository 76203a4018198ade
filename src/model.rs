//! Bot profile records as served by the public-bots listing endpoint.
//!
//! The API is loosely typed, so records arrive as [`RawBotRecord`] with every
//! field optional and are validated into [`BotRecord`] at the aggregation
//! boundary. Downstream code (filtering, sorting, rendering) only ever sees
//! validated records.
//!
//! ## Decoding rules
//!
//! A badly typed field never fails the page it sits on:
//! - `botId`, `botChats`, `botLikes`: strings, or numbers rendered as text
//! - `botLikesInInt`: integer, float (truncated) or numeric string
//! - `characterName`, `introduce`, `avatar`: strings only
//! - `tags`: non-string elements are skipped; a non-list counts as no tags
//! - anything else decodes as absent, and a record that is not an object
//!   decodes as an empty record, which validation then rejects

use {
    serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize},
    std::cmp::Ordering,
};

/// Placeholder image shown when a card has no avatar
pub const PLACEHOLDER_AVATAR: &str = "https://placehold.co/300x200/6c5ce7/white?text=No+Image";

/// Larger placeholder for the featured carousel
pub const FEATURED_PLACEHOLDER_AVATAR: &str =
    "https://placehold.co/450x300/a855f7/white?text=No+Image";

/// Response envelope: `{ "result": { "records": [...], "page": n, "pages": m } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageEnvelope {
    pub result: Option<PageResult>,
}

/// One page of a source's listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResult {
    #[serde(default, deserialize_with = "lenient_records")]
    pub records: Vec<RawBotRecord>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub pages: u32,
}

/// Record exactly as decoded from the wire
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBotRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub bot_id: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub character_name: Option<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub introduce: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "text_only")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub bot_chats: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub bot_likes: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub bot_likes_in_int: Option<i64>,
}

/// Why a raw record was rejected at the aggregation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record is missing characterName")]
    MissingName,
    #[error("record is missing introduce")]
    MissingIntroduce,
}

/// A validated bot profile, stamped with the source it was fetched under
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotRecord {
    pub bot_id: Option<String>,
    pub character_name: String,
    pub introduce: String,
    pub tags: Vec<String>,
    pub avatar: Option<String>,
    pub bot_chats: Option<String>,
    pub bot_likes: Option<String>,
    pub bot_likes_in_int: Option<i64>,
    pub from_user: String,
}

impl BotRecord {
    /// Validate a wire record and stamp it with its source user id.
    ///
    /// Missing `characterName` or `introduce` is rejected rather than
    /// defaulted; sorting and searching rely on both being real values.
    pub fn from_raw(raw: RawBotRecord, from_user: &str) -> Result<Self, RecordError> {
        let character_name = raw.character_name.ok_or(RecordError::MissingName)?;
        let introduce = raw.introduce.ok_or(RecordError::MissingIntroduce)?;

        Ok(Self {
            bot_id: raw.bot_id,
            character_name,
            introduce,
            tags: raw.tags,
            avatar: raw.avatar,
            bot_chats: raw.bot_chats,
            bot_likes: raw.bot_likes,
            bot_likes_in_int: raw.bot_likes_in_int,
            from_user: from_user.to_string(),
        })
    }

    /// Numeric chat count used by the "chats" sort
    pub fn chats(&self) -> f64 {
        self.bot_chats.as_deref().map(parse_chats).unwrap_or(0.0)
    }

    /// Like count used by the "likes" sort; absent counts as zero
    pub fn likes(&self) -> i64 {
        self.bot_likes_in_int.unwrap_or(0)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn avatar_url(&self) -> &str {
        self.avatar_or(PLACEHOLDER_AVATAR)
    }

    /// Avatar for the featured carousel, with its larger placeholder
    pub fn featured_avatar_url(&self) -> &str {
        self.avatar_or(FEATURED_PLACEHOLDER_AVATAR)
    }

    fn avatar_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.avatar.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => placeholder,
        }
    }

    /// External profile link; `None` when the record has no id (dead link)
    pub fn profile_url(&self, profile_base: &str) -> Option<String> {
        self.bot_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{}/botProfile/{}", profile_base.trim_end_matches('/'), id))
    }
}

/// Parse a display chat count such as `"1.2k"` or `"950"`.
///
/// A trailing `k` multiplies by 1000. Anything unparseable is 0.
pub fn parse_chats(display: &str) -> f64 {
    let trimmed = display.trim();
    let (number, multiplier) = match trimmed.strip_suffix(|c: char| c == 'k' || c == 'K') {
        Some(rest) => (rest.trim_end(), 1000.0),
        None => (trimmed, 1.0),
    };

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => value * multiplier,
        _ => 0.0,
    }
}

/// Name comparison used for every name-ordered view.
///
/// Case-insensitive first so "ann" and "Ann" sit together, then the raw
/// string so the order stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| a.cmp(b))
}

/// Any JSON scalar, or something else entirely
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl Loose {
    fn into_text(self) -> Option<String> {
        match self {
            Loose::Text(s) => Some(s),
            Loose::Int(n) => Some(n.to_string()),
            Loose::Float(n) => Some(n.to_string()),
            Loose::Other(_) => None,
        }
    }

    fn into_int(self) -> Option<i64> {
        match self {
            Loose::Int(n) => Some(n),
            Loose::Float(n) if n.is_finite() => Some(n as i64),
            Loose::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n as i64))
            }
            _ => None,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_text))
}

fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => Some(s),
        _ => None,
    })
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_int))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_int(deserializer)?.unwrap_or(0);
    Ok(u32::try_from(value).unwrap_or(0))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<Loose>),
        Other(IgnoredAny),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Loose::Text(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<RawBotRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Record(RawBotRecord),
        Other(IgnoredAny),
    }

    Ok(Option::<Vec<Entry>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            Entry::Record(raw) => raw,
            Entry::Other(_) => RawBotRecord::default(),
        })
        .collect())
}
