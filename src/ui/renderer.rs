// Formatting helpers shared by the grid, the carousel and the footer

use crate::model::BotRecord;

/// Shorten to at most `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let kept: String = flat.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// "Chats: 1.2k | Likes: 87", with 0 for missing values
pub fn format_stats(bot: &BotRecord) -> String {
    format!(
        "Chats: {} | Likes: {}",
        bot.bot_chats.as_deref().unwrap_or("0"),
        bot.bot_likes.as_deref().unwrap_or("0")
    )
}

pub fn format_tags(bot: &BotRecord) -> String {
    bot.tags
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            if i < 9 {
                format!("{}:#{}", i + 1, tag)
            } else {
                format!("#{}", tag)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
