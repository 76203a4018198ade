//! Headless fetch + aggregate run
//!
//! Loads every configured source exactly as the gallery does and writes the
//! merged collection to stdout as JSON lines, one record per line. Per-source
//! summaries go to the log.
//!
//! Usage:
//!   fetch_dump [--view-order chats|likes|name]

use {
    botgallery::{
        aggregate, logging,
        view::{view, SortKey, ViewState},
        FetchClient, GalleryConfig,
    },
    std::io::{BufWriter, Write},
};

fn parse_sort(args: &[String]) -> Result<SortKey, String> {
    match args.iter().position(|a| a == "--view-order") {
        None => Ok(SortKey::Name),
        Some(i) => match args.get(i + 1).map(String::as_str) {
            Some("name") => Ok(SortKey::Name),
            Some("chats") => Ok(SortKey::Chats),
            Some("likes") => Ok(SortKey::Likes),
            other => Err(format!("unknown --view-order value: {:?}", other)),
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let sort_key = parse_sort(&args)?;

    let config = GalleryConfig::from_env()?;
    let client = FetchClient::new(&config)?;

    // Only the env_logger half; there is no panel to feed here
    let logger = logging::build_env_logger(&config)?;
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);

    let result = aggregate(&client, &config.user_ids, config.page_limit).await?;

    for summary in &result.sources {
        log::info!(
            "   {}: {} records over {} pages ({} dropped, {})",
            summary.user_id,
            summary.records,
            summary.pages,
            summary.dropped,
            if summary.completed { "complete" } else { "stopped early" }
        );
    }

    let state = ViewState {
        sort_key,
        ..ViewState::default()
    };
    let records = view(&result.records, &state);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for bot in &records {
        serde_json::to_writer(&mut out, bot)?;
        writeln!(out)?;
    }
    out.flush()?;

    log::info!("✅ Wrote {} records", records.len());
    Ok(())
}
