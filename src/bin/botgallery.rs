//! Bot Gallery terminal UI
//!
//! Fetches every configured source, then opens the scrolling gallery.
//! Set `LOG_FILE` to keep log output from drawing over the UI.

use botgallery::{logging, ui, FetchClient, GalleryConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = GalleryConfig::from_env()?;
    let debug = logging::init(&config)?;

    // Log startup information (before UI starts to avoid overlay)
    log::info!("🚀 Starting Bot Gallery...");
    log::info!("📊 Configuration:");
    log::info!("   Sources: {}", config.user_ids.join(", "));
    log::info!("   API: {} (page size {})", config.api_base, config.page_size);
    log::info!(
        "   Batch size: {}, lookahead rows: {}",
        config.batch_size,
        config.lookahead_rows
    );
    match config.fetch_timeout {
        Some(timeout) => log::info!("   Fetch timeout: {:?}", timeout),
        None => log::info!("   Fetch timeout: none"),
    }

    let client = FetchClient::new(&config)?;
    ui::run_ui(config, &client, debug).await?;

    log::info!("Bot Gallery stopped");
    Ok(())
}
