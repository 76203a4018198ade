use {
    super::{app::App, layout::render_layout},
    crate::{
        config::GalleryConfig,
        error::GalleryError,
        fetch::{aggregate, PageSource},
        logging::DebugLog,
    },
    crossterm::event::{Event, EventStream, KeyEventKind},
    futures::StreamExt,
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{
        io::Stdout,
        sync::Arc,
        time::{Duration, Instant},
    },
};

/// Redraw cadence for the loading spinner and the debug panel
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI event loop
///
/// Aggregation runs as a future inside the same `select!` as terminal input,
/// so fetching, debouncing and rendering all share one cooperative thread.
pub async fn run_ui(
    config: GalleryConfig,
    source: &dyn PageSource,
    debug: Arc<DebugLog>,
) -> Result<(), GalleryError> {
    // Setup terminal
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, config, source, debug).await;

    // Cleanup - restore terminal state even when the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: GalleryConfig,
    source: &dyn PageSource,
    debug: Arc<DebugLog>,
) -> Result<(), GalleryError> {
    let load = aggregate(source, &config.user_ids, config.page_limit);
    tokio::pin!(load);
    let mut loading = true;

    let mut events = EventStream::new();
    let mut carousel_timer = tokio::time::interval(config.carousel_interval);
    let mut redraw_timer = tokio::time::interval(REDRAW_INTERVAL);
    let mut app = App::new(config.clone(), debug);

    loop {
        terminal.draw(|f| render_layout(f, &mut app))?;

        // A disabled branch still evaluates its future, so give it a far deadline
        let search_due = app
            .debouncer
            .deadline()
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            result = &mut load, if loading => {
                loading = false;
                app.on_loaded(result);
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.on_key(key, Instant::now());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = tokio::time::sleep_until(search_due), if app.debouncer.deadline().is_some() => {
                app.on_search_due(Instant::now());
            }
            _ = carousel_timer.tick() => app.on_carousel_tick(),
            _ = redraw_timer.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
