use {
    super::{
        app::{App, InputMode, Phase, CARD_HEIGHT},
        grid::TuiGrid,
        renderer::{format_stats, format_tags, truncate},
    },
    crate::{model::BotRecord, session::Session},
    ratatui::{
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
        Frame,
    },
};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Render the main UI layout
pub fn render_layout(f: &mut Frame, app: &mut App) {
    let area = f.size();
    let debug_height = if app.show_debug { 8 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(6),            // Featured carousel
            Constraint::Min(CARD_HEIGHT),     // Grid
            Constraint::Length(3),            // Footer/Status
            Constraint::Length(debug_height), // Debug panel
        ])
        .split(area);

    if matches!(app.phase, Phase::Ready(_)) {
        app.set_grid_height(chunks[2].height.saturating_sub(2));
        app.sync_viewport();
    }

    render_header(f, chunks[0], app);

    match &app.phase {
        Phase::Loading { started } => {
            let frame = (started.elapsed().as_millis() / 150) as usize % SPINNER.len();
            let text = format!(
                "{} Loading bots from {} users...",
                SPINNER[frame],
                app.config.user_ids.len()
            );
            let loading = Paragraph::new(text)
                .style(Style::default().fg(Color::Green))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(loading, chunks[1].union(chunks[2]));
        }
        Phase::Failed(_) => {
            let failure = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Could not load bot data. Restart to retry.",
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                )),
                Line::from("Press 'd' for the debug log, 'q' to quit."),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(failure, chunks[1].union(chunks[2]));
        }
        Phase::Ready(session) => {
            render_carousel(f, chunks[1], session);
            render_grid(f, chunks[2], app, session);
        }
    }

    render_footer(f, chunks[3], app);

    if app.show_debug {
        render_debug(f, chunks[4], app);
    }
    if app.mode == InputMode::TagPicker {
        render_tag_picker(f, area, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let count = match &app.phase {
        Phase::Loading { .. } => "…".to_string(),
        Phase::Failed(_) => "0".to_string(),
        Phase::Ready(session) => session.total().to_string(),
    };

    let mut spans = vec![
        Span::styled("Bot Gallery", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" - {} bots", count)),
    ];
    if let Some(session) = app.session() {
        let state = session.state();
        spans.push(Span::raw(format!(
            " | sort: {} | user: {}",
            state.sort_key.label(),
            state.user_filter
        )));
        if !state.active_tags.is_empty() {
            let tags: Vec<&str> = state.active_tags.iter().map(String::as_str).collect();
            spans.push(Span::styled(
                format!(" | tags: {}", tags.join(" + ")),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    let search_style = if app.mode == InputMode::Search {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let text = vec![
        Line::from(spans),
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(format!("{} ", app.search_input), search_style),
        ]),
    ];

    f.render_widget(Paragraph::new(text), area);
}

fn render_carousel(f: &mut Frame, area: Rect, session: &Session<TuiGrid>) {
    let carousel = session.carousel();
    let title = format!(
        "Most Liked {}/{}{}",
        carousel.index() + 1,
        carousel.items().len(),
        if carousel.is_paused() { " (paused)" } else { "" }
    );

    let width = area.width.saturating_sub(4) as usize;
    let lines = match carousel.current() {
        Some(bot) => vec![
            Line::from(vec![
                Span::styled(
                    bot.character_name.clone(),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  ♥ {}", bot.likes())),
            ]),
            Line::from(truncate(&bot.introduce, width)),
            Line::from(Span::styled(profile_link(session, bot), Style::default().fg(Color::Green))),
            Line::from(Span::styled(
                truncate(&format!("avatar: {}", bot.featured_avatar_url()), width),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from("No featured bots")],
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_grid(f: &mut Frame, area: Rect, app: &App, session: &Session<TuiGrid>) {
    let grid = session.grid();
    let title = format!(
        "Bots {}/{}{}",
        session.displayed(),
        session.visible(),
        if grid.has_more() { " (scroll for more)" } else { "" }
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(message) = grid.empty_message() {
        let empty = Paragraph::new(message.to_string())
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let mut items: Vec<ListItem> = grid
        .cards()
        .iter()
        .map(|bot| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(bot.character_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  From {}", bot.from_user), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(truncate(&bot.introduce, width)),
                Line::from(Span::styled(truncate(&format_tags(bot), width), Style::default().fg(Color::Yellow))),
                Line::from(Span::styled(format_stats(bot), Style::default().fg(Color::Cyan))),
                Line::from(Span::styled(
                    truncate(&format!("avatar: {}", bot.avatar_url()), width),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();
    if grid.has_more() {
        items.push(ListItem::new(Line::from(Span::styled(
            "Loading more...",
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default()
        .with_selected(Some(app.selected))
        .with_offset(app.scroll);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let help = match app.mode {
        InputMode::Browse => "/ search  s sort  u user  t tags  1-9 card tag  c clear  [ ] carousel  p pause  d debug  q quit",
        InputMode::Search => "type to search  Enter apply  Esc done",
        InputMode::TagPicker => "j/k move  Enter toggle  c clear  Esc close",
    };

    let link = app
        .session()
        .and_then(|s| s.grid().cards().get(app.selected).map(|bot| profile_link(s, bot)))
        .unwrap_or_default();

    let text = vec![
        Line::from(Span::styled(link, Style::default().fg(Color::Green))),
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    ];
    let footer = Block::default().borders(Borders::TOP);
    f.render_widget(Paragraph::new(text).block(footer), area);
}

fn profile_link(session: &Session<TuiGrid>, bot: &BotRecord) -> String {
    match session.profile_url(bot) {
        Some(url) => format!("Chat with {}: {}", bot.character_name, url),
        None => format!("{} has no profile link", bot.character_name),
    }
}

fn render_debug(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .debug
        .tail(area.height.saturating_sub(2) as usize)
        .into_iter()
        .map(Line::from)
        .collect();
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Debug Log"));
    f.render_widget(panel, area);
}

fn render_tag_picker(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let active = &session.state().active_tags;
    let items: Vec<ListItem> = session
        .tags()
        .into_iter()
        .map(|(tag, count)| {
            let mark = if active.contains(&tag) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {} ({})", mark, tag, count))
        })
        .collect();

    let popup = centered(area, 40, 60);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Tags (all selected must match)"))
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(Some(app.tag_cursor));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
