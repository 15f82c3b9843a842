//! Minuteman TUI - Actor-based endpoint catalogue explorer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async probe execution

mod app;
mod catalog;
mod config;
mod constants;
mod messages;
mod models;
mod network;
mod query;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::{AppActor, AppState};
use config::Config;
use constants::APP_NAME;
use messages::ui_events::{key_to_ui_event, InputMode, Panel};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use models::Outcome;
use network::NetworkActor;
use ui::{category_color, highlight_json, status_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file; the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(".", "minuteman.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    tracing::info!(base_url = %config.base_url, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor; an optional argument deep-links to one endpoint
    let mut state = AppState::new(config);
    if let Some(name) = std::env::args().nth(1) {
        state.jump_to(name.trim_start_matches('/'));
    }
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.show_log,
                    current_state.filtering,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(main_chunks[1]);

    draw_catalog(f, state, content[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // URL preview
            Constraint::Length(9),  // Parameter form
            Constraint::Min(5),     // Response
        ])
        .split(content[1]);

    draw_url_bar(f, state, right[0]);
    draw_params(f, state, right[1]);
    draw_response(f, state, right[2]);

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.show_log {
        draw_log_popup(f, state, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(state.base_url.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_catalog(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Catalog;
    let border_style = if state.filtering {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = if state.filtering || !state.filter.is_empty() {
        format!(" Catalogue /{} ", state.filter)
    } else {
        format!(" Catalogue ({}) ", state.entries.len())
    };

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|entry| {
            let tag = Span::styled("▪ ", Style::default().fg(category_color(entry.category)));
            let name = Span::styled(
                format!("{:18}", entry.name),
                Style::default().fg(Color::White),
            );
            let desc = Span::styled(entry.description, Style::default().fg(Color::DarkGray));
            ListItem::new(Line::from(vec![tag, name, desc]))
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().bold()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    if !state.entries.is_empty() {
        list_state.select(Some(state.selected_entry.min(state.entries.len() - 1)));
    }

    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let pending = if state.outcome.is_pending() { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" GET{} ", pending))
        .title_style(Style::default().fg(Color::Green).bold());

    let url = Paragraph::new(state.url_preview.as_str()).block(block);
    f.render_widget(url, area);
}

fn draw_params(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Params;
    let border_style = if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " /{} - {} ",
            state.endpoint_name, state.endpoint.description
        ))
        .title_bottom(Line::styled(
            format!(" {} ", state.endpoint.category.label()),
            Style::default().fg(category_color(state.endpoint.category)),
        ));
    if state.endpoint.example.is_some() {
        block = block.title_bottom(Line::from(" x:example ").right_aligned());
    }

    if state.fields.is_empty() {
        let hint = Paragraph::new("No parameters. Press 's' to send.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == state.selected_field;
            let style = if selected && is_focused {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!("{}: {}", field.name, field.value)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);

    // Cursor inside the selected field while editing
    if is_focused && state.input_mode == InputMode::Editing {
        if let Some(field) = state.fields.get(state.selected_field) {
            let prefix = field.name.chars().count() + 2;
            let chars_before = field.value[..state.cursor_position.min(field.value.len())]
                .chars()
                .count();
            let max_x = area.x + area.width.saturating_sub(2);
            let cursor_x = (area.x + 1 + (prefix + chars_before) as u16).min(max_x);
            let cursor_y = area.y + 1 + state.selected_field as u16;
            f.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    // Share text takes over the panel until the next probe
    if let Some(share) = &state.share_text {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Share ");
        let text = Paragraph::new(share.as_str())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(text, area);
        return;
    }

    let (title, lines): (Span, Vec<Line>) = match &state.outcome {
        Outcome::Idle => (
            Span::raw(" Response "),
            vec![
                Line::raw(""),
                Line::styled("  Quick Reference", Style::default().fg(Color::DarkGray)),
                Line::styled("  ───────────────────────────", Style::default().fg(Color::DarkGray)),
                Line::styled("    Enter  Select endpoint", Style::default().fg(Color::DarkGray)),
                Line::styled("    e      Edit a parameter", Style::default().fg(Color::DarkGray)),
                Line::styled("    s      Send probe", Style::default().fg(Color::DarkGray)),
                Line::styled("    c      Share URL / curl", Style::default().fg(Color::DarkGray)),
                Line::styled("    ?      Full help", Style::default().fg(Color::DarkGray)),
                Line::raw(""),
                Line::styled("  Press 's' to send your first probe!", Style::default().fg(Color::DarkGray)),
            ],
        ),
        Outcome::Pending => (
            Span::styled(" Probing... ", Style::default().fg(Color::Yellow)),
            vec![Line::styled("Waiting for the service to answer...", Style::default().fg(Color::DarkGray))],
        ),
        Outcome::Failure(message) => (
            Span::styled(" Failed ", Style::default().fg(Color::Red).bold()),
            vec![
                Line::styled("Request failed", Style::default().fg(Color::Red).bold()),
                Line::raw(""),
                Line::raw(message.clone()),
            ],
        ),
        Outcome::Success(envelope) => {
            let color = status_color(envelope.status_code);
            let title = Span::styled(
                format!(" {} {} ", envelope.status_code, envelope.status_text),
                Style::default().fg(color).bold(),
            );

            let mut lines: Vec<Line> = envelope
                .headers
                .iter()
                .map(|(name, value)| {
                    Line::from(vec![
                        Span::styled(format!("{}: ", name), Style::default().fg(Color::Cyan)),
                        Span::raw(value.clone()),
                    ])
                })
                .collect();
            lines.push(Line::raw(""));
            if envelope.body.is_json() {
                lines.extend(highlight_json(&envelope.body.pretty()));
            } else {
                lines.extend(envelope.body.pretty().lines().map(|l| Line::raw(l.to_string())));
            }
            (title, lines)
        }
    };

    let time_text = if state.last_time_ms > 0 {
        format!(" {}ms ", state.last_time_ms)
    } else {
        String::new()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_bottom(Line::from(time_text).right_aligned());

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.filtering {
        " type to filter | Enter:apply | ESC:clear "
    } else if state.input_mode == InputMode::Editing {
        " ESC/Enter:stop editing | arrows:move | Tab:next field "
    } else if state.outcome.is_pending() {
        " Probing... (s resends, latest wins) "
    } else if matches!(&state.outcome, Outcome::Success(env) if env.is_http_error()) {
        " Endpoint returned an error status; its body is shown as-is | s:resend "
    } else if state.outcome.is_resolved() {
        " s:resend | c:share | h:log | Tab:panel | ?:help | q:quit "
    } else {
        " Tab:panel | Enter:select | e:edit | s:send | c:share | h:log | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 MINUTEMAN TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Move selection / scroll response

 CATALOGUE
   Enter              Load endpoint into the form
   /                  Filter by name
   g                  Probe the service root

 PROBE
   e / Enter          Edit selected parameter
   x                  Fill example values
   s                  Send probe
   c                  Share as URL / curl

 GENERAL
   h                  Session probe log
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_log_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 50, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Probe log ({}) ", state.log.len()))
        .style(Style::default().bg(Color::Black));

    let lines: Vec<Line> = if state.log.is_empty() {
        vec![Line::styled(
            "No probes sent this session.",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        state
            .log
            .iter()
            .map(|record| {
                let status = match record.status {
                    Some(code) => Span::styled(
                        format!("{:>4}", code),
                        Style::default().fg(status_color(code)).bold(),
                    ),
                    None => Span::styled("FAIL", Style::default().fg(Color::Red).bold()),
                };
                Line::from(vec![
                    Span::styled(
                        record.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    status,
                    Span::raw(format!(" {:>5}ms  ", record.time_ms)),
                    Span::raw(format!("/{:14}", record.endpoint)),
                    Span::styled(
                        format!("  {}", record.url),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let log = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(log, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
