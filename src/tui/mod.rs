mod help;
mod state;

use crate::cli::{build_config, Cli};
use crate::model::WorkflowEvent;
use crate::workflows::{self, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame, Terminal,
};
use state::{apply_event, UiState, TAB_TITLES};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // controller; both sides drain eagerly.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<WorkflowEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
    let cfg = build_config(&args);

    // The TUI runs in a dedicated thread to keep blocking terminal I/O out
    // of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    let res = workflows::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    mut event_rx: UnboundedReceiver<WorkflowEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; workflow results arrive as
    // events and are applied in completion order (last-to-complete wins).
    let mut state = UiState::default();

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            match ev {
                WorkflowEvent::OpenReport { url } => match open::that(&url) {
                    Ok(()) => state.status = format!("Opening report: {url}"),
                    Err(err) => state.status = format!("Could not open browser: {err} ({url})"),
                },
                other => apply_event(&mut state, other),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if k.modifiers == KeyModifiers::CONTROL && k.code == KeyCode::Char('c') {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }

                // A notice is blocking: nothing else reacts until dismissed.
                if state.notice.is_some() {
                    if matches!(k.code, KeyCode::Enter | KeyCode::Esc) {
                        state.notice = None;
                    }
                    continue;
                }

                if state.query_editing || state.search_editing {
                    match k.code {
                        KeyCode::Enter => {
                            if state.query_editing {
                                state.query_editing = false;
                                let _ = cmd_tx.send(UiCommand::SubmitSummary {
                                    query: state.query_input.clone(),
                                });
                            } else {
                                state.search_editing = false;
                                let _ = cmd_tx.send(UiCommand::SearchListing {
                                    query: state.search_input.clone(),
                                });
                            }
                        }
                        KeyCode::Esc => {
                            state.query_editing = false;
                            state.search_editing = false;
                        }
                        KeyCode::Backspace => {
                            if state.query_editing {
                                state.query_input.pop();
                            } else {
                                state.search_input.pop();
                            }
                        }
                        KeyCode::Char(c) => {
                            if state.query_editing {
                                state.query_input.push(c);
                            } else {
                                state.search_input.push(c);
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                match k.code {
                    KeyCode::Char('q') => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    KeyCode::Tab => {
                        state.tab = (state.tab + 1) % TAB_TITLES.len();
                    }
                    KeyCode::Char('?') => {
                        state.tab = 3;
                    }
                    KeyCode::Char('i') if state.tab == 0 => {
                        state.query_editing = true;
                    }
                    KeyCode::Char('e') if state.tab == 0 => {
                        // The controller re-derives from the gate; clicking
                        // before a summary completed yields a prompt.
                        let _ = cmd_tx.send(UiCommand::ExportReport);
                    }
                    KeyCode::Char('/') if state.tab == 1 => {
                        state.search_editing = true;
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let tabs = Tabs::new(TAB_TITLES.iter().map(|t| Line::from(*t)))
        .block(Block::default().borders(Borders::ALL).title("research-console"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .select(state.tab);
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_summary_tab(chunks[1], f, state),
        1 => draw_publications_tab(chunks[1], f, state),
        2 => draw_history_tab(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    let status = Paragraph::new(Line::from(vec![
        Span::raw(state.status.clone()),
        Span::styled(
            "   q quit | tab switch | ? help",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    if let Some(msg) = &state.notice {
        draw_notice(area, f, msg);
    }
}

fn draw_summary_tab(area: Rect, f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let input_style = if state.query_editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let input = Paragraph::new(state.query_input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Query (i to edit, Enter to submit)"),
        );
    f.render_widget(input, chunks[0]);

    // A pending submit replaces the pane immediately so latency is visible
    // before the request resolves.
    let body = if state.summary_pending {
        "Generating summary..."
    } else if let Some(view) = &state.summary {
        view.as_str()
    } else {
        "Submit a query to generate a summary."
    };
    let summary = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(summary, chunks[1]);

    let export_line = match &state.export_query {
        Some(q) => Line::from(vec![
            Span::styled("[ Export PDF ]", Style::default().fg(Color::Green)),
            Span::raw(format!("  ready for \"{q}\"  (press e)")),
        ]),
        None => Line::from(Span::styled(
            "[ Export PDF ]  locked until a summary completes",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let export = Paragraph::new(export_line)
        .block(Block::default().borders(Borders::ALL).title("Report"));
    f.render_widget(export, chunks[2]);
}

fn draw_publications_tab(area: Rect, f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let input_style = if state.search_editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let input = Paragraph::new(state.search_input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search (/ to edit, Enter to submit; empty shows all)"),
        );
    f.render_widget(input, chunks[0]);

    let header = Row::new(["ID", "Title", "Author", "Year"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = if !state.listing_loaded {
        vec![Row::new(vec![Cell::from("Loading publications...")])]
    } else if state.rows.is_empty() {
        vec![Row::new(vec![Cell::from("No results found.")])]
    } else {
        state
            .rows
            .iter()
            .map(|p| Row::new(p.cells().map(Cell::from)))
            .collect()
    };
    let title = match &state.refreshed_at {
        Some(t) => format!("Publications ({}) - refreshed {t}", state.rows.len()),
        None => "Publications".to_string(),
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(50),
            Constraint::Percentage(28),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, chunks[1]);
}

fn draw_history_tab(area: Rect, f: &mut Frame, state: &UiState) {
    let items: Vec<ListItem> = if !state.history_loaded {
        vec![ListItem::new("Loading reports...")]
    } else if state.history.is_empty() {
        vec![ListItem::new("No previous reports found.")]
    } else {
        state
            .history
            .iter()
            .map(|r| {
                ListItem::new(Line::from(vec![
                    Span::raw(r.query.clone()),
                    Span::raw(" - "),
                    Span::styled("View", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("  {}", r.view_url),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };
    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Previous Reports"));
    f.render_widget(list, area);
}

fn draw_notice(area: Rect, f: &mut Frame, msg: &str) {
    let rect = centered_rect(60, 6, area);
    f.render_widget(Clear, rect);
    let p = Paragraph::new(vec![
        Line::from(msg.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Notice")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(p, rect);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height: height.min(r.height),
    }
}
