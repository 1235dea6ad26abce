use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("tab", Style::default().fg(Color::Magenta)),
            Span::raw("         Switch tabs"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("?", Style::default().fg(Color::Magenta)),
            Span::raw("           Show this help"),
        ]),
        Line::from(""),
        Line::from("Summary tab:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("i", Style::default().fg(Color::Magenta)),
            Span::raw("           Edit the query (Enter submits, Esc cancels)"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("e", Style::default().fg(Color::Magenta)),
            Span::raw("           Export report (unlocked after a summary)"),
        ]),
        Line::from(""),
        Line::from("Publications tab:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("/", Style::default().fg(Color::Magenta)),
            Span::raw("           Edit the search (Enter submits, empty shows all)"),
        ]),
        Line::from(""),
        Line::from("Notices:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw("   Dismiss"),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
