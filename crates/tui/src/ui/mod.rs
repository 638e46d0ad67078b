pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode, NoticeLevel};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, summary cards, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(5), // Summary cards
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::summary::render(
        frame,
        layout[1],
        state.store.summary(),
        state.currency,
        &theme,
    );

    match state.mode {
        Mode::List | Mode::Search => {
            screens::transactions::render(frame, layout[2], state, &theme);
        }
        Mode::Form => {
            if let Some(form) = &state.form {
                screens::form::render(frame, layout[2], form, &theme);
            }
        }
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let filter = state.store.query().unwrap_or("All");

    let line = Line::from(vec![
        Span::styled("Store", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Currency", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.currency.code())),
        Span::styled("Filter", Style::default().fg(theme.dim)),
        Span::raw(format!(": {filter}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints_for_mode(state.mode, theme);

    if let Some(notice) = &state.notice {
        let style = match notice.level {
            NoticeLevel::Info => Style::default().fg(theme.text),
            NoticeLevel::Error => Style::default().fg(theme.error),
        };
        parts.push(Span::styled("  │  ", Style::default().fg(theme.dim)));
        parts.push(Span::styled(notice.message.clone(), style));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn hints_for_mode(mode: Mode, theme: &Theme) -> Vec<Span<'static>> {
    let accent = Style::default().fg(theme.accent);
    match mode {
        Mode::List => vec![
            Span::styled("/", accent),
            Span::raw(" search  "),
            Span::styled("n", accent),
            Span::raw(" new  "),
            Span::styled("e", accent),
            Span::raw(" edit  "),
            Span::styled("d", accent),
            Span::raw(" delete  "),
            Span::styled("r", accent),
            Span::raw(" refresh  "),
            Span::styled("c", accent),
            Span::raw(" clear  "),
            Span::styled("q", accent),
            Span::raw(" quit"),
        ],
        Mode::Search => vec![
            Span::styled("Enter", accent),
            Span::raw(" apply  "),
            Span::styled("Esc", accent),
            Span::raw(" cancel"),
        ],
        Mode::Form => vec![
            Span::styled("Tab", accent),
            Span::raw(" next field  "),
            Span::styled("↑/↓", accent),
            Span::raw(" type  "),
            Span::styled("Enter", accent),
            Span::raw(" save  "),
            Span::styled("Esc", accent),
            Span::raw(" cancel"),
        ],
    }
}
