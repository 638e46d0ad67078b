use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Mode},
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search(frame, layout[0], state, theme);
    render_list(frame, layout[1], state, theme);
}

fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let searching = state.mode == Mode::Search;

    let text = if searching {
        // Trailing marker doubles as a cursor.
        Line::from(vec![
            Span::raw(state.search.as_str()),
            Span::styled("▌", Style::default().fg(theme.accent)),
        ])
    } else {
        match state.store.query() {
            Some(query) => Line::from(Span::raw(query)),
            None => Line::from(Span::styled(
                "Press / to search description, category or price",
                Style::default().fg(theme.dim),
            )),
        }
    };

    let border = if searching { theme.accent } else { theme.dim };
    let block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let transactions = state.store.transactions();

    if transactions.is_empty() {
        let message = match state.store.query() {
            Some(_) => "No transactions match the current filter.",
            None => "No transactions yet. Press n to add one.",
        };
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(theme.dim),
            )))
            .block(block),
            area,
        );
        return;
    }

    let items = transactions
        .iter()
        .map(|tx| {
            let date = tx
                .created_at
                .with_timezone(&state.timezone)
                .format("%d %b %Y %H:%M")
                .to_string();
            let price = money::styled_price(tx.kind, tx.price, state.currency, theme);

            let line = Line::from(vec![
                Span::styled(date, Style::default().fg(theme.dim)),
                Span::raw("  "),
                Span::raw(format!("{:<32}", clip(&tx.description, 32))),
                price,
                Span::raw("  "),
                Span::styled(
                    format!("#{}", tx.category),
                    Style::default().fg(theme.dim),
                ),
            ]);
            ListItem::new(line)
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Transactions"))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
