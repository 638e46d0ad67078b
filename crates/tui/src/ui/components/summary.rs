use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use api_types::Currency;

use crate::{
    store::Summary,
    ui::{components::money, theme::Theme},
};

/// Income / Outcome / Total cards above the list.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: Summary,
    currency: Currency,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let income = Span::styled(
        summary.income.format(currency),
        Style::default().fg(theme.positive),
    );
    let outcome = Span::styled(
        format!("- {}", summary.outcome.format(currency)),
        Style::default().fg(theme.negative),
    );
    let total = money::styled_total(summary.total, currency, theme);

    render_card(frame, layout[0], "Income", income, theme);
    render_card(frame, layout[1], "Outcome", outcome, theme);
    render_card(frame, layout[2], "Total", total, theme);
}

fn render_card(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    amount: Span<'static>,
    theme: &Theme,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.dim));

    let content = Paragraph::new(Line::from(amount))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(content, area);
}
