use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use api_types::transaction::TransactionKind;

use crate::{
    form::{FormField, FormIntent, TransactionForm},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &TransactionForm, theme: &Theme) {
    let title = match form.intent {
        FormIntent::Create => "New Transaction",
        FormIntent::Edit { .. } => "Edit Transaction",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Price
            Constraint::Length(1), // Category
            Constraint::Length(1), // Kind toggle
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error line
            Constraint::Min(0),
        ])
        .split(inner);

    render_field(
        frame,
        layout[0],
        "Description",
        &form.description,
        form.focus == FormField::Description,
        theme,
    );
    render_field(
        frame,
        layout[1],
        "Price",
        &form.price,
        form.focus == FormField::Price,
        theme,
    );
    render_field(
        frame,
        layout[2],
        "Category",
        &form.category,
        form.focus == FormField::Category,
        theme,
    );
    render_kind(frame, layout[3], form.kind, theme);

    if let Some(err) = &form.error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                err.as_str(),
                Style::default().fg(theme.error),
            ))),
            layout[5],
        );
    }
}

fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };

    let mut spans = vec![
        Span::styled(format!("{label:<12}"), label_style),
        Span::raw(value.to_string()),
    ];
    if focused {
        spans.push(Span::styled("▌", Style::default().fg(theme.accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_kind(frame: &mut Frame<'_>, area: Rect, kind: TransactionKind, theme: &Theme) {
    let (income_style, outcome_style) = match kind {
        TransactionKind::Income => (
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.dim),
        ),
        TransactionKind::Outcome => (
            Style::default().fg(theme.dim),
            Style::default()
                .fg(theme.negative)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<12}", "Type"), Style::default().fg(theme.dim)),
        Span::styled("Income", income_style),
        Span::raw("   "),
        Span::styled("Outcome", outcome_style),
        Span::styled("   (↑/↓ to switch)", Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
