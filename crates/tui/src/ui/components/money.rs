use api_types::{Currency, Money, transaction::TransactionKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Styled price for a list row: income green, outcome red with a `- `
/// prefix (the sign lives in the kind, not in the stored value).
#[must_use]
pub fn styled_price(
    kind: TransactionKind,
    price: Money,
    currency: Currency,
    theme: &Theme,
) -> Span<'static> {
    match kind {
        TransactionKind::Income => Span::styled(
            price.format(currency),
            Style::default().fg(theme.positive),
        ),
        TransactionKind::Outcome => Span::styled(
            format!("- {}", price.format(currency)),
            Style::default().fg(theme.negative),
        ),
    }
}

/// Styled signed total for the summary card, colored by sign and bold.
#[must_use]
pub fn styled_total(total: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let color = if total.is_negative() {
        theme.negative
    } else {
        theme.positive
    };
    Span::styled(
        total.format(currency),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
