//! Orders page: the order table with loading, error and empty states.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradedesk_core::domain::Order;
use tradedesk_core::format::{format_amount, translate_status};
use tradedesk_core::LoadState;

use crate::app::AppState;
use crate::theme;
use crate::ui::truncate;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.orders;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Twoje zamówienia:", theme::accent_bold()),
        Span::styled("  [j/k]wybór [Enter]szczegóły [r]odśwież", theme::muted()),
    ]));
    lines.push(Line::from(""));

    match &view.orders {
        LoadState::Idle | LoadState::Loading => {
            lines.push(Line::from(Span::styled("Ładowanie zamówień...", theme::muted())));
        }
        LoadState::Failed(msg) => {
            lines.push(Line::from(Span::styled(format!("Błąd: {msg}"), theme::negative())));
        }
        LoadState::Loaded(orders) if orders.is_empty() => {
            lines.push(Line::from(Span::styled("Brak zamówień.", theme::muted())));
        }
        LoadState::Loaded(orders) => {
            lines.push(Line::from(Span::styled(
                format!(
                    "{:<16} {:<14} {:<14} {:>8} {:>10}  {}",
                    "Numer zlecenia", "Status", "Isin", "Liczba", "Limit", "Szczegóły"
                ),
                theme::accent_bold(),
            )));

            // Keep the cursor row on screen.
            let visible_height = area.height.saturating_sub(3).max(1) as usize;
            let start = view.cursor.saturating_sub(visible_height - 1);
            let end = (start + visible_height).min(orders.len());

            for (i, order) in orders.iter().enumerate().take(end).skip(start) {
                lines.push(order_row(order, i == view.cursor));
            }
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn order_row(order: &Order, is_cursor: bool) -> Line<'static> {
    let style = if is_cursor {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::text()
    };
    let status_style = if is_cursor {
        style
    } else {
        theme::status_style(&order.status)
    };
    let limit = order
        .limit_price
        .filter(|p| *p != 0.0)
        .map(format_amount)
        .unwrap_or_default();
    let details = if order.status.is_filled() { "[Szczegóły]" } else { "" };

    Line::from(vec![
        Span::styled(format!("{:<16} ", truncate(order.order_id.as_str(), 16)), style),
        Span::styled(format!("{:<14} ", translate_status(&order.status)), status_style),
        Span::styled(format!("{:<14} ", truncate(&order.isin, 14)), style),
        Span::styled(format!("{:>8} ", order.quantity), style),
        Span::styled(format!("{limit:>10}  "), style),
        Span::styled(details, theme::positive()),
    ])
}
