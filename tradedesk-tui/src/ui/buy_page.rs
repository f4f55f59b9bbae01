//! Buy page: the order form, live price of the selected instrument, and the
//! submission outcome.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradedesk_core::draft::DraftField;
use tradedesk_core::format::format_amount;
use tradedesk_core::LoadState;

use crate::app::{AppState, BuyPageState};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let buy = &app.buy;
    let now = chrono::Local::now();
    let mut lines: Vec<Line> = Vec::new();

    match &buy.reference {
        LoadState::Idle | LoadState::Loading => lines.push(Line::from(Span::styled(
            "Ładowanie instrumentów...",
            theme::muted(),
        ))),
        LoadState::Failed(msg) => {
            lines.push(Line::from(Span::styled(msg.as_str(), theme::negative())))
        }
        LoadState::Loaded(data) => lines.push(Line::from(Span::styled(
            format!("Dostępne instrumenty: {}", data.instruments.len()),
            theme::muted(),
        ))),
    }
    lines.push(Line::from(""));

    for field in DraftField::ALL {
        let focused = field == buy.focus;
        let marker = if focused { "> " } else { "  " };
        let mut spans = vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<14}", field.label()), theme::field_label(focused)),
        ];
        spans.extend(field_value(buy, field, focused));
        if let Some(err) = buy.draft().field_error(field, now) {
            spans.push(Span::styled(format!("  {err}"), theme::warning()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if buy.form.loading {
        lines.push(Line::from(Span::styled("Wysyłanie...", theme::muted())));
    } else {
        lines.push(Line::from(Span::styled("[Enter] Złóż zlecenie", theme::accent_bold())));
    }
    if let Some(msg) = &buy.form.success {
        lines.push(Line::from(Span::styled(msg.as_str(), theme::positive())));
        if let Some(order) = &buy.form.last_created {
            lines.push(Line::from(Span::styled(
                format!("Numer zlecenia: {}", order.order_id),
                theme::muted(),
            )));
        }
    }
    if let Some(msg) = &buy.form.error {
        lines.push(Line::from(Span::styled(msg.as_str(), theme::negative())));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn field_value(buy: &BuyPageState, field: DraftField, focused: bool) -> Vec<Span<'static>> {
    let draft = buy.draft();
    match field {
        DraftField::Instrument => {
            let mut spans = match buy.selected_instrument() {
                Some(inst) => vec![Span::styled(
                    format!("< {} ({}) {} >", inst.name, inst.ticker, inst.isin),
                    theme::text(),
                )],
                None if draft.isin.is_empty() => {
                    vec![Span::styled("< wybierz instrument >", theme::muted())]
                }
                None => vec![Span::styled(format!("< {} >", draft.isin), theme::text())],
            };
            if let Some(price) = buy.selected_price() {
                spans.push(Span::styled(
                    format!("  Kurs: {} {}", format_amount(price), draft.trade_currency),
                    theme::neutral(),
                ));
            }
            spans
        }
        DraftField::Side => vec![Span::styled(
            format!("< {} >", draft.side.label()),
            theme::side_style(draft.side),
        )],
        DraftField::OrderType => vec![Span::styled(
            format!("< {} ({}) >", draft.order_type.label(), draft.order_type.code()),
            theme::text(),
        )],
        DraftField::LimitPrice if !draft.limit_price_editable() => {
            vec![Span::styled("nie dotyczy", theme::disabled())]
        }
        _ => {
            let mut text = draft.field_text(field);
            if focused {
                text.push('_');
            }
            vec![Span::styled(text, theme::text())]
        }
    }
}
