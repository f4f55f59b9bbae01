//! Overlay widgets: order detail, address bar, error history, help.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tradedesk_core::format::detail_rows;
use tradedesk_core::{LoadState, OrderDetailView};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Single-order detail overlay.
pub fn render_order_detail(f: &mut Frame, area: Rect, detail: &OrderDetailView) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let id = detail.order_id.as_ref().map(|id| id.as_str()).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" Szczegóły zamówienia {id} [Esc]zamknij "))
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    match &detail.order {
        LoadState::Idle => {}
        LoadState::Loading => {
            lines.push(Line::from(Span::styled("Ładowanie...", theme::muted())));
        }
        LoadState::Failed(msg) => {
            lines.push(Line::from(Span::styled(msg.as_str(), theme::negative())));
        }
        LoadState::Loaded(order) => {
            for (label, value) in detail_rows(order) {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {label}: "), theme::muted()),
                    Span::styled(value, theme::accent()),
                ]));
            }
        }
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Address bar overlay: type a location hash.
pub fn render_address(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Adres [Enter]przejdź [Esc]anuluj ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("#/home, #/orders, #/buy", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text).block(block), popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Historia błędów ({}) [Esc]zamknij [j/k]przewiń ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("Brak błędów.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(visible_height)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Key reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Pomoc ")
        .title_style(theme::accent_bold());

    let keys: [(&str, &str); 10] = [
        ("1 / 2 / 3", "strona domowa / zlecenia / kupno"),
        ("Tab", "następna strona"),
        ("g", "przejdź pod adres"),
        ("e", "historia błędów"),
        ("j / k", "wybór zlecenia"),
        ("Enter", "szczegóły zlecenia lub złożenie zlecenia"),
        ("r", "odśwież listę zleceń"),
        ("↑ / ↓", "pole formularza"),
        ("← / →", "zmiana instrumentu, strony, typu"),
        ("q / Ctrl+C", "wyjście"),
    ];
    let mut lines = vec![Line::from("")];
    for (key, action) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:>12}  "), theme::accent()),
            Span::styled(action, theme::muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Dowolny klawisz zamyka pomoc",
        theme::neutral(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
