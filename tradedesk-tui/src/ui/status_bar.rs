//! Bottom status bar: key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradedesk_core::Route;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(hints(app.route()), theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Success => theme::positive(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hints(route: Route) -> &'static str {
    match route {
        Route::Home => " 1-3:strony g:adres e:błędy ?:pomoc q:wyjście",
        Route::Orders => " j/k:wybór Enter:szczegóły r:odśwież e:błędy q:wyjście",
        Route::Buy => " ↑/↓:pole ←/→:zmień Enter:złóż Esc:wyjdź z pola Ctrl+C:wyjście",
    }
}
