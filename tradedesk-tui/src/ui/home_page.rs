//! Home page: greeting and a short key guide.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Witaj na stronie domowej!", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  2 / Tab   przejdź do złożonych zleceń",
            theme::muted(),
        )),
        Line::from(Span::styled("  3         złóż nowe zlecenie", theme::muted())),
        Line::from(Span::styled("  g         wpisz adres (np. #/orders)", theme::muted())),
        Line::from(Span::styled("  ?         pomoc", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Serwer: ", theme::muted()),
            Span::styled(app.base_url.as_str(), theme::neutral()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
