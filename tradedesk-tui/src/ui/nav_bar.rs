//! Nav bar: one tab per route, the active one highlighted.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradedesk_core::Route;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Paragraph::new(tabs_line(app.router.active_tab())), area);
}

fn tabs_line(active: Route) -> Line<'static> {
    let mut spans = vec![Span::styled(" Tradedesk ", theme::accent_bold())];
    for route in Route::ALL {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {}:{} ", route.index() + 1, route.label()),
            theme::tab(route == active),
        ));
    }
    Line::from(spans)
}
