//! Top-level UI layout: nav bar, active page, status bar.

pub mod buy_page;
pub mod home_page;
pub mod nav_bar;
pub mod orders_page;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use tradedesk_core::Route;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: 1-line nav bar + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let nav_area = chunks[0];
    let main_area = chunks[1];
    let status_area = chunks[2];

    nav_bar::render(f, nav_area, app);
    draw_page(f, main_area, app);
    status_bar::render(f, status_area, app);

    if app.route() == Route::Orders && app.orders.detail.open {
        overlays::render_order_detail(f, main_area, &app.orders.detail);
    }
    match app.overlay {
        Overlay::Address => overlays::render_address(f, main_area, &app.address_input),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::None => {}
    }
}

/// Draw the active page inside a bordered block titled with its location.
fn draw_page(f: &mut Frame, area: Rect, app: &AppState) {
    let route = app.route();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", route.label(), app.router.hash()))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match route {
        Route::Home => home_page::render(f, inner, app),
        Route::Orders => orders_page::render(f, inner, app),
        Route::Buy => buy_page::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate to `max` characters, marking the cut with a trailing dot.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}.")
    }
}
