//! Keyboard input dispatch: overlays → global keys → page-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tradedesk_core::draft::DraftField;
use tradedesk_core::Route;

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Address => {
            handle_address_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }
    if app.route() == Route::Orders && app.orders.detail.open {
        handle_detail_overlay(app, key);
        return;
    }

    // 2. Global keys. Characters go to the form while a text field has focus.
    let typing = app.route() == Route::Buy && app.buy.focus.is_text();
    if !(typing && matches!(key.code, KeyCode::Char(_))) && handle_global_key(app, key) {
        return;
    }

    // 3. Page-specific keys.
    match app.route() {
        Route::Home => {}
        Route::Orders => handle_orders_key(app, key),
        Route::Buy => handle_buy_key(app, key),
    }
}

/// Returns true when the key was consumed.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(route) = Route::from_index(c as usize - '1' as usize) {
                app.go(route);
            }
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.go(app.route().prev());
            } else {
                app.go(app.route().next());
            }
        }
        KeyCode::BackTab => app.go(app.route().prev()),
        KeyCode::Char('g') => app.open_address_bar(),
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        _ => return false,
    }
    true
}

fn handle_address_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.address_input.clear();
        }
        KeyCode::Enter => app.commit_address(),
        KeyCode::Backspace => {
            app.address_input.pop();
        }
        KeyCode::Char(c) => app.address_input.push(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_detail_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_order_details(),
        _ => {}
    }
}

fn handle_orders_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.orders.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.orders.select_prev(),
        KeyCode::Enter => app.open_order_details(),
        KeyCode::Char('r') => app.refresh_orders(),
        _ => {}
    }
}

fn handle_buy_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.submit_order();
        return;
    }
    let buy = &mut app.buy;
    match key.code {
        KeyCode::Down => buy.focus = buy.focus.next(),
        KeyCode::Up => buy.focus = buy.focus.prev(),
        KeyCode::Left if !buy.focus.is_text() => buy.cycle_choice(false),
        KeyCode::Right if !buy.focus.is_text() => buy.cycle_choice(true),
        KeyCode::Char(' ') if !buy.focus.is_text() => buy.cycle_choice(true),
        KeyCode::Char(c) if buy.focus.is_text() => buy.type_char(c),
        KeyCode::Backspace => buy.backspace(),
        KeyCode::Esc => buy.focus = DraftField::Instrument,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{drain, sample_orders, test_app};
    use crate::worker::{WorkerCommand, WorkerResponse};

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn number_keys_switch_routes() {
        let (mut app, rx, _tx) = test_app("");
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.route(), Route::Orders);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.route(), Route::Buy);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.route(), Route::Home);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.route(), Route::Buy);
        assert_eq!(
            drain(&rx),
            vec![WorkerCommand::LoadOrders, WorkerCommand::LoadReferenceData, WorkerCommand::LoadReferenceData]
        );
    }

    #[test]
    fn q_quits_and_ctrl_c_always_quits() {
        let (mut app, _rx, _tx) = test_app("");
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let (mut app, _rx, _tx) = test_app("#/buy");
        app.buy.focus = DraftField::Quantity;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn address_overlay_typed_route() {
        let (mut app, _rx, _tx) = test_app("");
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.overlay, Overlay::Address);
        for _ in 0.."#/home".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "#/unknown");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.router.hash(), "#/unknown");
        assert_eq!(app.router.active_tab(), Route::Home);
    }

    #[test]
    fn orders_page_enter_opens_filled_detail_and_esc_closes() {
        let (mut app, rx, _tx) = test_app("#/orders");
        app.handle_worker_response(WorkerResponse::OrdersLoaded(Ok(sample_orders())));
        drain(&rx);

        press(&mut app, KeyCode::Enter);
        assert!(!app.orders.detail.open);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(app.orders.detail.open);

        // Overlay swallows route keys.
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.route(), Route::Orders);

        press(&mut app, KeyCode::Esc);
        assert!(!app.orders.detail.open);
        assert_eq!(app.orders.selected, None);
    }

    #[test]
    fn r_refreshes_orders() {
        let (mut app, rx, _tx) = test_app("#/orders");
        drain(&rx);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(drain(&rx), vec![WorkerCommand::LoadOrders]);
        assert!(app.orders.orders.is_loading());
    }

    #[test]
    fn buy_form_typing_and_focus() {
        let (mut app, _rx, _tx) = test_app("#/buy");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.buy.focus, DraftField::Quantity);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "25");
        assert_eq!(app.buy.draft().quantity, "25");
        // '2' typed into the field, not a route switch.
        assert_eq!(app.route(), Route::Buy);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.buy.focus, DraftField::Instrument);
    }

    #[test]
    fn error_overlay_toggles() {
        let (mut app, _rx, _tx) = test_app("");
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _rx, _tx) = test_app("");
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_key() -> impl Strategy<Value = KeyCode> {
            prop_oneof![
                Just(KeyCode::Enter),
                Just(KeyCode::Esc),
                Just(KeyCode::Tab),
                Just(KeyCode::BackTab),
                Just(KeyCode::Up),
                Just(KeyCode::Down),
                Just(KeyCode::Left),
                Just(KeyCode::Right),
                Just(KeyCode::Backspace),
                "[0-9a-z#/ ,.]".prop_map(|s| KeyCode::Char(s.chars().next().unwrap_or('x'))),
            ]
        }

        proptest! {
            #[test]
            fn random_key_sequences_keep_state_consistent(
                keys in proptest::collection::vec(arb_key(), 0..80),
            ) {
                let (mut app, _rx, _tx) = test_app("#/orders");
                app.handle_worker_response(WorkerResponse::OrdersLoaded(Ok(sample_orders())));

                for code in keys {
                    press(&mut app, code);
                    if !app.running {
                        break;
                    }

                    let rows = app.orders.rows().len();
                    prop_assert!(rows == 0 || app.orders.cursor < rows);
                    if app.orders.detail.open {
                        prop_assert_eq!(app.route(), Route::Orders);
                        prop_assert!(app.orders.selected.is_some());
                    }
                    prop_assert_eq!(app.route(), Route::from_hash(app.router.hash()));
                }
            }
        }
    }
}
