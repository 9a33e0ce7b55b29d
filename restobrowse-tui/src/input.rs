//! Keyboard input dispatch: overlays → global keys → screen-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, InputField, Overlay, Screen};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Input(field) => {
            handle_input_overlay(app, field, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 3. Screen-specific keys.
    match app.screen {
        Screen::List(_) => handle_list_key(app, key),
        Screen::Detail(_) => handle_detail_key(app, key),
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

fn handle_input_overlay(app: &mut AppState, field: InputField, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(field),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) {
    let Some(list) = app.list_mut() else {
        return;
    };
    let c = &mut list.controller;

    let ticket = match key.code {
        // Cursor
        KeyCode::Char('j') | KeyCode::Down => {
            if list.cursor + 1 < c.results().items.len() {
                list.cursor += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            list.cursor = list.cursor.saturating_sub(1);
            None
        }
        KeyCode::Enter => {
            app.open_selected();
            return;
        }

        // Paging
        KeyCode::Char('n') | KeyCode::Right => c.next_page(),
        KeyCode::Char('p') | KeyCode::Left => c.prev_page(),
        KeyCode::Char('+') => c.cycle_per_page(),

        // Name search
        KeyCode::Char('/') => return app.begin_input(InputField::SearchName),
        KeyCode::Char('S') => Some(c.reset_search()),

        // Filters
        KeyCode::Char('a') => return app.begin_input(InputField::AddCuisine),
        KeyCode::Char('x') => return app.begin_input(InputField::RemoveCuisine),
        KeyCode::Char('c') => return app.begin_input(InputField::CountryCode),
        KeyCode::Char('$') => return app.begin_input(InputField::AverageSpent),
        KeyCode::Char('f') => Some(c.apply_filters()),
        KeyCode::Char('F') => Some(c.reset_filters()),

        // Location
        KeyCode::Char('t') => return app.begin_input(InputField::Latitude),
        KeyCode::Char('u') => return app.begin_input(InputField::Longitude),
        KeyCode::Char('r') => return app.begin_input(InputField::Range),
        KeyCode::Char('g') => {
            let ticket = c.search_nearby();
            if ticket.is_none() {
                app.set_warning("Nearby search needs latitude, longitude and range");
                return;
            }
            ticket
        }
        KeyCode::Char('G') => Some(c.reset_location()),

        // Image
        KeyCode::Char('i') => return app.begin_input(InputField::ImagePath),
        KeyCode::Char('m') => {
            let ticket = c.search_by_image();
            if ticket.is_none() {
                app.set_warning("Select an image first (i)");
                return;
            }
            ticket
        }
        KeyCode::Char('M') => Some(c.reset_image()),

        _ => None,
    };
    app.dispatch(ticket);
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back_to_list(),
        KeyCode::Char('r') => {
            if let Screen::Detail(detail) = &mut app.screen {
                let ticket = detail.retry();
                app.dispatch_detail(ticket);
            }
        }
        _ => {}
    }
}
