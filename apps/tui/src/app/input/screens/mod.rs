use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod help;
mod inventory;
mod modal;
mod overview;
mod ship;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.notice.is_some() {
        if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
            app.notice = None;
        }
        return;
    }

    if app.modal.is_some() {
        modal::handle_modal_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Overview => overview::handle_overview_input(app, key),
        AppScreen::ShipDetail => ship::handle_ship_input(app, key),
        AppScreen::Inventory => inventory::handle_inventory_input(app, key),
    }
}
