use crate::app::state::App;
use crate::domain::{Drilldown, ShipStatus};
use crossterm::event::KeyCode;

pub fn handle_overview_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.move_ship_cursor(false),
        KeyCode::Down | KeyCode::Char('j') => app.move_ship_cursor(true),
        KeyCode::Home => {
            let snapshot = app.snapshot();
            let ids: Vec<&str> = snapshot.ships.iter().map(|ship| ship.id.as_str()).collect();
            app.ship_cursor.select_first(&ids);
        }
        KeyCode::End => {
            let snapshot = app.snapshot();
            let ids: Vec<&str> = snapshot.ships.iter().map(|ship| ship.id.as_str()).collect();
            app.ship_cursor.select_last(&ids);
        }
        KeyCode::Enter => app.open_selected_ship(),
        KeyCode::Char('a') => app.open_add_ship(),
        KeyCode::Char('e') => app.open_edit_ship(),
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete_ship(),
        KeyCode::Char('i') => app.set_selected_status(ShipStatus::Idle),
        KeyCode::Char('w') => app.set_selected_status(ShipStatus::Wip),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            if let Some(kind) = Drilldown::from_index(index) {
                app.open_drilldown(kind);
            }
        }
        KeyCode::Char('v') => app.open_inventory(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}
