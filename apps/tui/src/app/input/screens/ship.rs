use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_ship_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc | KeyCode::Backspace => app.back_to_overview(),
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab => app.step_tank(false),
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => app.step_tank(true),
        KeyCode::Char('t') => app.open_add_tank(),
        KeyCode::Char('s') => app.open_assign_sensors(),
        KeyCode::Char('k') => app.acknowledge_alarm(),
        KeyCode::Char('v') => app.open_inventory(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}
