use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_inventory_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.back_to_overview(),
        KeyCode::Up | KeyCode::Char('k') => app.move_sensor_cursor(false),
        KeyCode::Down | KeyCode::Char('j') => app.move_sensor_cursor(true),
        KeyCode::Home => {
            let snapshot = app.snapshot();
            let ids: Vec<&str> = snapshot
                .sensors
                .iter()
                .map(|sensor| sensor.id.as_str())
                .collect();
            app.sensor_cursor.select_first(&ids);
        }
        KeyCode::End => {
            let snapshot = app.snapshot();
            let ids: Vec<&str> = snapshot
                .sensors
                .iter()
                .map(|sensor| sensor.id.as_str())
                .collect();
            app.sensor_cursor.select_last(&ids);
        }
        KeyCode::Enter | KeyCode::Char('l') => app.open_sensor_log(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}
