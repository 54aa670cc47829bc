use crate::app::forms::{Modal, ShipForm, TankField};
use crate::app::state::App;
use crate::domain::Drilldown;
use crossterm::event::KeyCode;

pub fn handle_modal_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Esc {
        app.modal = None;
        return;
    }

    let tank_types = app.snapshot().tank_types.len();
    let Some(modal) = app.modal.as_mut() else {
        return;
    };

    match modal {
        Modal::AddShip(form) | Modal::EditShip { form, .. } => {
            if handle_ship_form_key(form, key) {
                app.submit_modal();
            }
        }
        Modal::ConfirmDelete { .. } => match key {
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => app.submit_modal(),
            KeyCode::Char('n' | 'N') => app.modal = None,
            _ => {}
        },
        Modal::Drilldown(kind) => match key {
            KeyCode::Char(digit @ '1'..='4') => {
                if let Some(next) = Drilldown::from_index(digit as usize - '1' as usize) {
                    *kind = next;
                }
            }
            KeyCode::Enter | KeyCode::Char('q') => app.modal = None,
            _ => {}
        },
        Modal::AddTank(form) => match (key, form.focus) {
            (KeyCode::Enter, _) => app.submit_modal(),
            (KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down, _) => {
                form.toggle_focus();
            }
            (KeyCode::Left, TankField::Type) => form.prev_type(tank_types),
            (KeyCode::Right, TankField::Type) => form.next_type(tank_types),
            (KeyCode::Backspace, TankField::Id) => {
                form.id.pop();
            }
            (KeyCode::Char(ch), TankField::Id) => form.id.push(ch),
            _ => {}
        },
        Modal::AssignSensors { input, .. } => match key {
            KeyCode::Enter => app.submit_modal(),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) => input.push(ch),
            _ => {}
        },
        Modal::SensorLog { .. } => {
            if matches!(key, KeyCode::Enter | KeyCode::Char('q')) {
                app.modal = None;
            }
        }
    }
}

/// Returns `true` when the form should be submitted.
fn handle_ship_form_key(form: &mut ShipForm, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => return true,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(ch) => form.push(ch),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::AppEvent;
    use crate::app::forms::ShipField;
    use crate::domain::ShipStatus;
    use crate::store::fixtures::{ship, tank_type};
    use crate::store::Snapshot;

    fn app_on_ship() -> App {
        let mut app = App::new();
        app.handle_event(AppEvent::Snapshot(Ok(Snapshot::new(
            vec![ship("MANTA", ShipStatus::Idle, 3, &[("T1", &[])])],
            Vec::new(),
            vec![tank_type("1", "Cargo"), tank_type("2", "Ballast")],
        ))));
        app.open_ship("MANTA");
        app
    }

    #[test]
    fn typing_fills_the_focused_ship_field() {
        let mut app = App::new();
        app.open_add_ship();
        for key in [KeyCode::Char('O'), KeyCode::Tab, KeyCode::Char('X')] {
            handle_modal_input(&mut app, key);
        }

        let Some(Modal::AddShip(form)) = &app.modal else {
            panic!("add-ship form should be open");
        };
        assert_eq!(form.name, "O");
        assert_eq!(form.last_port, "X");
        assert_eq!(form.focus, ShipField::LastPort);
    }

    #[test]
    fn escape_closes_any_modal() {
        let mut app = app_on_ship();
        app.open_add_tank();
        handle_modal_input(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }

    #[test]
    fn tank_type_cycles_only_when_focused() {
        let mut app = app_on_ship();
        app.open_add_tank();
        handle_modal_input(&mut app, KeyCode::Right);
        handle_modal_input(&mut app, KeyCode::Tab);
        handle_modal_input(&mut app, KeyCode::Right);

        let Some(Modal::AddTank(form)) = &app.modal else {
            panic!("add-tank form should be open");
        };
        assert_eq!(form.type_index, 1);
        assert!(form.id.is_empty());
    }

    #[test]
    fn empty_sensor_list_is_not_submitted() {
        let mut app = app_on_ship();
        app.open_assign_sensors();
        handle_modal_input(&mut app, KeyCode::Char(' '));
        handle_modal_input(&mut app, KeyCode::Enter);

        assert!(matches!(app.modal, Some(Modal::AssignSensors { .. })));
        assert!(app.notice.is_none());
        assert!(app.pending.is_idle());
    }

    #[test]
    fn drilldown_switches_lists_by_number() {
        let mut app = App::new();
        app.open_drilldown(Drilldown::Dock);
        handle_modal_input(&mut app, KeyCode::Char('4'));
        assert_eq!(app.modal, Some(Modal::Drilldown(Drilldown::Danger)));
    }
}
