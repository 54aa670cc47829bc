// Application state and keyboard handling for the fleet console

pub mod actions;
pub mod forms;
pub mod input;
pub mod state;

pub use actions::{ActionKind, ActionOutcome, AppActions, AppEvent, PendingActions};
pub use forms::{Modal, ShipField, ShipForm, TankField, TankForm};
pub use input::handle_input;
pub use state::{App, AppScreen, Notice, ShipPage};
