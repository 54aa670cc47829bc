use crate::api::{NewShip, NewTank, Sensor, Ship, ShipUpdate, TankType};
use crate::app::actions::ActionKind;
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::domain::Drilldown;

/// Which field of the ship form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipField {
    Name,
    LastPort,
    Personnel,
}

impl ShipField {
    const ORDER: [Self; 3] = [Self::Name, Self::LastPort, Self::Personnel];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::LastPort => "Last port",
            Self::Personnel => "Personnel",
        }
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    fn next(self) -> Self {
        Self::ORDER[wrap_increment(self.position(), Self::ORDER.len())]
    }

    fn prev(self) -> Self {
        Self::ORDER[wrap_decrement(self.position(), Self::ORDER.len())]
    }
}

/// Add/edit ship form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipForm {
    pub name: String,
    pub last_port: String,
    pub personnel: String,
    pub focus: ShipField,
}

impl ShipForm {
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            last_port: String::new(),
            personnel: String::new(),
            focus: ShipField::Name,
        }
    }

    pub fn from_ship(ship: &Ship) -> Self {
        Self {
            name: ship.name.clone(),
            last_port: ship.last_port.clone(),
            personnel: ship.personnel.to_string(),
            focus: ShipField::Name,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn push(&mut self, ch: char) {
        match self.focus {
            ShipField::Name => self.name.push(ch),
            ShipField::LastPort => self.last_port.push(ch),
            ShipField::Personnel if ch.is_ascii_digit() => self.personnel.push(ch),
            ShipField::Personnel => {}
        }
    }

    pub fn pop(&mut self) {
        match self.focus {
            ShipField::Name => self.name.pop(),
            ShipField::LastPort => self.last_port.pop(),
            ShipField::Personnel => self.personnel.pop(),
        };
    }

    pub fn value(&self, field: ShipField) -> &str {
        match field {
            ShipField::Name => &self.name,
            ShipField::LastPort => &self.last_port,
            ShipField::Personnel => &self.personnel,
        }
    }

    pub const fn fields() -> [ShipField; 3] {
        ShipField::ORDER
    }

    fn validated(&self) -> Result<(&str, &str, u32), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Ship name is required.".to_string());
        }
        let last_port = self.last_port.trim();
        if last_port.is_empty() {
            return Err("Last port is required.".to_string());
        }
        let personnel = self
            .personnel
            .trim()
            .parse::<u32>()
            .map_err(|_| "Personnel must be a whole number.".to_string())?;
        Ok((name, last_port, personnel))
    }

    pub fn to_new_ship(&self) -> Result<NewShip, String> {
        let (name, last_port, personnel) = self.validated()?;
        Ok(NewShip::from_form(name, last_port, personnel))
    }

    /// Update body for `ship`; the status is never edited through the form.
    pub fn to_update(&self, ship: &Ship) -> Result<ShipUpdate, String> {
        let (name, last_port, personnel) = self.validated()?;
        Ok(ShipUpdate {
            name: name.to_string(),
            last_port: last_port.to_string(),
            personnel,
            status: ship.status.clone(),
        })
    }
}

impl Default for ShipForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankField {
    Id,
    Type,
}

/// Add-tank form. The type is picked from the tank-type catalog by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TankForm {
    pub id: String,
    pub type_index: usize,
    pub focus: TankField,
}

impl TankForm {
    pub const fn new() -> Self {
        Self {
            id: String::new(),
            type_index: 0,
            focus: TankField::Id,
        }
    }

    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            TankField::Id => TankField::Type,
            TankField::Type => TankField::Id,
        };
    }

    pub const fn next_type(&mut self, types: usize) {
        self.type_index = wrap_increment(self.type_index, types);
    }

    pub const fn prev_type(&mut self, types: usize) {
        self.type_index = wrap_decrement(self.type_index, types);
    }

    pub fn selected_type<'a>(&self, types: &'a [TankType]) -> Option<&'a TankType> {
        types.get(self.type_index).or_else(|| types.first())
    }

    pub fn to_new_tank(&self, types: &[TankType]) -> Result<NewTank, String> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err("Tank id is required.".to_string());
        }
        let tank_type = self
            .selected_type(types)
            .ok_or_else(|| "No tank types available.".to_string())?;
        Ok(NewTank {
            id: id.to_string(),
            type_id: tank_type.id.clone(),
        })
    }
}

impl Default for TankForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Popup currently layered over a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    AddShip(ShipForm),
    EditShip { ship_id: String, form: ShipForm },
    ConfirmDelete { ship_id: String, name: String },
    Drilldown(Drilldown),
    AddTank(TankForm),
    AssignSensors { tank_id: String, input: String },
    SensorLog { sensor_id: String, detail: Option<Box<Sensor>> },
}

impl Modal {
    /// The action this modal submits, if any.
    pub const fn action(&self) -> Option<ActionKind> {
        match self {
            Self::AddShip(_) => Some(ActionKind::CreateShip),
            Self::EditShip { .. } => Some(ActionKind::UpdateShip),
            Self::ConfirmDelete { .. } => Some(ActionKind::DeleteShip),
            Self::AddTank(_) => Some(ActionKind::AddTank),
            Self::AssignSensors { .. } => Some(ActionKind::AssignSensors),
            Self::SensorLog { .. } => Some(ActionKind::LoadSensor),
            Self::Drilldown(_) => None,
        }
    }

    /// Entity the modal is bound to. The add-tank form is bound to the ship
    /// page that opened it, which the modal itself does not know.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::EditShip { ship_id, .. } | Self::ConfirmDelete { ship_id, .. } => Some(ship_id),
            Self::AssignSensors { tank_id, .. } => Some(tank_id),
            Self::SensorLog { sensor_id, .. } => Some(sensor_id),
            Self::AddShip(_) | Self::AddTank(_) | Self::Drilldown(_) => None,
        }
    }
}
