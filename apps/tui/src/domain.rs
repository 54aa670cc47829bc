use serde::{Deserialize, Serialize};

/// Operational status reported for a ship.
///
/// The API is free to send statuses the console does not know about; those are
/// kept verbatim in `Other` and rendered with the neutral badge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipStatus {
    #[default]
    Idle,
    Wip,
    Danger,
    Other(String),
}

impl ShipStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Wip => "WIP",
            Self::Danger => "Danger",
            Self::Other(raw) => raw,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Idle" => Self::Idle,
            "WIP" => Self::Wip,
            "Danger" => Self::Danger,
            other => Self::Other(other.to_string()),
        }
    }

    /// Statuses a user can pick directly from the overview controls.
    pub const fn selectable() -> [Self; 2] {
        [Self::Idle, Self::Wip]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Danger => "In Danger",
            other => other.as_str(),
        }
    }

    pub const fn badge(&self) -> BadgeClass {
        match self {
            Self::Danger => BadgeClass::Danger,
            Self::Wip => BadgeClass::Ok,
            Self::Idle | Self::Other(_) => BadgeClass::Gray,
        }
    }

    pub const fn is_danger(&self) -> bool {
        matches!(self, Self::Danger)
    }
}

impl From<String> for ShipStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ShipStatus> for String {
    fn from(value: ShipStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ShipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeClass {
    Danger,
    Ok,
    Gray,
}

impl BadgeClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Ok => "ok",
            Self::Gray => "gray",
        }
    }
}

/// Drill-down lists reachable from the overview stat tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drilldown {
    Dock,
    UnderOperation,
    Personnel,
    Danger,
}

impl Drilldown {
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Dock),
            1 => Some(Self::UnderOperation),
            2 => Some(Self::Personnel),
            3 => Some(Self::Danger),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dock => "Ships at Dock",
            Self::UnderOperation => "Ships under Operation",
            Self::Personnel => "Working Personnel",
            Self::Danger => "Spaces in Danger",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_mapping_matches_status() {
        assert_eq!(ShipStatus::Danger.badge().as_str(), "danger");
        assert_eq!(ShipStatus::Danger.label(), "In Danger");
        assert_eq!(ShipStatus::Wip.badge().as_str(), "ok");
        assert_eq!(ShipStatus::Wip.label(), "WIP");
        assert_eq!(ShipStatus::Idle.badge().as_str(), "gray");
        assert_eq!(ShipStatus::Idle.label(), "Idle");
    }

    #[test]
    fn unknown_status_keeps_raw_value() {
        let status: ShipStatus = serde_json::from_str("\"Maintenance\"").unwrap();
        assert_eq!(status, ShipStatus::Other("Maintenance".to_string()));
        assert_eq!(status.label(), "Maintenance");
        assert_eq!(status.badge(), BadgeClass::Gray);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Maintenance\"");
    }

    #[test]
    fn wip_serializes_in_upper_case() {
        assert_eq!(serde_json::to_string(&ShipStatus::Wip).unwrap(), "\"WIP\"");
    }
}
