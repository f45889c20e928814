use serde::{Deserialize, Serialize};

/// Domain representation of a business unit (branch/location).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Unique identifier of the unit.
    pub id: i64,
    /// Unit name, unique case-insensitively at creation time.
    pub name: String,
    /// Whether the unit is available in pickers and new deals.
    pub active: bool,
}

/// Payload required to register a new unit.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUnit {
    /// Unit name.
    pub name: String,
}

impl NewUnit {
    /// Build a new unit payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
