use std::fmt;

use serde::{Deserialize, Serialize};

/// Access role attached to a seller. Carried as data only; nothing in the
/// core enforces permissions from it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SellerRole {
    /// Account owner.
    Master,
    /// Manages a team of sellers.
    Manager,
    /// Regular team member.
    TeamMember,
}

impl Default for SellerRole {
    fn default() -> Self {
        Self::TeamMember
    }
}

impl SellerRole {
    /// Human-readable role label.
    pub fn as_str(self) -> &'static str {
        match self {
            SellerRole::Master => "Master",
            SellerRole::Manager => "Manager",
            SellerRole::TeamMember => "Team Member",
        }
    }
}

impl fmt::Display for SellerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain representation of a person eligible to be assigned deals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Seller {
    /// Unique identifier of the seller.
    pub id: i64,
    /// Seller name, unique case-insensitively at creation time.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Access role.
    pub role: SellerRole,
    /// Whether the seller is available in pickers and new deals.
    pub active: bool,
}

/// Payload required to register a new seller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSeller {
    /// Seller name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Access role.
    pub role: SellerRole,
}

impl NewSeller {
    /// Build a new seller payload with the given name and role.
    pub fn new(name: impl Into<String>, role: SellerRole) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            role,
        }
    }

    /// Attach a contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach a contact phone.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Replacement data applied when updating a seller. The active flag is
/// deliberately absent; it only changes through the toggle operation.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerPatch {
    /// New seller name.
    pub name: String,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New access role.
    pub role: SellerRole,
}
