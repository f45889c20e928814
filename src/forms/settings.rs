use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::seller::{NewSeller, SellerPatch, SellerRole};
use crate::domain::unit::NewUnit;
use crate::forms::{parse_money_cents, sanitize_inline_text};

/// Maximum allowed length for unit and seller names.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the settings form helpers.
pub type SettingsFormResult<T> = Result<T, SettingsFormError>;

/// Errors that can occur while processing the settings-page forms.
#[derive(Debug, Error)]
pub enum SettingsFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("name cannot be empty")]
    EmptyName,
    /// The goal amount could not be parsed.
    #[error("invalid goal amount `{value}`")]
    InvalidMoney { value: String },
}

/// Form payload emitted when submitting the "Add unit" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddUnitForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl AddUnitForm {
    /// Validates and sanitizes the payload into a domain [`NewUnit`].
    pub fn into_new_unit(self) -> SettingsFormResult<NewUnit> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(SettingsFormError::EmptyName);
        }

        Ok(NewUnit::new(name))
    }
}

/// Form payload emitted when renaming a unit.
#[derive(Debug, Deserialize, Validate)]
pub struct EditUnitForm {
    /// Identifier of the unit being renamed.
    pub unit_id: i64,
    /// New name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl EditUnitForm {
    /// Validates and sanitizes the payload into an `(id, name)` pair.
    pub fn into_parts(self) -> SettingsFormResult<(i64, String)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(SettingsFormError::EmptyName);
        }

        Ok((self.unit_id, name))
    }
}

/// Form payload emitted when submitting the "Add seller" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddSellerForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Access role.
    pub role: SellerRole,
}

impl AddSellerForm {
    /// Validates and sanitizes the payload into a domain [`NewSeller`].
    pub fn into_new_seller(self) -> SettingsFormResult<NewSeller> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(SettingsFormError::EmptyName);
        }

        let mut new_seller = NewSeller::new(name, self.role);
        if let Some(email) = optional_inline(self.email.as_deref()) {
            new_seller = new_seller.with_email(email);
        }
        if let Some(phone) = optional_inline(self.phone.as_deref()) {
            new_seller = new_seller.with_phone(phone);
        }

        Ok(new_seller)
    }
}

/// Form payload emitted when editing a seller.
#[derive(Debug, Deserialize, Validate)]
pub struct EditSellerForm {
    /// Identifier of the seller being updated.
    pub seller_id: i64,
    /// New name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// New contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New access role.
    pub role: SellerRole,
}

impl EditSellerForm {
    /// Validates and sanitizes the payload into an `(id, patch)` pair.
    pub fn into_patch(self) -> SettingsFormResult<(i64, SellerPatch)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(SettingsFormError::EmptyName);
        }

        Ok((
            self.seller_id,
            SellerPatch {
                name,
                email: optional_inline(self.email.as_deref()),
                phone: optional_inline(self.phone.as_deref()),
                role: self.role,
            },
        ))
    }
}

/// Form payload emitted when saving a unit's seller assignments.
#[derive(Debug, Deserialize)]
pub struct LinkSellersForm {
    /// Unit whose seller set is being replaced.
    pub unit_id: i64,
    /// Seller ids checked in the link editor.
    pub seller_ids: Vec<i64>,
}

impl LinkSellersForm {
    /// Deduplicate the id list, keeping first occurrences in order.
    pub fn into_parts(self) -> (i64, Vec<i64>) {
        let mut seen = Vec::with_capacity(self.seller_ids.len());
        for id in self.seller_ids {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        (self.unit_id, seen)
    }
}

/// Form payload emitted when saving the monthly revenue goal.
#[derive(Debug, Deserialize)]
pub struct MonthlyGoalForm {
    /// Goal amount as entered, e.g. `"50000.00"`.
    pub value: String,
}

impl MonthlyGoalForm {
    /// Parse the goal amount into cents.
    pub fn into_cents(self) -> SettingsFormResult<i64> {
        parse_money_cents(&self.value).ok_or(SettingsFormError::InvalidMoney { value: self.value })
    }
}

fn optional_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}
