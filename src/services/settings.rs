use std::collections::HashMap;

use crate::domain::seller::Seller;
use crate::domain::unit::Unit;
use crate::forms::settings::{
    AddSellerForm, AddUnitForm, EditSellerForm, EditUnitForm, LinkSellersForm, MonthlyGoalForm,
};
use crate::repository::{
    GoalReader, GoalWriter, LinkReader, LinkWriter, SellerReader, SellerWriter, UnitReader,
    UnitWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the settings page.
pub struct SettingsPageData {
    /// All units, active or not.
    pub units: Vec<Unit>,
    /// All sellers, active or not.
    pub sellers: Vec<Seller>,
    /// The whole unit-seller link table.
    pub links: HashMap<i64, Vec<i64>>,
    /// Current monthly revenue goal in cents.
    pub monthly_goal_cents: i64,
}

/// Loads the settings overview.
pub fn load_settings_page<R>(repo: &R) -> ServiceResult<SettingsPageData>
where
    R: UnitReader + SellerReader + LinkReader + GoalReader + ?Sized,
{
    Ok(SettingsPageData {
        units: repo.list_units(false)?,
        sellers: repo.list_sellers(false)?,
        links: repo.all_links()?,
        monthly_goal_cents: repo.monthly_goal_cents()?,
    })
}

/// Creates a new unit. Returns `None` when the store silently rejected a
/// case-insensitive duplicate name.
pub fn create_unit<R>(repo: &R, form: AddUnitForm) -> ServiceResult<Option<Unit>>
where
    R: UnitWriter + ?Sized,
{
    let new_unit = form
        .into_new_unit()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_unit(&new_unit).map_err(ServiceError::from)
}

/// Renames a unit. A stale id is a silent no-op yielding `None`.
pub fn rename_unit<R>(repo: &R, form: EditUnitForm) -> ServiceResult<Option<Unit>>
where
    R: UnitWriter + ?Sized,
{
    let (unit_id, name) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.rename_unit(unit_id, &name).map_err(ServiceError::from)
}

/// Flips a unit's active flag.
pub fn toggle_unit<R>(repo: &R, unit_id: i64) -> ServiceResult<Option<Unit>>
where
    R: UnitWriter + ?Sized,
{
    repo.toggle_unit(unit_id).map_err(ServiceError::from)
}

/// Deletes a unit and its link-table entry. The presentation layer is
/// responsible for the confirmation prompt gating this call.
pub fn remove_unit<R>(repo: &R, unit_id: i64) -> ServiceResult<()>
where
    R: UnitWriter + ?Sized,
{
    repo.delete_unit(unit_id).map_err(ServiceError::from)
}

/// Creates a new seller. Returns `None` when the store silently rejected a
/// case-insensitive duplicate name.
pub fn create_seller<R>(repo: &R, form: AddSellerForm) -> ServiceResult<Option<Seller>>
where
    R: SellerWriter + ?Sized,
{
    let new_seller = form
        .into_new_seller()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_seller(&new_seller).map_err(ServiceError::from)
}

/// Replaces a seller's name, email, phone, and role.
pub fn modify_seller<R>(repo: &R, form: EditSellerForm) -> ServiceResult<Option<Seller>>
where
    R: SellerWriter + ?Sized,
{
    let (seller_id, patch) = form
        .into_patch()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_seller(seller_id, &patch)
        .map_err(ServiceError::from)
}

/// Flips a seller's active flag.
pub fn toggle_seller<R>(repo: &R, seller_id: i64) -> ServiceResult<Option<Seller>>
where
    R: SellerWriter + ?Sized,
{
    repo.toggle_seller(seller_id).map_err(ServiceError::from)
}

/// Deletes a seller. Link-table entries are left untouched. The
/// presentation layer is responsible for the confirmation prompt gating
/// this call.
pub fn remove_seller<R>(repo: &R, seller_id: i64) -> ServiceResult<()>
where
    R: SellerWriter + ?Sized,
{
    repo.delete_seller(seller_id).map_err(ServiceError::from)
}

/// Replaces the seller assignments for one unit wholesale.
pub fn assign_unit_sellers<R>(repo: &R, form: LinkSellersForm) -> ServiceResult<()>
where
    R: LinkWriter + ?Sized,
{
    let (unit_id, seller_ids) = form.into_parts();
    repo.replace_unit_sellers(unit_id, &seller_ids)
        .map_err(ServiceError::from)
}

/// Replaces the monthly revenue goal.
pub fn update_monthly_goal<R>(repo: &R, form: MonthlyGoalForm) -> ServiceResult<()>
where
    R: GoalWriter + ?Sized,
{
    let cents = form
        .into_cents()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.set_monthly_goal_cents(cents)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::repository::mock::{MockGoalWriter, MockLinkWriter, MockUnitWriter};

    #[test]
    fn create_unit_surfaces_form_errors_without_touching_store() {
        let mut repo = MockUnitWriter::new();
        repo.expect_create_unit().never();

        let form = AddUnitForm {
            name: "   ".to_string(),
        };

        assert!(matches!(create_unit(&repo, form), Err(ServiceError::Form(_))));
    }

    #[test]
    fn assign_unit_sellers_deduplicates_ids() {
        let mut repo = MockLinkWriter::new();
        repo.expect_replace_unit_sellers()
            .withf(|unit_id, seller_ids| *unit_id == 2 && seller_ids == [4, 1])
            .return_once(|_, _| Ok(()));

        let form = LinkSellersForm {
            unit_id: 2,
            seller_ids: vec![4, 1, 4],
        };

        assert!(assign_unit_sellers(&repo, form).is_ok());
    }

    #[test]
    fn update_monthly_goal_parses_before_writing() {
        let mut repo = MockGoalWriter::new();
        repo.expect_set_monthly_goal_cents()
            .with(eq(2_000_000))
            .return_once(|_| Ok(()));

        let form = MonthlyGoalForm {
            value: "20000".to_string(),
        };

        assert!(update_monthly_goal(&repo, form).is_ok());
    }
}
