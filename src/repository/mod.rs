use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::sale::{NewSale, Sale, SaleFilters};
use crate::domain::seller::{NewSeller, Seller, SellerPatch};
use crate::domain::unit::{NewUnit, Unit};
use crate::seed::SeedData;

pub mod errors;
pub mod goal;
pub mod link;
pub mod sale;
pub mod seller;
pub mod unit;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Canonical in-memory collections held for the lifetime of the process.
#[derive(Debug, Default)]
struct StoreState {
    sales: Vec<Sale>,
    units: Vec<Unit>,
    sellers: Vec<Seller>,
    unit_seller_links: HashMap<i64, Vec<i64>>,
    monthly_goal_cents: i64,
    next_id: i64,
}

impl StoreState {
    /// Hand out the next identifier. A plain monotonic counter stays unique
    /// for the whole session even under rapid successive creation.
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Clone)]
/// In-memory repository implementation shared by every view.
///
/// Cheap to clone; all clones observe the same collections. There is no
/// persistence: the store lives and dies with the process.
pub struct InMemoryRepository {
    state: Arc<RwLock<StoreState>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                next_id: 1,
                ..StoreState::default()
            })),
        }
    }

    /// Create a repository pre-populated from a seed fixture. The id
    /// allocator starts past the highest seeded id.
    pub fn with_seed(seed: SeedData) -> Self {
        let SeedData {
            units,
            sellers,
            unit_seller_links,
            monthly_goal_cents,
            sales,
        } = seed;

        let max_seeded_id = units
            .iter()
            .map(|unit| unit.id)
            .chain(sellers.iter().map(|seller| seller.id))
            .chain(sales.iter().map(|sale| sale.id))
            .max()
            .unwrap_or(0);

        Self {
            state: Arc::new(RwLock::new(StoreState {
                sales,
                units,
                sellers,
                unit_seller_links,
                monthly_goal_cents,
                next_id: max_seeded_id + 1,
            })),
        }
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| RepositoryError::Poisoned)
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| RepositoryError::Poisoned)
    }
}

/// Read-only operations over sale records.
pub trait SaleReader {
    fn get_sale_by_id(&self, id: i64) -> RepositoryResult<Option<Sale>>;
    /// Most-recent-first listing, narrowed by the given criteria.
    fn list_sales(&self, filters: &SaleFilters) -> RepositoryResult<Vec<Sale>>;
    /// Whether any sale already carries this phone number.
    fn sale_phone_exists(&self, phone: &str) -> RepositoryResult<bool>;
}

/// Write operations over sale records.
pub trait SaleWriter {
    /// Register a new sale: assigns an id and today's registration date,
    /// forces stage `Lead` and status `Active`, and prepends the record so
    /// the most recent sale sits at index 0.
    fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
    /// Wholesale replacement of the record matching `sale.id`. Returns
    /// `None` without touching the store when no record matches.
    fn update_sale(&self, sale: &Sale) -> RepositoryResult<Option<Sale>>;
}

/// Read-only operations over unit records.
pub trait UnitReader {
    fn get_unit_by_id(&self, id: i64) -> RepositoryResult<Option<Unit>>;
    fn list_units(&self, active_only: bool) -> RepositoryResult<Vec<Unit>>;
}

/// Write operations over unit records.
pub trait UnitWriter {
    /// Append a new active unit. Returns `None` when the name is empty or
    /// an existing unit matches it case-insensitively.
    fn create_unit(&self, new_unit: &NewUnit) -> RepositoryResult<Option<Unit>>;
    /// Rename the matching unit. No uniqueness re-check is performed.
    fn rename_unit(&self, id: i64, name: &str) -> RepositoryResult<Option<Unit>>;
    /// Flip the active flag of the matching unit.
    fn toggle_unit(&self, id: i64) -> RepositoryResult<Option<Unit>>;
    /// Remove the unit and its unit-seller link entry. Callers are expected
    /// to have confirmed the deletion with the user.
    fn delete_unit(&self, id: i64) -> RepositoryResult<()>;
}

/// Read-only operations over seller records.
pub trait SellerReader {
    fn get_seller_by_id(&self, id: i64) -> RepositoryResult<Option<Seller>>;
    fn list_sellers(&self, active_only: bool) -> RepositoryResult<Vec<Seller>>;
}

/// Write operations over seller records.
pub trait SellerWriter {
    /// Append a new active seller. Returns `None` when the name is empty or
    /// an existing seller matches it case-insensitively.
    fn create_seller(&self, new_seller: &NewSeller) -> RepositoryResult<Option<Seller>>;
    /// Replace name, email, phone, and role of the matching seller; the
    /// active flag is untouched.
    fn update_seller(&self, id: i64, patch: &SellerPatch) -> RepositoryResult<Option<Seller>>;
    /// Flip the active flag of the matching seller.
    fn toggle_seller(&self, id: i64) -> RepositoryResult<Option<Seller>>;
    /// Remove the seller. Unit-seller links are left untouched, so stale
    /// seller ids may remain in the link table.
    fn delete_seller(&self, id: i64) -> RepositoryResult<()>;
}

/// Read-only operations over the unit-seller link table.
pub trait LinkReader {
    /// Seller ids eligible to sell for the given unit.
    fn sellers_for_unit(&self, unit_id: i64) -> RepositoryResult<Vec<i64>>;
    /// The whole link table.
    fn all_links(&self) -> RepositoryResult<HashMap<i64, Vec<i64>>>;
}

/// Write operations over the unit-seller link table.
pub trait LinkWriter {
    /// Wholesale replacement of the seller set for one unit.
    fn replace_unit_sellers(&self, unit_id: i64, seller_ids: &[i64]) -> RepositoryResult<()>;
}

/// Read access to the monthly revenue goal.
pub trait GoalReader {
    fn monthly_goal_cents(&self) -> RepositoryResult<i64>;
}

/// Write access to the monthly revenue goal.
pub trait GoalWriter {
    /// Unconditional replacement of the goal value.
    fn set_monthly_goal_cents(&self, value_cents: i64) -> RepositoryResult<()>;
}
