use std::collections::HashSet;

use crate::domain::sale::{Sale, SaleFilters};
use crate::domain::seller::Seller;
use crate::domain::stage::FunnelStage;
use crate::domain::unit::Unit;
use crate::repository::{SaleReader, SellerReader, UnitReader};
use crate::services::ServiceResult;

/// Headline numbers shown above the sales table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DashboardTotals {
    /// Sum of sale value across the (filtered) collection, in cents.
    pub total_value_cents: i64,
    /// Number of distinct customer names.
    pub distinct_customers: usize,
    /// Number of sales currently at the `Lead` stage.
    pub lead_count: usize,
}

/// Computes the headline totals for a (filtered) sales collection.
pub fn dashboard_totals(sales: &[Sale]) -> DashboardTotals {
    let total_value_cents = sales.iter().map(|sale| sale.sale_value_cents).sum();
    let distinct_customers = sales
        .iter()
        .map(|sale| sale.customer.as_str())
        .collect::<HashSet<_>>()
        .len();
    let lead_count = sales
        .iter()
        .filter(|sale| sale.stage == FunnelStage::Lead)
        .count();

    DashboardTotals {
        total_value_cents,
        distinct_customers,
        lead_count,
    }
}

/// Data required to render the main sales view: the filtered table, its
/// totals, and the active units/sellers for the filter pickers.
pub struct SalesPageData {
    /// Totals computed over the filtered collection.
    pub totals: DashboardTotals,
    /// Filtered sales, most recent first.
    pub sales: Vec<Sale>,
    /// Active units for the unit picker.
    pub units: Vec<Unit>,
    /// Active sellers for the seller picker.
    pub sellers: Vec<Seller>,
}

/// Loads the main sales view.
pub fn load_sales_page<R>(repo: &R, filters: &SaleFilters) -> ServiceResult<SalesPageData>
where
    R: SaleReader + UnitReader + SellerReader + ?Sized,
{
    let sales = repo.list_sales(filters)?;
    let totals = dashboard_totals(&sales);

    Ok(SalesPageData {
        totals,
        sales,
        units: repo.list_units(true)?,
        sellers: repo.list_sellers(true)?,
    })
}
