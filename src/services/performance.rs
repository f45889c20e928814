use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::sale::{Category, Sale, SaleStatus};
use crate::repository::SaleReader;
use crate::services::ServiceResult;

/// Pre-filter applied before the performance metrics are computed:
/// one seller and/or an inclusive registration-date range.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PerformanceQuery {
    /// Exact seller-name match.
    pub seller: Option<String>,
    /// Earliest registration date to include.
    pub start_date: Option<NaiveDate>,
    /// Latest registration date to include.
    pub end_date: Option<NaiveDate>,
}

impl PerformanceQuery {
    /// Whether `sale` falls inside the query window.
    fn matches(&self, sale: &Sale) -> bool {
        if let Some(seller) = self.seller.as_deref()
            && sale.seller != seller
        {
            return false;
        }
        if let Some(start) = self.start_date
            && sale.registered_at < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && sale.registered_at > end
        {
            return false;
        }
        true
    }
}

/// One bar of the revenue-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    /// Registration date bucket.
    pub date: NaiveDate,
    /// Closed revenue registered on the date, in cents. A date with
    /// activity but no closed deals still gets a zero-valued bar.
    pub value_cents: i64,
}

/// Closed-deal count for one category, descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCount {
    /// Category being counted.
    pub category: Category,
    /// Number of closed sales in the category.
    pub closed_count: usize,
}

/// Everything the performance dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Summed value of closed sales in the window, in cents.
    pub closed_revenue_cents: i64,
    /// Number of closed sales in the window.
    pub closed_count: usize,
    /// Closed sales over all deals in the window, as a percentage.
    /// 0 with an empty window. Distinct from the strategic dashboard's
    /// closed-over-completed rate.
    pub conversion_rate: f64,
    /// Average closed-deal value, in cents. 0 with no closed deals.
    pub average_ticket_cents: i64,
    /// Closed revenue per registration date, ascending by date.
    pub revenue_by_date: Vec<RevenuePoint>,
    /// Closed-deal counts per category, descending.
    pub top_products: Vec<ProductCount>,
}

/// Computes the performance metrics for the sales inside the query window.
pub fn performance_metrics(sales: &[Sale], query: &PerformanceQuery) -> PerformanceMetrics {
    let window: Vec<&Sale> = sales.iter().filter(|sale| query.matches(sale)).collect();

    let closed: Vec<&&Sale> = window
        .iter()
        .filter(|sale| sale.status == SaleStatus::Closed)
        .collect();

    let closed_revenue_cents: i64 = closed.iter().map(|sale| sale.sale_value_cents).sum();
    let closed_count = closed.len();
    let total_deals = window.len();

    let conversion_rate = if total_deals > 0 {
        closed_count as f64 / total_deals as f64 * 100.0
    } else {
        0.0
    };
    let average_ticket_cents = if closed_count > 0 {
        closed_revenue_cents / closed_count as i64
    } else {
        0
    };

    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for sale in &window {
        let bucket = buckets.entry(sale.registered_at).or_insert(0);
        if sale.status == SaleStatus::Closed {
            *bucket += sale.sale_value_cents;
        }
    }
    let revenue_by_date = buckets
        .into_iter()
        .map(|(date, value_cents)| RevenuePoint { date, value_cents })
        .collect();

    let mut top_products: Vec<ProductCount> = Vec::new();
    for sale in &window {
        if sale.status != SaleStatus::Closed {
            continue;
        }
        match top_products
            .iter_mut()
            .find(|entry| entry.category == sale.category)
        {
            Some(entry) => entry.closed_count += 1,
            None => top_products.push(ProductCount {
                category: sale.category,
                closed_count: 1,
            }),
        }
    }
    top_products.sort_by(|a, b| b.closed_count.cmp(&a.closed_count));

    PerformanceMetrics {
        closed_revenue_cents,
        closed_count,
        conversion_rate,
        average_ticket_cents,
        revenue_by_date,
        top_products,
    }
}

/// Loads the performance dashboard from the full collection.
pub fn load_performance_page<R>(
    repo: &R,
    query: &PerformanceQuery,
) -> ServiceResult<PerformanceMetrics>
where
    R: SaleReader + ?Sized,
{
    let sales = repo.list_sales(&Default::default())?;
    Ok(performance_metrics(&sales, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sale::LeadSource;
    use crate::domain::stage::FunnelStage;

    fn sale(
        id: i64,
        seller: &str,
        date: (i32, u32, u32),
        category: Category,
        status: SaleStatus,
        sale_value_cents: i64,
    ) -> Sale {
        Sale {
            id,
            registered_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            unit: "São Paulo".to_string(),
            seller: seller.to_string(),
            customer: format!("Customer {id}"),
            phone: format!("(11) 97777-{id:04}"),
            category,
            source: LeadSource::Referral,
            status,
            stage: FunnelStage::Closing,
            initial_value_cents: 0,
            sale_value_cents,
            qualification: None,
            expected_close: None,
            city: None,
            address: None,
            messenger: None,
            email: None,
            social_handles: None,
        }
    }

    #[test]
    fn window_filters_by_seller_and_date_range() {
        let sales = vec![
            sale(1, "Ana Silva", (2025, 8, 1), Category::ProductA, SaleStatus::Closed, 10_000),
            sale(2, "Bruno Costa", (2025, 8, 2), Category::ProductA, SaleStatus::Closed, 20_000),
            sale(3, "Ana Silva", (2025, 6, 1), Category::ProductA, SaleStatus::Closed, 40_000),
        ];

        let query = PerformanceQuery {
            seller: Some("Ana Silva".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1),
            end_date: None,
        };

        let metrics = performance_metrics(&sales, &query);

        assert_eq!(metrics.closed_count, 1);
        assert_eq!(metrics.closed_revenue_cents, 10_000);
    }

    #[test]
    fn conversion_uses_total_deals_in_window() {
        let sales = vec![
            sale(1, "Ana Silva", (2025, 8, 1), Category::ProductA, SaleStatus::Closed, 10_000),
            sale(2, "Ana Silva", (2025, 8, 2), Category::ProductA, SaleStatus::Active, 0),
            sale(3, "Ana Silva", (2025, 8, 3), Category::ProductA, SaleStatus::Lost, 5_000),
            sale(4, "Ana Silva", (2025, 8, 4), Category::ProductA, SaleStatus::Active, 0),
        ];

        let metrics = performance_metrics(&sales, &PerformanceQuery::default());

        assert_eq!(metrics.conversion_rate, 25.0);
    }

    #[test]
    fn empty_window_yields_zeroes() {
        let metrics = performance_metrics(&[], &PerformanceQuery::default());

        assert_eq!(metrics.conversion_rate, 0.0);
        assert_eq!(metrics.average_ticket_cents, 0);
        assert!(metrics.revenue_by_date.is_empty());
        assert!(metrics.top_products.is_empty());
    }

    #[test]
    fn revenue_series_is_date_ascending_with_zero_bars() {
        let sales = vec![
            sale(1, "Ana Silva", (2025, 8, 3), Category::ProductA, SaleStatus::Closed, 10_000),
            sale(2, "Ana Silva", (2025, 8, 1), Category::ProductA, SaleStatus::Active, 0),
            sale(3, "Ana Silva", (2025, 8, 1), Category::ProductA, SaleStatus::Closed, 30_000),
            sale(4, "Ana Silva", (2025, 8, 2), Category::ProductA, SaleStatus::Lost, 9_000),
        ];

        let metrics = performance_metrics(&sales, &PerformanceQuery::default());

        let dates: Vec<NaiveDate> = metrics.revenue_by_date.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 8, 1).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2025, 8, 2).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2025, 8, 3).unwrap_or_default(),
            ]
        );
        assert_eq!(metrics.revenue_by_date[0].value_cents, 30_000);
        // A date with only non-closed activity keeps a zero bar.
        assert_eq!(metrics.revenue_by_date[1].value_cents, 0);
    }

    #[test]
    fn top_products_count_closed_sales_per_category() {
        let sales = vec![
            sale(1, "Ana Silva", (2025, 8, 1), Category::ProductA, SaleStatus::Closed, 10_000),
            sale(2, "Ana Silva", (2025, 8, 2), Category::ServiceY, SaleStatus::Closed, 10_000),
            sale(3, "Ana Silva", (2025, 8, 3), Category::ServiceY, SaleStatus::Closed, 10_000),
            sale(4, "Ana Silva", (2025, 8, 4), Category::ServiceY, SaleStatus::Lost, 10_000),
        ];

        let metrics = performance_metrics(&sales, &PerformanceQuery::default());

        assert_eq!(metrics.top_products.len(), 2);
        assert_eq!(metrics.top_products[0].category, Category::ServiceY);
        assert_eq!(metrics.top_products[0].closed_count, 2);
    }
}
