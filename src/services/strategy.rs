use chrono::NaiveDate;
use serde::Serialize;

use crate::MONTH_FORMAT;
use crate::domain::sale::{Category, Sale, SaleStatus};
use crate::domain::stage::FunnelStage;
use crate::repository::{GoalReader, SaleReader};
use crate::services::ServiceResult;

/// One step of the funnel-health chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStep {
    /// Funnel stage this step represents.
    pub stage: FunnelStage,
    /// Number of sales currently at the stage.
    pub count: usize,
    /// Summed value at the stage (sale value, falling back to the initial
    /// value), in cents.
    pub value_cents: i64,
}

/// Closed-deal count for one category, ranked descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRank {
    /// 1-based rank position.
    pub rank: usize,
    /// Category being ranked.
    pub category: Category,
    /// Number of closed sales in the category.
    pub closed_count: usize,
}

/// Closed revenue for one unit, ranked descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitRank {
    /// 1-based rank position.
    pub rank: usize,
    /// Unit name being ranked.
    pub unit: String,
    /// Summed closed revenue for the unit, in cents.
    pub revenue_cents: i64,
}

/// Everything the strategic dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyMetrics {
    /// Accumulated revenue of closed sales, in cents.
    pub total_revenue_cents: i64,
    /// Closed revenue registered in the current calendar month, in cents.
    pub current_month_revenue_cents: i64,
    /// Current-month revenue over the monthly goal, as a percentage.
    /// 0 when the goal is unset or non-positive.
    pub goal_progress: f64,
    /// Potential revenue lost with Lost-status sales, in cents.
    pub lost_revenue_cents: i64,
    /// Open pipeline value over Active-status sales (sale value, falling
    /// back to the initial value), in cents.
    pub pipeline_value_cents: i64,
    /// Closed over closed-plus-lost, as a percentage. 0 when nothing has
    /// completed yet.
    pub conversion_rate: f64,
    /// Average closed-deal value, in cents. 0 with no closed deals.
    pub average_ticket_cents: i64,
    /// Count and value per forward funnel stage.
    pub funnel: Vec<FunnelStep>,
    /// Closed-deal counts per category, descending.
    pub categories: Vec<CategoryRank>,
    /// Closed revenue per unit, descending.
    pub units: Vec<UnitRank>,
}

/// Computes the strategic dashboard metrics over the full sales collection.
///
/// `today` anchors the current-month bucket so the computation stays pure.
pub fn strategy_metrics(
    sales: &[Sale],
    monthly_goal_cents: i64,
    today: NaiveDate,
) -> StrategyMetrics {
    let closed: Vec<&Sale> = sales
        .iter()
        .filter(|sale| sale.status == SaleStatus::Closed)
        .collect();
    let lost: Vec<&Sale> = sales
        .iter()
        .filter(|sale| sale.status == SaleStatus::Lost)
        .collect();

    let total_revenue_cents: i64 = closed.iter().map(|sale| sale.sale_value_cents).sum();
    let lost_revenue_cents: i64 = lost.iter().map(|sale| sale.sale_value_cents).sum();
    let pipeline_value_cents: i64 = sales
        .iter()
        .filter(|sale| sale.status == SaleStatus::Active)
        .map(|sale| sale.effective_value_cents())
        .sum();

    let closed_count = closed.len();
    let completed_count = closed_count + lost.len();
    let conversion_rate = if completed_count > 0 {
        closed_count as f64 / completed_count as f64 * 100.0
    } else {
        0.0
    };
    let average_ticket_cents = if closed_count > 0 {
        total_revenue_cents / closed_count as i64
    } else {
        0
    };

    let current_month = today.format(MONTH_FORMAT).to_string();
    let current_month_revenue_cents: i64 = closed
        .iter()
        .filter(|sale| sale.registered_at_str().starts_with(&current_month))
        .map(|sale| sale.sale_value_cents)
        .sum();
    let goal_progress = if monthly_goal_cents > 0 {
        current_month_revenue_cents as f64 / monthly_goal_cents as f64 * 100.0
    } else {
        0.0
    };

    let funnel = FunnelStage::FORWARD
        .into_iter()
        .map(|stage| {
            let at_stage = sales.iter().filter(|sale| sale.stage == stage);
            let (count, value_cents) = at_stage.fold((0usize, 0i64), |(count, value), sale| {
                (count + 1, value + sale.effective_value_cents())
            });
            FunnelStep {
                stage,
                count,
                value_cents,
            }
        })
        .collect();

    let categories = rank_categories(sales);
    let units = rank_units(sales);

    StrategyMetrics {
        total_revenue_cents,
        current_month_revenue_cents,
        goal_progress,
        lost_revenue_cents,
        pipeline_value_cents,
        conversion_rate,
        average_ticket_cents,
        funnel,
        categories,
        units,
    }
}

/// Loads the strategic dashboard from the full (unfiltered) collection.
pub fn load_strategy_page<R>(repo: &R, today: NaiveDate) -> ServiceResult<StrategyMetrics>
where
    R: SaleReader + GoalReader + ?Sized,
{
    let sales = repo.list_sales(&Default::default())?;
    let monthly_goal_cents = repo.monthly_goal_cents()?;
    Ok(strategy_metrics(&sales, monthly_goal_cents, today))
}

/// Closed-sale counts per category present in the data, descending. Ties
/// keep first-appearance order (stable sort).
fn rank_categories(sales: &[Sale]) -> Vec<CategoryRank> {
    let mut seen: Vec<Category> = Vec::new();
    for sale in sales {
        if !seen.contains(&sale.category) {
            seen.push(sale.category);
        }
    }

    let mut ranks: Vec<CategoryRank> = seen
        .into_iter()
        .map(|category| CategoryRank {
            rank: 0,
            category,
            closed_count: sales
                .iter()
                .filter(|sale| sale.category == category && sale.status == SaleStatus::Closed)
                .count(),
        })
        .collect();
    ranks.sort_by(|a, b| b.closed_count.cmp(&a.closed_count));
    for (index, entry) in ranks.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    ranks
}

/// Closed revenue per unit present in the data, descending.
fn rank_units(sales: &[Sale]) -> Vec<UnitRank> {
    let mut seen: Vec<&str> = Vec::new();
    for sale in sales {
        if !seen.contains(&sale.unit.as_str()) {
            seen.push(&sale.unit);
        }
    }

    let mut ranks: Vec<UnitRank> = seen
        .into_iter()
        .map(|unit| UnitRank {
            rank: 0,
            unit: unit.to_string(),
            revenue_cents: sales
                .iter()
                .filter(|sale| sale.unit == unit && sale.status == SaleStatus::Closed)
                .map(|sale| sale.sale_value_cents)
                .sum(),
        })
        .collect();
    ranks.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents));
    for (index, entry) in ranks.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    ranks
}
