use std::env;

use chrono::{Local, NaiveDate};
use dotenvy::dotenv;

use sales_pipeline::DATE_FORMAT;
use sales_pipeline::domain::sale::SaleFilters;
use sales_pipeline::repository::InMemoryRepository;
use sales_pipeline::seed;
use sales_pipeline::services::board::group_by_column;
use sales_pipeline::services::dashboard::load_sales_page;
use sales_pipeline::services::performance::{PerformanceQuery, load_performance_page};
use sales_pipeline::services::strategy::load_strategy_page;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let today = match env::var("TODAY") {
        Ok(raw) => match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                log::error!("Invalid TODAY environment variable {raw:?}: {e}");
                std::process::exit(1);
            }
        },
        Err(_) => Local::now().date_naive(),
    };

    let repo = InMemoryRepository::with_seed(seed::demo_data());

    let page = match load_sales_page(&repo, &SaleFilters::default()) {
        Ok(page) => page,
        Err(e) => {
            log::error!("Failed to load sales page: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "{} sales, {} distinct customers, {} leads, total value {} cents",
        page.sales.len(),
        page.totals.distinct_customers,
        page.totals.lead_count,
        page.totals.total_value_cents,
    );

    let board = group_by_column(&page.sales);
    for view in &board {
        log::info!(
            "Board column {:<20} {} cards",
            view.column.as_str(),
            view.sales.len()
        );
    }

    let strategy = match load_strategy_page(&repo, today) {
        Ok(metrics) => metrics,
        Err(e) => {
            log::error!("Failed to compute strategic metrics: {e}");
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&strategy) {
        Ok(json) => log::info!("Strategic metrics:\n{json}"),
        Err(e) => {
            log::error!("Failed to serialize strategic metrics: {e}");
            std::process::exit(1);
        }
    }

    let performance = match load_performance_page(&repo, &PerformanceQuery::default()) {
        Ok(metrics) => metrics,
        Err(e) => {
            log::error!("Failed to compute performance metrics: {e}");
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&performance) {
        Ok(json) => log::info!("Performance metrics:\n{json}"),
        Err(e) => {
            log::error!("Failed to serialize performance metrics: {e}");
            std::process::exit(1);
        }
    }
}
