pub mod domain;
pub mod forms;
pub mod repository;
pub mod seed;
pub mod services;

/// ISO date format used for registration dates and prefix filtering.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Year-month format used for current-month goal bucketing.
pub const MONTH_FORMAT: &str = "%Y-%m";
