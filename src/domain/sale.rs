use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DATE_FORMAT;
use crate::domain::stage::FunnelStage;

/// Product or service line a deal is sold under.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Product A")]
    ProductA,
    #[serde(rename = "Product B")]
    ProductB,
    #[serde(rename = "Service X")]
    ServiceX,
    #[serde(rename = "Service Y")]
    ServiceY,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::ProductA,
        Category::ProductB,
        Category::ServiceX,
        Category::ServiceY,
    ];

    /// Human-readable category label.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ProductA => "Product A",
            Category::ProductB => "Product B",
            Category::ServiceX => "Service X",
            Category::ServiceY => "Service Y",
        }
    }

    /// Resolve a category from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acquisition channel the opportunity came in through.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadSource {
    Website,
    Referral,
    #[serde(rename = "Trade Show")]
    TradeShow,
    Ad,
}

impl LeadSource {
    /// All sources in display order.
    pub const ALL: [LeadSource; 4] = [
        LeadSource::Website,
        LeadSource::Referral,
        LeadSource::TradeShow,
        LeadSource::Ad,
    ];

    /// Human-readable source label.
    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Website => "Website",
            LeadSource::Referral => "Referral",
            LeadSource::TradeShow => "Trade Show",
            LeadSource::Ad => "Ad",
        }
    }

    /// Resolve a source from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a sale, settable independently of the funnel stage.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleStatus {
    /// Deal is still being worked.
    Active,
    /// Deal was won and counts towards revenue.
    Closed,
    /// Deal was lost.
    Lost,
}

impl Default for SaleStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl SaleStatus {
    /// Human-readable status label.
    pub fn as_str(self) -> &'static str {
        match self {
            SaleStatus::Active => "Active",
            SaleStatus::Closed => "Closed",
            SaleStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain representation of a pipeline opportunity.
///
/// Unit and seller are carried as denormalized name strings, so renaming a
/// unit or seller never rewrites historical sales.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sale {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Registration date, immutable after creation.
    pub registered_at: NaiveDate,
    /// Name of the business unit the deal belongs to.
    pub unit: String,
    /// Name of the seller working the deal.
    pub seller: String,
    /// Customer name.
    pub customer: String,
    /// Customer phone, unique across all sales at creation time.
    pub phone: String,
    /// Product or service line.
    pub category: Category,
    /// Acquisition channel.
    pub source: LeadSource,
    /// Lifecycle status.
    pub status: SaleStatus,
    /// Canonical funnel stage.
    pub stage: FunnelStage,
    /// Estimated value at registration, in cents.
    pub initial_value_cents: i64,
    /// Negotiated sale value, in cents.
    pub sale_value_cents: i64,
    /// Qualification rating between 1 and 5.
    pub qualification: Option<u8>,
    /// Expected close date.
    pub expected_close: Option<NaiveDate>,
    /// Customer city.
    pub city: Option<String>,
    /// Customer street address.
    pub address: Option<String>,
    /// Messaging contact (e.g. WhatsApp number).
    pub messenger: Option<String>,
    /// Customer email.
    pub email: Option<String>,
    /// Social media handles.
    pub social_handles: Option<String>,
}

impl Sale {
    /// Value the deal contributes to forward-looking aggregates: the sale
    /// value when set, falling back to the initial value otherwise.
    pub fn effective_value_cents(&self) -> i64 {
        if self.sale_value_cents != 0 {
            self.sale_value_cents
        } else {
            self.initial_value_cents
        }
    }

    /// ISO-formatted registration date used for prefix filtering.
    pub fn registered_at_str(&self) -> String {
        self.registered_at.format(DATE_FORMAT).to_string()
    }
}

/// Payload required to register a new sale.
///
/// Carries no id, date, stage, or status: the store assigns all four, so a
/// caller cannot override the forced `Lead`/`Active` starting point.
#[derive(Debug, Clone)]
pub struct NewSale {
    /// Name of the business unit the deal belongs to.
    pub unit: String,
    /// Name of the seller working the deal.
    pub seller: String,
    /// Customer name.
    pub customer: String,
    /// Customer phone.
    pub phone: String,
    /// Product or service line.
    pub category: Category,
    /// Acquisition channel.
    pub source: LeadSource,
    /// Estimated value at registration, in cents.
    pub initial_value_cents: i64,
    /// Negotiated sale value, in cents.
    pub sale_value_cents: i64,
    /// Qualification rating between 1 and 5.
    pub qualification: Option<u8>,
    /// Expected close date.
    pub expected_close: Option<NaiveDate>,
    /// Customer city.
    pub city: Option<String>,
    /// Customer street address.
    pub address: Option<String>,
    /// Messaging contact.
    pub messenger: Option<String>,
    /// Customer email.
    pub email: Option<String>,
    /// Social media handles.
    pub social_handles: Option<String>,
}

impl NewSale {
    /// Build a new sale payload with the required fields.
    pub fn new(
        unit: impl Into<String>,
        seller: impl Into<String>,
        customer: impl Into<String>,
        phone: impl Into<String>,
        category: Category,
        source: LeadSource,
        initial_value_cents: i64,
        sale_value_cents: i64,
    ) -> Self {
        Self {
            unit: unit.into(),
            seller: seller.into(),
            customer: customer.into(),
            phone: phone.into(),
            category,
            source,
            initial_value_cents,
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

    /// Attach a qualification rating.
    pub fn with_qualification(mut self, qualification: u8) -> Self {
        self.qualification = Some(qualification);
        self
    }

    /// Attach an expected close date.
    pub fn with_expected_close(mut self, expected_close: NaiveDate) -> Self {
        self.expected_close = Some(expected_close);
        self
    }

    /// Attach the customer city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Attach the customer street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a messaging contact.
    pub fn with_messenger(mut self, messenger: impl Into<String>) -> Self {
        self.messenger = Some(messenger.into());
        self
    }

    /// Attach the customer email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach social media handles.
    pub fn with_social_handles(mut self, social_handles: impl Into<String>) -> Self {
        self.social_handles = Some(social_handles.into());
        self
    }
}

/// Transient filter criteria for the sales table and dashboard views.
///
/// Every unset criterion is a wildcard; criteria compose conjunctively and
/// the result preserves the input ordering.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SaleFilters {
    /// Exact unit-name match.
    pub unit: Option<String>,
    /// Exact seller-name match.
    pub seller: Option<String>,
    /// Registration-date prefix (`YYYY`, `YYYY-MM`, or a full date).
    pub registered_prefix: Option<String>,
    /// Case-insensitive substring match on the customer name.
    pub customer: Option<String>,
    /// Exact category match.
    pub category: Option<Category>,
    /// Exact source match.
    pub source: Option<LeadSource>,
    /// Exact status match.
    pub status: Option<SaleStatus>,
    /// Exact funnel-stage match.
    pub stage: Option<FunnelStage>,
}

impl SaleFilters {
    /// Construct an empty criteria set matching every sale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by exact unit name.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Filter by exact seller name.
    pub fn seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = Some(seller.into());
        self
    }

    /// Filter by registration-date prefix, enabling year or year-month
    /// granularity from a single input.
    pub fn registered_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.registered_prefix = Some(prefix.into());
        self
    }

    /// Filter by customer-name substring, case-insensitively.
    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Filter by category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by acquisition source.
    pub fn source(mut self, source: LeadSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Filter by lifecycle status.
    pub fn status(mut self, status: SaleStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by funnel stage.
    pub fn stage(mut self, stage: FunnelStage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Whether `sale` satisfies every non-empty criterion.
    pub fn matches(&self, sale: &Sale) -> bool {
        if let Some(unit) = self.unit.as_deref()
            && sale.unit != unit
        {
            return false;
        }
        if let Some(seller) = self.seller.as_deref()
            && sale.seller != seller
        {
            return false;
        }
        if let Some(prefix) = self.registered_prefix.as_deref()
            && !sale.registered_at_str().starts_with(prefix)
        {
            return false;
        }
        if let Some(customer) = self.customer.as_deref()
            && !sale
                .customer
                .to_lowercase()
                .contains(&customer.to_lowercase())
        {
            return false;
        }
        if let Some(category) = self.category
            && sale.category != category
        {
            return false;
        }
        if let Some(source) = self.source
            && sale.source != source
        {
            return false;
        }
        if let Some(status) = self.status
            && sale.status != status
        {
            return false;
        }
        if let Some(stage) = self.stage
            && sale.stage != stage
        {
            return false;
        }
        true
    }

    /// Apply the criteria to a collection, keeping the original order.
    pub fn apply(&self, sales: &[Sale]) -> Vec<Sale> {
        sales
            .iter()
            .filter(|sale| self.matches(sale))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sale(id: i64, customer: &str, category: Category) -> Sale {
        Sale {
            id,
            registered_at: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap_or_default(),
            unit: "Porto Alegre".to_string(),
            seller: "Daniel Almeida".to_string(),
            customer: customer.to_string(),
            phone: format!("+55 51 9000-{id:04}"),
            category,
            source: LeadSource::Website,
            status: SaleStatus::Active,
            stage: FunnelStage::Lead,
            initial_value_cents: 150_000,
            sale_value_cents: 0,
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
    fn empty_filters_are_identity() {
        let sales = vec![
            sample_sale(1, "Acme Ltda", Category::ProductA),
            sample_sale(2, "Beta Corp", Category::ServiceX),
        ];

        assert_eq!(SaleFilters::new().apply(&sales), sales);
    }

    #[test]
    fn category_matches_exactly() {
        let sale = sample_sale(1, "Acme Ltda", Category::ProductA);

        let hit = SaleFilters::new().category(Category::ProductA);
        assert_eq!(hit.apply(std::slice::from_ref(&sale)), vec![sale.clone()]);

        let miss = SaleFilters::new().category(Category::ServiceY);
        assert!(miss.apply(std::slice::from_ref(&sale)).is_empty());
    }

    #[test]
    fn date_prefix_matches_year_and_month() {
        let sale = sample_sale(1, "Acme Ltda", Category::ProductA);

        for prefix in ["2025", "2025-03", "2025-03-14"] {
            assert!(SaleFilters::new().registered_prefix(prefix).matches(&sale));
        }
        assert!(!SaleFilters::new().registered_prefix("2025-04").matches(&sale));
    }

    #[test]
    fn customer_substring_is_case_insensitive() {
        let sale = sample_sale(1, "Acme Ltda", Category::ProductA);

        assert!(SaleFilters::new().customer("acme").matches(&sale));
        assert!(SaleFilters::new().customer("LTDA").matches(&sale));
        assert!(!SaleFilters::new().customer("globex").matches(&sale));
    }

    #[test]
    fn criteria_compose_conjunctively() {
        let sales = vec![
            sample_sale(1, "Acme Ltda", Category::ProductA),
            sample_sale(2, "Acme Filial", Category::ServiceX),
        ];

        let filters = SaleFilters::new()
            .customer("acme")
            .category(Category::ServiceX);
        let filtered = filters.apply(&sales);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn effective_value_falls_back_to_initial() {
        let mut sale = sample_sale(1, "Acme Ltda", Category::ProductA);
        assert_eq!(sale.effective_value_cents(), 150_000);

        sale.sale_value_cents = 240_000;
        assert_eq!(sale.effective_value_cents(), 240_000);
    }
}
