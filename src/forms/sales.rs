use std::io::Cursor;

use chrono::NaiveDate;
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::sale::{Category, LeadSource, NewSale, Sale, SaleStatus};
use crate::domain::stage::FunnelStage;
use crate::forms::{parse_money_cents, sanitize_inline_text};

/// Maximum allowed length for name-like fields.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a phone number.
const PHONE_MAX_LEN: usize = 32;
const PHONE_MAX_LEN_VALIDATOR: u64 = PHONE_MAX_LEN as u64;

/// Result type returned by the sale form helpers.
pub type SaleFormResult<T> = Result<T, SaleFormError>;

/// Errors that can occur while processing sale forms.
#[derive(Debug, Error)]
pub enum SaleFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required field is empty after sanitization.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    /// A currency text input could not be parsed.
    #[error("{field} has invalid amount `{value}`")]
    InvalidMoney { field: &'static str, value: String },
    /// The uploaded CSV is missing required columns.
    #[error(
        "upload is missing one of the required `unit`/`seller`/`customer`/`phone`/`category`/`source`/`sale_value` headers"
    )]
    MissingRequiredHeaders,
    /// A CSV row is missing a required value.
    #[error("row {row} is missing `{field}`")]
    UploadMissingField { row: usize, field: &'static str },
    /// A CSV row carries an unknown category label.
    #[error("row {row} has unknown category `{value}`")]
    UploadUnknownCategory { row: usize, value: String },
    /// A CSV row carries an unknown source label.
    #[error("row {row} has unknown source `{value}`")]
    UploadUnknownSource { row: usize, value: String },
    /// A CSV row carries an unparsable amount.
    #[error("row {row} has invalid amount `{value}`")]
    UploadInvalidMoney { row: usize, value: String },
    /// The uploaded CSV did not contain any usable sales.
    #[error("upload contains no sales")]
    EmptyUpload,
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Form payload emitted when submitting the "Add sale" form.
///
/// Carries no stage or status: new deals always start as an active lead.
#[derive(Debug, Deserialize, Validate)]
pub struct AddSaleForm {
    /// Unit name picked by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub unit: String,
    /// Seller name picked by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub seller: String,
    /// Customer name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub customer: String,
    /// Customer phone; the natural dedup key for sales.
    #[validate(length(min = 1, max = PHONE_MAX_LEN_VALIDATOR))]
    pub phone: String,
    /// Product or service line.
    pub category: Category,
    /// Acquisition channel.
    pub source: LeadSource,
    /// Estimated value as entered, e.g. `"1500.00"`.
    pub initial_value: String,
    /// Negotiated value as entered.
    pub sale_value: String,
    /// Qualification rating between 1 and 5.
    #[validate(range(min = 1, max = 5))]
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
    #[validate(email)]
    pub email: Option<String>,
    /// Social media handles.
    pub social_handles: Option<String>,
}

impl AddSaleForm {
    /// Validates and sanitizes the payload into a domain [`NewSale`].
    pub fn into_new_sale(self) -> SaleFormResult<NewSale> {
        self.validate()?;

        let unit = required_inline(&self.unit, "unit")?;
        let seller = required_inline(&self.seller, "seller")?;
        let customer = required_inline(&self.customer, "customer")?;
        let phone = required_inline(&self.phone, "phone")?;

        let initial_value_cents = money_field(&self.initial_value, "initial_value")?;
        let sale_value_cents = money_field(&self.sale_value, "sale_value")?;

        let mut new_sale = NewSale::new(
            unit,
            seller,
            customer,
            phone,
            self.category,
            self.source,
            initial_value_cents,
            sale_value_cents,
        );

        if let Some(qualification) = self.qualification {
            new_sale = new_sale.with_qualification(qualification);
        }
        if let Some(expected_close) = self.expected_close {
            new_sale = new_sale.with_expected_close(expected_close);
        }
        if let Some(city) = optional_inline(self.city.as_deref()) {
            new_sale = new_sale.with_city(city);
        }
        if let Some(address) = optional_inline(self.address.as_deref()) {
            new_sale = new_sale.with_address(address);
        }
        if let Some(messenger) = optional_inline(self.messenger.as_deref()) {
            new_sale = new_sale.with_messenger(messenger);
        }
        if let Some(email) = optional_inline(self.email.as_deref()) {
            new_sale = new_sale.with_email(email);
        }
        if let Some(social_handles) = optional_inline(self.social_handles.as_deref()) {
            new_sale = new_sale.with_social_handles(social_handles);
        }

        Ok(new_sale)
    }
}

/// Form payload emitted when saving the sale detail view. The whole record
/// is replaced, so every field is present, id and registration date
/// included.
#[derive(Debug, Deserialize, Validate)]
pub struct EditSaleForm {
    /// Identifier of the sale being replaced.
    pub sale_id: i64,
    /// Original registration date, echoed back unchanged by the view.
    pub registered_at: NaiveDate,
    /// Unit name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub unit: String,
    /// Seller name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub seller: String,
    /// Customer name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub customer: String,
    /// Customer phone.
    #[validate(length(min = 1, max = PHONE_MAX_LEN_VALIDATOR))]
    pub phone: String,
    /// Product or service line.
    pub category: Category,
    /// Acquisition channel.
    pub source: LeadSource,
    /// Lifecycle status; independent of the funnel stage.
    pub status: SaleStatus,
    /// Canonical funnel stage.
    pub stage: FunnelStage,
    /// Estimated value as entered.
    pub initial_value: String,
    /// Negotiated value as entered.
    pub sale_value: String,
    /// Qualification rating between 1 and 5.
    #[validate(range(min = 1, max = 5))]
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
    #[validate(email)]
    pub email: Option<String>,
    /// Social media handles.
    pub social_handles: Option<String>,
}

impl EditSaleForm {
    /// Validates and sanitizes the payload into a full [`Sale`] record.
    pub fn into_sale(self) -> SaleFormResult<Sale> {
        self.validate()?;

        Ok(Sale {
            id: self.sale_id,
            registered_at: self.registered_at,
            unit: required_inline(&self.unit, "unit")?,
            seller: required_inline(&self.seller, "seller")?,
            customer: required_inline(&self.customer, "customer")?,
            phone: required_inline(&self.phone, "phone")?,
            category: self.category,
            source: self.source,
            status: self.status,
            stage: self.stage,
            initial_value_cents: money_field(&self.initial_value, "initial_value")?,
            sale_value_cents: money_field(&self.sale_value, "sale_value")?,
            qualification: self.qualification,
            expected_close: self.expected_close,
            city: optional_inline(self.city.as_deref()),
            address: optional_inline(self.address.as_deref()),
            messenger: optional_inline(self.messenger.as_deref()),
            email: optional_inline(self.email.as_deref()),
            social_handles: optional_inline(self.social_handles.as_deref()),
        })
    }
}

/// CSV-backed upload payload for bulk sale registration.
#[derive(Debug)]
pub struct UploadSalesForm {
    /// Optional filename provided by the client.
    pub file_name: Option<String>,
    /// Raw CSV bytes received from the upload.
    pub bytes: Vec<u8>,
}

impl UploadSalesForm {
    /// Construct a new upload payload.
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Parse the uploaded CSV and convert it into domain [`NewSale`] values.
    pub fn into_new_sales(self) -> SaleFormResult<Vec<NewSale>> {
        let UploadSalesForm { bytes, .. } = self;
        let cursor = Cursor::new(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(cursor);

        let headers = reader.headers()?.clone();
        let indexes = locate_sale_headers(&headers).ok_or(SaleFormError::MissingRequiredHeaders)?;

        let mut sales = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            let unit = required_cell(&record, indexes.unit, row_number, "unit")?;
            let seller = required_cell(&record, indexes.seller, row_number, "seller")?;
            let customer = required_cell(&record, indexes.customer, row_number, "customer")?;
            let phone = required_cell(&record, indexes.phone, row_number, "phone")?;

            let category_raw = required_cell(&record, indexes.category, row_number, "category")?;
            let category = Category::from_label(&category_raw).ok_or_else(|| {
                SaleFormError::UploadUnknownCategory {
                    row: row_number,
                    value: category_raw.clone(),
                }
            })?;

            let source_raw = required_cell(&record, indexes.source, row_number, "source")?;
            let source = LeadSource::from_label(&source_raw).ok_or_else(|| {
                SaleFormError::UploadUnknownSource {
                    row: row_number,
                    value: source_raw.clone(),
                }
            })?;

            let sale_value_raw =
                required_cell(&record, indexes.sale_value, row_number, "sale_value")?;
            let sale_value_cents = parse_money_cents(&sale_value_raw).ok_or_else(|| {
                SaleFormError::UploadInvalidMoney {
                    row: row_number,
                    value: sale_value_raw.clone(),
                }
            })?;

            let initial_value_cents = match indexes
                .initial_value
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|value| !value.is_empty())
            {
                Some(raw) => {
                    parse_money_cents(raw).ok_or_else(|| SaleFormError::UploadInvalidMoney {
                        row: row_number,
                        value: raw.to_string(),
                    })?
                }
                None => 0,
            };

            sales.push(NewSale::new(
                unit,
                seller,
                customer,
                phone,
                category,
                source,
                initial_value_cents,
                sale_value_cents,
            ));
        }

        if sales.is_empty() {
            return Err(SaleFormError::EmptyUpload);
        }

        Ok(sales)
    }
}

struct SaleHeaderIndexes {
    unit: usize,
    seller: usize,
    customer: usize,
    phone: usize,
    category: usize,
    source: usize,
    sale_value: usize,
    initial_value: Option<usize>,
}

fn locate_sale_headers(headers: &StringRecord) -> Option<SaleHeaderIndexes> {
    Some(SaleHeaderIndexes {
        unit: locate_header(headers, "unit")?,
        seller: locate_header(headers, "seller")?,
        customer: locate_header(headers, "customer")?,
        phone: locate_header(headers, "phone")?,
        category: locate_header(headers, "category")?,
        source: locate_header(headers, "source")?,
        sale_value: locate_header(headers, "sale_value")?,
        initial_value: locate_header(headers, "initial_value"),
    })
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn required_cell(
    record: &StringRecord,
    index: usize,
    row: usize,
    field: &'static str,
) -> SaleFormResult<String> {
    let value = sanitize_inline_text(record.get(index).unwrap_or(""));
    if value.is_empty() {
        return Err(SaleFormError::UploadMissingField { row, field });
    }
    Ok(value)
}

fn required_inline(input: &str, field: &'static str) -> SaleFormResult<String> {
    let sanitized = sanitize_inline_text(input);
    if sanitized.is_empty() {
        return Err(SaleFormError::EmptyField { field });
    }
    Ok(sanitized)
}

fn optional_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

fn money_field(input: &str, field: &'static str) -> SaleFormResult<i64> {
    parse_money_cents(input).ok_or_else(|| SaleFormError::InvalidMoney {
        field,
        value: input.to_string(),
    })
}
