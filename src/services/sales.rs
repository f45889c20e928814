use crate::domain::sale::{Sale, SaleFilters};
use crate::forms::sales::{AddSaleForm, EditSaleForm, UploadSalesForm};
use crate::repository::{SaleReader, SaleWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists sales narrowed by the given criteria, most recent first.
pub fn list_sales<R>(repo: &R, filters: &SaleFilters) -> ServiceResult<Vec<Sale>>
where
    R: SaleReader + ?Sized,
{
    repo.list_sales(filters).map_err(ServiceError::from)
}

/// Registers a new sale.
///
/// The phone number acts as a natural dedup key: a duplicate is reported as
/// a field-keyed validation error before the store is touched.
pub fn create_sale<R>(repo: &R, form: AddSaleForm) -> ServiceResult<Sale>
where
    R: SaleReader + SaleWriter + ?Sized,
{
    let new_sale = form
        .into_new_sale()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.sale_phone_exists(&new_sale.phone)? {
        return Err(ServiceError::validation(
            "phone",
            "a sale with this phone already exists",
        ));
    }

    repo.create_sale(&new_sale).map_err(ServiceError::from)
}

/// Replaces an existing sale wholesale. A stale id is a silent no-op and
/// yields `None`.
pub fn modify_sale<R>(repo: &R, form: EditSaleForm) -> ServiceResult<Option<Sale>>
where
    R: SaleWriter + ?Sized,
{
    let sale = form
        .into_sale()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_sale(&sale).map_err(ServiceError::from)
}

/// Imports sales from an uploaded CSV file, returning the number created.
///
/// Rows whose phone already exists in the store (or earlier in the same
/// upload) are skipped, mirroring the single-sale dedup rule.
pub fn import_sales<R>(repo: &R, form: UploadSalesForm) -> ServiceResult<usize>
where
    R: SaleReader + SaleWriter + ?Sized,
{
    let uploads = form
        .into_new_sales()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut created = 0usize;
    for upload in uploads {
        if repo.sale_phone_exists(&upload.phone)? {
            log::warn!("skipping import row with duplicate phone {}", upload.phone);
            continue;
        }
        repo.create_sale(&upload)?;
        created += 1;
    }

    Ok(created)
}
