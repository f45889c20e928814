use chrono::Local;

use crate::domain::sale::{NewSale, Sale, SaleFilters, SaleStatus};
use crate::domain::stage::FunnelStage;
use crate::repository::{InMemoryRepository, RepositoryResult, SaleReader, SaleWriter};

impl SaleReader for InMemoryRepository {
    fn get_sale_by_id(&self, id: i64) -> RepositoryResult<Option<Sale>> {
        let state = self.read()?;
        Ok(state.sales.iter().find(|sale| sale.id == id).cloned())
    }

    fn list_sales(&self, filters: &SaleFilters) -> RepositoryResult<Vec<Sale>> {
        let state = self.read()?;
        Ok(filters.apply(&state.sales))
    }

    fn sale_phone_exists(&self, phone: &str) -> RepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.sales.iter().any(|sale| sale.phone == phone))
    }
}

impl SaleWriter for InMemoryRepository {
    fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale> {
        let mut state = self.write()?;
        let sale = Sale {
            id: state.allocate_id(),
            registered_at: Local::now().date_naive(),
            unit: new_sale.unit.clone(),
            seller: new_sale.seller.clone(),
            customer: new_sale.customer.clone(),
            phone: new_sale.phone.clone(),
            category: new_sale.category,
            source: new_sale.source,
            status: SaleStatus::Active,
            stage: FunnelStage::Lead,
            initial_value_cents: new_sale.initial_value_cents,
            sale_value_cents: new_sale.sale_value_cents,
            qualification: new_sale.qualification,
            expected_close: new_sale.expected_close,
            city: new_sale.city.clone(),
            address: new_sale.address.clone(),
            messenger: new_sale.messenger.clone(),
            email: new_sale.email.clone(),
            social_handles: new_sale.social_handles.clone(),
        };
        state.sales.insert(0, sale.clone());
        Ok(sale)
    }

    fn update_sale(&self, sale: &Sale) -> RepositoryResult<Option<Sale>> {
        let mut state = self.write()?;
        let Some(existing) = state
            .sales
            .iter_mut()
            .find(|candidate| candidate.id == sale.id)
        else {
            return Ok(None);
        };
        *existing = sale.clone();
        Ok(Some(sale.clone()))
    }
}
