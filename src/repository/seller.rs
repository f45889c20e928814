use crate::domain::seller::{NewSeller, Seller, SellerPatch};
use crate::repository::{InMemoryRepository, RepositoryResult, SellerReader, SellerWriter};

impl SellerReader for InMemoryRepository {
    fn get_seller_by_id(&self, id: i64) -> RepositoryResult<Option<Seller>> {
        let state = self.read()?;
        Ok(state.sellers.iter().find(|seller| seller.id == id).cloned())
    }

    fn list_sellers(&self, active_only: bool) -> RepositoryResult<Vec<Seller>> {
        let state = self.read()?;
        Ok(state
            .sellers
            .iter()
            .filter(|seller| !active_only || seller.active)
            .cloned()
            .collect())
    }
}

impl SellerWriter for InMemoryRepository {
    fn create_seller(&self, new_seller: &NewSeller) -> RepositoryResult<Option<Seller>> {
        let name = new_seller.name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let mut state = self.write()?;
        if state
            .sellers
            .iter()
            .any(|seller| seller.name.eq_ignore_ascii_case(name))
        {
            return Ok(None);
        }

        let seller = Seller {
            id: state.allocate_id(),
            name: name.to_string(),
            email: new_seller.email.clone(),
            phone: new_seller.phone.clone(),
            role: new_seller.role,
            active: true,
        };
        state.sellers.push(seller.clone());
        Ok(Some(seller))
    }

    fn update_seller(&self, id: i64, patch: &SellerPatch) -> RepositoryResult<Option<Seller>> {
        let mut state = self.write()?;
        let Some(seller) = state.sellers.iter_mut().find(|seller| seller.id == id) else {
            return Ok(None);
        };
        seller.name = patch.name.clone();
        seller.email = patch.email.clone();
        seller.phone = patch.phone.clone();
        seller.role = patch.role;
        Ok(Some(seller.clone()))
    }

    fn toggle_seller(&self, id: i64) -> RepositoryResult<Option<Seller>> {
        let mut state = self.write()?;
        let Some(seller) = state.sellers.iter_mut().find(|seller| seller.id == id) else {
            return Ok(None);
        };
        seller.active = !seller.active;
        Ok(Some(seller.clone()))
    }

    fn delete_seller(&self, id: i64) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.sellers.retain(|seller| seller.id != id);
        Ok(())
    }
}
