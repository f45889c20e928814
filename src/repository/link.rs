use std::collections::HashMap;

use crate::repository::{InMemoryRepository, LinkReader, LinkWriter, RepositoryResult};

impl LinkReader for InMemoryRepository {
    fn sellers_for_unit(&self, unit_id: i64) -> RepositoryResult<Vec<i64>> {
        let state = self.read()?;
        Ok(state
            .unit_seller_links
            .get(&unit_id)
            .cloned()
            .unwrap_or_default())
    }

    fn all_links(&self) -> RepositoryResult<HashMap<i64, Vec<i64>>> {
        let state = self.read()?;
        Ok(state.unit_seller_links.clone())
    }
}

impl LinkWriter for InMemoryRepository {
    fn replace_unit_sellers(&self, unit_id: i64, seller_ids: &[i64]) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state
            .unit_seller_links
            .insert(unit_id, seller_ids.to_vec());
        Ok(())
    }
}
