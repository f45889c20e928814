use crate::domain::unit::{NewUnit, Unit};
use crate::repository::{InMemoryRepository, RepositoryResult, UnitReader, UnitWriter};

impl UnitReader for InMemoryRepository {
    fn get_unit_by_id(&self, id: i64) -> RepositoryResult<Option<Unit>> {
        let state = self.read()?;
        Ok(state.units.iter().find(|unit| unit.id == id).cloned())
    }

    fn list_units(&self, active_only: bool) -> RepositoryResult<Vec<Unit>> {
        let state = self.read()?;
        Ok(state
            .units
            .iter()
            .filter(|unit| !active_only || unit.active)
            .cloned()
            .collect())
    }
}

impl UnitWriter for InMemoryRepository {
    fn create_unit(&self, new_unit: &NewUnit) -> RepositoryResult<Option<Unit>> {
        let name = new_unit.name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let mut state = self.write()?;
        if state
            .units
            .iter()
            .any(|unit| unit.name.eq_ignore_ascii_case(name))
        {
            return Ok(None);
        }

        let unit = Unit {
            id: state.allocate_id(),
            name: name.to_string(),
            active: true,
        };
        state.units.push(unit.clone());
        Ok(Some(unit))
    }

    fn rename_unit(&self, id: i64, name: &str) -> RepositoryResult<Option<Unit>> {
        let mut state = self.write()?;
        let Some(unit) = state.units.iter_mut().find(|unit| unit.id == id) else {
            return Ok(None);
        };
        unit.name = name.to_string();
        Ok(Some(unit.clone()))
    }

    fn toggle_unit(&self, id: i64) -> RepositoryResult<Option<Unit>> {
        let mut state = self.write()?;
        let Some(unit) = state.units.iter_mut().find(|unit| unit.id == id) else {
            return Ok(None);
        };
        unit.active = !unit.active;
        Ok(Some(unit.clone()))
    }

    fn delete_unit(&self, id: i64) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.units.retain(|unit| unit.id != id);
        state.unit_seller_links.remove(&id);
        Ok(())
    }
}
