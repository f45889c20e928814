use crate::repository::{GoalReader, GoalWriter, InMemoryRepository, RepositoryResult};

impl GoalReader for InMemoryRepository {
    fn monthly_goal_cents(&self) -> RepositoryResult<i64> {
        let state = self.read()?;
        Ok(state.monthly_goal_cents)
    }
}

impl GoalWriter for InMemoryRepository {
    fn set_monthly_goal_cents(&self, value_cents: i64) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.monthly_goal_cents = value_cents;
        Ok(())
    }
}
