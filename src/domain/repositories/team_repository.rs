use async_trait::async_trait;

use crate::domain::errors::TeamResult;
use crate::domain::team::Team;

/// Repository trait for teams
///
/// State holders and HTTP handlers depend on this contract rather than on a
/// concrete store client, so an in-memory store can stand in for tests.
/// Implementations never panic; every fault comes back as a `TeamError`.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Fetch every team in store order
    async fn fetch_all(&self) -> TeamResult<Vec<Team>>;

    /// Find a team by its ID
    async fn get(&self, id: &str) -> TeamResult<Option<Team>>;

    /// Persist a team and return its ID
    ///
    /// An empty `team.id` lets the store assign one; otherwise the team is
    /// upserted at the given ID.
    async fn create(&self, team: &Team) -> TeamResult<String>;

    /// Update the scalar fields of an existing team
    ///
    /// Fails with `TeamError::InvalidArgument` if `team.id` is empty.
    async fn update(&self, team: &Team) -> TeamResult<()>;

    /// Delete a team by ID. Deleting a missing team succeeds.
    async fn delete(&self, id: &str) -> TeamResult<()>;
}
