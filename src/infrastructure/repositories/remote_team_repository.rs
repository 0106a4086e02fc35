use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::document::DocumentStore;
use crate::domain::errors::TeamResult;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;
use crate::infrastructure::remote::TeamRemoteDataSource;

/// TeamRepository backed by the remote accessor
///
/// Every call is forwarded unchanged.
#[derive(Clone)]
pub struct RemoteTeamRepository {
    remote: TeamRemoteDataSource,
}

impl RemoteTeamRepository {
    pub fn new(remote: TeamRemoteDataSource) -> Self {
        Self { remote }
    }

    /// Shorthand for a repository over the default teams collection
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(TeamRemoteDataSource::new(store))
    }
}

#[async_trait]
impl TeamRepository for RemoteTeamRepository {
    async fn fetch_all(&self) -> TeamResult<Vec<Team>> {
        self.remote.fetch_all().await
    }

    async fn get(&self, id: &str) -> TeamResult<Option<Team>> {
        self.remote.get(id).await
    }

    async fn create(&self, team: &Team) -> TeamResult<String> {
        self.remote.create(team).await
    }

    async fn update(&self, team: &Team) -> TeamResult<()> {
        self.remote.update(team).await
    }

    async fn delete(&self, id: &str) -> TeamResult<()> {
        self.remote.delete(id).await
    }
}
