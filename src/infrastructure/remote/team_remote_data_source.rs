use std::sync::Arc;

use crate::domain::document::DocumentStore;
use crate::domain::errors::{TeamError, TeamResult};
use crate::domain::team::fields::TEAMS_COLLECTION;
use crate::domain::team::Team;

/// Remote accessor for team documents
///
/// Translates typed CRUD intents into document store calls against a
/// single collection and folds every store fault into a `TeamError`.
/// The store client is injected; there is no process-wide handle.
#[derive(Clone)]
pub struct TeamRemoteDataSource {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl TeamRemoteDataSource {
    /// Creates an accessor over the teams collection
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, TEAMS_COLLECTION)
    }

    /// Creates an accessor over a differently named collection
    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub async fn fetch_all(&self) -> TeamResult<Vec<Team>> {
        tracing::debug!(collection = %self.collection, "fetching all teams");

        let docs = self
            .store
            .get_all(&self.collection)
            .await
            .map_err(|e| self.remote_failure("fetch_all", e.into()))?;

        Ok(docs.iter().map(Team::from_document).collect())
    }

    pub async fn get(&self, id: &str) -> TeamResult<Option<Team>> {
        tracing::debug!(collection = %self.collection, team_id = %id, "fetching team");

        if id.is_empty() {
            return Ok(None);
        }

        let doc = self
            .store
            .get(&self.collection, id)
            .await
            .map_err(|e| self.remote_failure("get", e.into()))?;

        Ok(doc.as_ref().map(Team::from_document))
    }

    /// Stores a team and returns its id
    ///
    /// Teams without an id are added and receive a store-assigned one;
    /// teams with an id are upserted in place.
    pub async fn create(&self, team: &Team) -> TeamResult<String> {
        let fields = team.to_fields();

        let id = if team.id.is_empty() {
            self.store
                .add(&self.collection, fields)
                .await
                .map_err(|e| self.remote_failure("create", e.into()))?
        } else {
            self.store
                .set(&self.collection, &team.id, fields)
                .await
                .map_err(|e| self.remote_failure("create", e.into()))?;
            team.id.clone()
        };

        tracing::info!(collection = %self.collection, team_id = %id, "team stored");
        Ok(id)
    }

    pub async fn update(&self, team: &Team) -> TeamResult<()> {
        if team.id.is_empty() {
            return Err(TeamError::InvalidArgument(
                "team id must not be empty".to_string(),
            ));
        }

        tracing::debug!(collection = %self.collection, team_id = %team.id, "updating team");

        self.store
            .update(&self.collection, &team.id, team.to_fields())
            .await
            .map_err(|e| self.remote_failure("update", e.into()))
    }

    pub async fn delete(&self, id: &str) -> TeamResult<()> {
        tracing::debug!(collection = %self.collection, team_id = %id, "deleting team");

        self.store
            .delete(&self.collection, id)
            .await
            .map_err(|e| self.remote_failure("delete", e.into()))
    }

    fn remote_failure(&self, operation: &str, err: TeamError) -> TeamError {
        tracing::warn!(
            collection = %self.collection,
            operation,
            error = %err,
            "team store operation failed"
        );
        err
    }
}
