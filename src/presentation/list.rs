use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::StateCell;
use super::UNKNOWN_ERROR;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;

/// Snapshot of the team list
///
/// `teams` keeps the last successful fetch, so an error can be shown on top
/// of a stale list. Order is whatever the store returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub is_loading: bool,
    pub teams: Vec<Team>,
    pub error_message: Option<String>,
}

/// State holder for the team list
///
/// Loads the list on construction and on every `load_teams` call.
/// Concurrent loads are not de-duplicated; whichever finishes last wins.
pub struct TeamListModel {
    repository: Arc<dyn TeamRepository>,
    state: StateCell<ListState>,
}

impl TeamListModel {
    /// Creates the model and starts the first load
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        let model = Self {
            repository,
            state: StateCell::new(ListState::default()),
        };
        model.load_teams();
        model
    }

    pub fn state(&self) -> ListState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    /// Marks the list as loading and fetches every team in the background
    ///
    /// The returned handle resolves once the result has been applied.
    pub fn load_teams(&self) -> JoinHandle<()> {
        self.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let repository = Arc::clone(&self.repository);
        let state = self.state.downgrade();

        self.state.spawn(async move {
            let result = repository.fetch_all().await;

            state.update(|s| {
                s.is_loading = false;
                match result {
                    Ok(teams) => {
                        tracing::debug!(count = teams.len(), "team list loaded");
                        s.teams = teams;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to load team list");
                        s.error_message = Some(err.message_or(UNKNOWN_ERROR));
                    }
                }
            });
        })
    }
}
