use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::validation::{is_digits_only, parse_or_zero, validate_team_input};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;
use crate::presentation::state::StateCell;
use crate::presentation::UNKNOWN_ERROR;

/// Snapshot of the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterState {
    pub team_name: String,
    pub founded_year: String,
    pub titles_won: String,
    pub image_url: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub register_success: bool,
    /// Id the store assigned to the last registered team
    pub registered_team_id: Option<String>,
}

impl RegisterState {
    /// Builds an unsaved team from the raw form input
    pub fn to_team(&self) -> Team {
        Team::new(
            self.team_name.trim(),
            parse_or_zero(&self.founded_year),
            parse_or_zero(&self.titles_won),
            self.image_url.trim(),
        )
    }
}

/// State holder for the team registration form
pub struct RegisterModel {
    repository: Arc<dyn TeamRepository>,
    state: StateCell<RegisterState>,
}

impl RegisterModel {
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        Self {
            repository,
            state: StateCell::new(RegisterState::default()),
        }
    }

    pub fn state(&self) -> RegisterState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegisterState> {
        self.state.subscribe()
    }

    pub fn on_team_name_change(&self, name: &str) {
        self.state.update(|s| {
            s.team_name = name.to_string();
            s.error_message = None;
        });
    }

    /// Ignores input that is not empty and not all digits
    pub fn on_founded_year_change(&self, year: &str) {
        if is_digits_only(year) {
            self.state.update(|s| {
                s.founded_year = year.to_string();
                s.error_message = None;
            });
        }
    }

    /// Ignores input that is not empty and not all digits
    pub fn on_titles_won_change(&self, titles: &str) {
        if is_digits_only(titles) {
            self.state.update(|s| {
                s.titles_won = titles.to_string();
                s.error_message = None;
            });
        }
    }

    pub fn on_image_url_change(&self, url: &str) {
        self.state.update(|s| {
            s.image_url = url.to_string();
            s.error_message = None;
        });
    }

    /// Validates the form and registers the team
    ///
    /// Returns `None` when validation fails; the first failing rule's
    /// message is published and the repository is not called. Otherwise
    /// returns the handle of the background registration. Must be called
    /// from within a tokio runtime.
    pub fn on_register_click(&self) -> Option<JoinHandle<()>> {
        let form = self.state.snapshot();

        if let Err(err) =
            validate_team_input(&form.team_name, &form.founded_year, &form.titles_won)
        {
            tracing::debug!(error = %err, "registration rejected by validation");
            self.state.update(|s| s.error_message = Some(err.to_string()));
            return None;
        }

        self.state.update(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let team = form.to_team();
        let repository = Arc::clone(&self.repository);
        let state = self.state.downgrade();

        Some(self.state.spawn(async move {
            let result = repository.create(&team).await;

            state.update(|s| {
                s.is_loading = false;
                match result {
                    Ok(id) => {
                        tracing::info!(team_id = %id, "team registered");
                        s.register_success = true;
                        s.error_message = None;
                        s.registered_team_id = Some(id);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "team registration failed");
                        s.register_success = false;
                        s.error_message = Some(err.message_or(UNKNOWN_ERROR));
                    }
                }
            });
        }))
    }

    /// Acknowledges a successful registration so it is not acted on twice
    pub fn reset_register_success(&self) {
        self.state.update(|s| {
            s.register_success = false;
            s.registered_team_id = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;
    use crate::infrastructure::repositories::RemoteTeamRepository;
    use crate::infrastructure::stores::MemoryDocumentStore;
    use crate::presentation::register::validation::{NAME_REQUIRED, YEAR_OUT_OF_RANGE};

    fn setup() -> (Arc<MemoryDocumentStore>, RegisterModel) {
        let store = Arc::new(MemoryDocumentStore::new());
        let repository = Arc::new(RemoteTeamRepository::from_store(store.clone()));
        (store, RegisterModel::new(repository))
    }

    fn fill_river(model: &RegisterModel) {
        model.on_team_name_change("River");
        model.on_founded_year_change("1901");
        model.on_titles_won_change("38");
    }

    #[test]
    fn test_founded_year_filter_rejects_non_digits() {
        let (_store, model) = setup();

        model.on_founded_year_change("1990");
        assert_eq!(model.state().founded_year, "1990");

        model.on_founded_year_change("19a0");
        assert_eq!(model.state().founded_year, "1990");

        model.on_founded_year_change("");
        assert_eq!(model.state().founded_year, "");
    }

    #[test]
    fn test_titles_won_filter_rejects_non_digits() {
        let (_store, model) = setup();

        model.on_titles_won_change("12");
        model.on_titles_won_change("1.5");
        assert_eq!(model.state().titles_won, "12");
    }

    #[test]
    fn test_field_change_clears_error() {
        let (_store, model) = setup();
        assert!(model.on_register_click().is_none());
        assert!(model.state().error_message.is_some());

        model.on_image_url_change("https://img.example/river.png");
        assert_eq!(model.state().error_message, None);
    }

    #[test]
    fn test_rejected_filter_input_keeps_error() {
        let (_store, model) = setup();
        assert!(model.on_register_click().is_none());

        model.on_founded_year_change("abc");
        assert_eq!(model.state().error_message.as_deref(), Some(NAME_REQUIRED));
    }

    #[tokio::test]
    async fn test_blank_name_and_year_reports_name_only() {
        let (store, model) = setup();

        assert!(model.on_register_click().is_none());

        let state = model.state();
        assert_eq!(state.error_message.as_deref(), Some(NAME_REQUIRED));
        assert!(!state.is_loading);
        assert_eq!(store.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_year_out_of_range_blocks_submit() {
        let (store, model) = setup();
        model.on_team_name_change("Old");
        model.on_founded_year_change("1700");
        model.on_titles_won_change("1");

        assert!(model.on_register_click().is_none());
        assert_eq!(model.state().error_message.as_deref(), Some(YEAR_OUT_OF_RANGE));
        assert_eq!(store.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_submit_marks_loading_until_done() {
        let (_store, model) = setup();
        fill_river(&model);

        let handle = model.on_register_click().expect("valid form");
        assert!(model.state().is_loading);

        handle.await.unwrap();
        assert!(!model.state().is_loading);
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let (store, model) = setup();
        fill_river(&model);

        model.on_register_click().expect("valid form").await.unwrap();

        let state = model.state();
        assert!(!state.is_loading);
        assert!(state.register_success);
        assert_eq!(state.error_message, None);
        assert!(state.registered_team_id.is_some());
        assert_eq!(store.call_counts().await.add, 1);
    }

    #[tokio::test]
    async fn test_failed_registration_reports_cause() {
        let (store, model) = setup();
        store
            .fail_always(StoreError::Unavailable("offline".to_string()))
            .await;
        fill_river(&model);

        model.on_register_click().expect("valid form").await.unwrap();

        let state = model.state();
        assert!(!state.is_loading);
        assert!(!state.register_success);
        assert_eq!(state.error_message.as_deref(), Some("offline"));
        assert_eq!(state.registered_team_id, None);
    }

    #[tokio::test]
    async fn test_reset_register_success() {
        let (_store, model) = setup();
        fill_river(&model);
        model.on_register_click().expect("valid form").await.unwrap();

        model.reset_register_success();

        let state = model.state();
        assert!(!state.register_success);
        assert_eq!(state.registered_team_id, None);
        assert_eq!(state.team_name, "River");
    }

    #[test]
    fn test_to_team_has_empty_id_and_parsed_numbers() {
        let state = RegisterState {
            team_name: " River ".to_string(),
            founded_year: "1901".to_string(),
            titles_won: "".to_string(),
            image_url: "".to_string(),
            ..Default::default()
        };

        let team = state.to_team();
        assert_eq!(team, Team::new("River", 1901, 0, ""));
    }
}
