//! Integration tests for the list and registration state holders
//!
//! Covers the submit flows against a fake store, the last-writer-wins race
//! between concurrent loads, and the guarantee that a torn-down holder is
//! never written to.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex};

use team_registry::domain::errors::{StoreError, TeamError, TeamResult};
use team_registry::domain::repositories::TeamRepository;
use team_registry::domain::team::Team;
use team_registry::infrastructure::repositories::RemoteTeamRepository;
use team_registry::infrastructure::stores::MemoryDocumentStore;
use team_registry::presentation::{RegisterModel, TeamListModel};

/// Repository whose `fetch_all` calls block until released one by one
struct GatedRepository {
    gates: Mutex<Vec<oneshot::Receiver<Vec<Team>>>>,
}

impl GatedRepository {
    fn new(count: usize) -> (Arc<Self>, Vec<oneshot::Sender<Vec<Team>>>) {
        let (senders, receivers): (Vec<_>, Vec<_>) = (0..count).map(|_| oneshot::channel()).unzip();
        let repo = Arc::new(Self {
            gates: Mutex::new(receivers.into_iter().rev().collect()),
        });
        (repo, senders)
    }
}

#[async_trait]
impl TeamRepository for GatedRepository {
    async fn fetch_all(&self) -> TeamResult<Vec<Team>> {
        let gate = self
            .gates
            .lock()
            .await
            .pop()
            .expect("more loads than gates");
        gate.await
            .map_err(|_| TeamError::RemoteFailure("gate dropped".to_string()))
    }

    async fn get(&self, _id: &str) -> TeamResult<Option<Team>> {
        Ok(None)
    }

    async fn create(&self, _team: &Team) -> TeamResult<String> {
        Ok("gated".to_string())
    }

    async fn update(&self, _team: &Team) -> TeamResult<()> {
        Ok(())
    }

    async fn delete(&self, _id: &str) -> TeamResult<()> {
        Ok(())
    }
}

fn register_model(store: &Arc<MemoryDocumentStore>) -> RegisterModel {
    RegisterModel::new(Arc::new(RemoteTeamRepository::from_store(store.clone())))
}

fn fill_river(model: &RegisterModel) {
    model.on_team_name_change("River");
    model.on_founded_year_change("1901");
    model.on_titles_won_change("38");
}

#[tokio::test]
async fn test_register_success_path() {
    let store = Arc::new(MemoryDocumentStore::new());
    let model = register_model(&store);
    fill_river(&model);

    model.on_register_click().expect("valid form").await.unwrap();

    let state = model.state();
    assert!(!state.is_loading);
    assert!(state.register_success);
    assert_eq!(state.error_message, None);

    let id = state.registered_team_id.expect("assigned id");
    let list = TeamListModel::new(Arc::new(RemoteTeamRepository::from_store(store.clone())));
    let mut rx = list.subscribe();
    let loaded = rx.wait_for(|s| !s.is_loading).await.unwrap().clone();
    assert_eq!(loaded.teams, vec![Team::new("River", 1901, 38, "").with_id(id)]);
}

#[tokio::test]
async fn test_register_failure_path() {
    let store = Arc::new(MemoryDocumentStore::new());
    store
        .fail_always(StoreError::Unavailable("offline".to_string()))
        .await;
    let model = register_model(&store);
    fill_river(&model);

    model.on_register_click().expect("valid form").await.unwrap();

    let state = model.state();
    assert!(!state.is_loading);
    assert!(!state.register_success);
    assert_eq!(state.error_message.as_deref(), Some("offline"));
}

#[tokio::test]
async fn test_validation_short_circuits_before_repository() {
    let store = Arc::new(MemoryDocumentStore::new());
    let model = register_model(&store);

    assert!(model.on_register_click().is_none());

    assert_eq!(model.state().error_message.as_deref(), Some("name is required"));
    assert_eq!(store.call_counts().await.total(), 0);
}

#[tokio::test]
async fn test_concurrent_loads_last_writer_wins() {
    let (repo, mut gates) = GatedRepository::new(2);
    let first_result = vec![Team::new("First", 1900, 1, "").with_id("1")];
    let second_result = vec![Team::new("Second", 1900, 2, "").with_id("2")];

    // Construction starts the first load; a second one races it.
    let model = TeamListModel::new(repo);
    let _second = model.load_teams();
    assert!(model.state().is_loading);

    // The first load finishing clears the flag even though the second is
    // still in flight.
    let mut rx = model.subscribe();
    gates.remove(0).send(first_result.clone()).unwrap();
    let state = rx.wait_for(|s| !s.is_loading).await.unwrap().clone();
    assert_eq!(state.teams, first_result);

    gates.remove(0).send(second_result.clone()).unwrap();
    let state = rx
        .wait_for(|s| s.teams == second_result)
        .await
        .unwrap()
        .clone();
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_dropped_list_model_is_not_written() {
    let store = Arc::new(MemoryDocumentStore::new().with_latency(Duration::from_millis(50)));
    let model = TeamListModel::new(Arc::new(RemoteTeamRepository::from_store(store.clone())));
    let rx = model.subscribe();
    assert!(rx.borrow().is_loading);

    drop(model);
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(rx.borrow().is_loading, "torn-down state must not change");
    assert!(rx.has_changed().is_err(), "channel closes with its holder");
}

#[tokio::test]
async fn test_dropped_register_model_is_not_written() {
    let store = Arc::new(MemoryDocumentStore::new().with_latency(Duration::from_millis(50)));
    let model = register_model(&store);
    fill_river(&model);

    let handle = model.on_register_click().expect("valid form");
    let rx = model.subscribe();

    drop(model);
    assert!(handle.await.unwrap_err().is_cancelled());

    let state = rx.borrow().clone();
    assert!(state.is_loading);
    assert!(!state.register_success);
}
