use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::team::Team;
use crate::presentation::register::validation::{parse_or_zero, validate_team_input};

/// A numeric body field sent either as a JSON number or as typed text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(i64),
    Text(String),
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl NumericInput {
    /// The value as form text; numbers render as their decimal digits
    pub fn into_text(self) -> String {
        match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(text) => text,
        }
    }
}

/// Request body for registering a team
///
/// Numeric fields go through the same validation rules as the
/// registration form, so a number is checked as its decimal text.
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub founded_year: NumericInput,
    #[serde(default)]
    pub titles_won: NumericInput,
    #[serde(default)]
    pub image_url: String,
}

/// Request body for updating a team
///
/// Numeric fields that do not parse as an `i32` are written as 0.
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub founded_year: NumericInput,
    #[serde(default)]
    pub titles_won: NumericInput,
    #[serde(default)]
    pub image_url: String,
}

/// List all teams
///
/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = state.teams.fetch_all().await?;
    Ok(Json(teams))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = state
        .teams
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team not found: {}", id)))?;

    Ok(Json(team))
}

/// Register a new team
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let Json(req) = payload?;
    let founded_year = req.founded_year.into_text();
    let titles_won = req.titles_won.into_text();

    validate_team_input(&req.name, &founded_year, &titles_won)?;

    let mut team = Team::new(
        req.name.trim(),
        parse_or_zero(&founded_year),
        parse_or_zero(&titles_won),
        req.image_url.trim(),
    );
    if let Some(id) = req.id.filter(|id| !id.is_empty()) {
        team = team.with_id(id);
    }

    let id = state.teams.create(&team).await?;

    Ok((StatusCode::CREATED, Json(team.with_id(id))))
}

/// Update a team's fields
///
/// PUT /api/teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTeamRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload?;
    let team = Team::new(
        req.name,
        parse_or_zero(&req.founded_year.into_text()),
        parse_or_zero(&req.titles_won.into_text()),
        req.image_url,
    )
    .with_id(id);

    state.teams.update(&team).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a team
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.teams.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
