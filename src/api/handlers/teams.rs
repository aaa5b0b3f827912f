use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Team, TeamName};
use crate::infrastructure::repositories::PostgresTeamRepository;

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: Option<String>,
}

/// Response from team creation
#[derive(Debug, Serialize)]
pub struct CreateTeamResponse {
    pub message: String,
    pub team_id: i32,
}

/// Request body for awarding points
#[derive(Debug, Deserialize)]
pub struct UpdateScoreRequest {
    pub team_id: Option<i32>,
    pub score: Option<i32>,
}

/// Response from a score update
#[derive(Debug, Serialize)]
pub struct UpdateScoreResponse {
    pub message: String,
}

/// Query parameters for the team status route
#[derive(Debug, Deserialize)]
pub struct TeamStatusQuery {
    pub team_id: Option<i32>,
}

/// Snapshot of one team's progress
#[derive(Debug, Serialize)]
pub struct TeamStatusResponse {
    pub team_id: i32,
    pub current_step: i32,
    pub elapsed_time: f64,
    pub completed: bool,
    pub score: i32,
}

/// Request body for validating a step
#[derive(Debug, Deserialize)]
pub struct ValidateStepRequest {
    pub team_id: Option<i32>,
}

/// Response from step validation
#[derive(Debug, Serialize)]
pub struct ValidateStepResponse {
    pub message: String,
    pub next_step: i32,
}

/// One entry of the spectator scoreboard
#[derive(Debug, Serialize)]
pub struct SpectatorTeam {
    pub id: i32,
    pub name: String,
    pub current_step: i32,
    pub elapsed_time: f64,
    pub completed: bool,
    pub score: i32,
}

/// Response for the spectator view
#[derive(Debug, Serialize)]
pub struct SpectatorDataResponse {
    pub teams: Vec<SpectatorTeam>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create a new team
///
/// POST /create_team
pub async fn create_team(
    State(pool): State<PgPool>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<CreateTeamResponse>), ApiError> {
    let name = TeamName::new(req.name.unwrap_or_default())?;

    let repo = PostgresTeamRepository::new(pool);
    let team_id = repo.create(&name).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTeamResponse {
            message: format!("Team {} created successfully!", name),
            team_id,
        }),
    ))
}

/// Add points to a team's score
///
/// POST /update_score
///
/// A missing team id is a silent no-op; the response does not carry the
/// new total, callers re-query for it.
pub async fn update_score(
    State(pool): State<PgPool>,
    Json(req): Json<UpdateScoreRequest>,
) -> Result<Json<UpdateScoreResponse>, ApiError> {
    let (team_id, delta) = match (req.team_id, req.score) {
        (Some(team_id), Some(delta)) => (team_id, delta),
        _ => return Err(ApiError::bad_request("Team id and score are required")),
    };

    let repo = PostgresTeamRepository::new(pool);
    repo.award_score(team_id, delta).await?;

    Ok(Json(UpdateScoreResponse {
        message: format!("Score updated by {} points for team {}", delta, team_id),
    }))
}

/// Get one team's progress snapshot
///
/// GET /get_team_status?team_id=
pub async fn get_team_status(
    State(pool): State<PgPool>,
    Query(query): Query<TeamStatusQuery>,
) -> Result<Json<TeamStatusResponse>, ApiError> {
    let team_id = query
        .team_id
        .ok_or_else(|| ApiError::bad_request("Team id is required"))?;

    let repo = PostgresTeamRepository::new(pool);
    let team = repo
        .find_by_id(team_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team not found: {}", team_id)))?;

    Ok(Json(TeamStatusResponse {
        team_id: team.id(),
        current_step: team.current_step(),
        elapsed_time: team.elapsed_seconds(Utc::now()),
        completed: team.completed(),
        score: team.score(),
    }))
}

/// Validate the team's current step, moving it to the next one
///
/// POST /validate_step
pub async fn validate_step(
    State(pool): State<PgPool>,
    Json(req): Json<ValidateStepRequest>,
) -> Result<Json<ValidateStepResponse>, ApiError> {
    let team_id = req
        .team_id
        .ok_or_else(|| ApiError::bad_request("Team id is required"))?;

    let repo = PostgresTeamRepository::new(pool);
    let next_step = repo.advance_step(team_id).await?;

    Ok(Json(ValidateStepResponse {
        message: "Step validated".to_string(),
        next_step,
    }))
}

/// Ranked scoreboard for the spectator display
///
/// GET /get_spectator_data
pub async fn get_spectator_data(
    State(pool): State<PgPool>,
) -> Result<Json<SpectatorDataResponse>, ApiError> {
    let repo = PostgresTeamRepository::new(pool);
    let mut teams = repo.list_all().await?;
    Team::rank(&mut teams);

    // One read of the clock so every entry shares the same reference point.
    let now = Utc::now();
    let teams = teams
        .iter()
        .map(|team| SpectatorTeam {
            id: team.id(),
            name: team.name().to_string(),
            current_step: team.current_step(),
            elapsed_time: team.elapsed_seconds(now),
            completed: team.completed(),
            score: team.score(),
        })
        .collect();

    Ok(Json(SpectatorDataResponse { teams }))
}
