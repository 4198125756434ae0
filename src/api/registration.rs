//! Team registration endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::registration::{DuplicateReport, Member, TeamRegistration};
use crate::infrastructure::registration::{RegisterTeamRequest, RegistrationOutcome};

/// Body of `POST /add_team`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamApiRequest {
    pub team_name: String,
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub idea_description: String,
    pub captain: Member,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AddTeamApiRequest> for RegisterTeamRequest {
    fn from(request: AddTeamApiRequest) -> Self {
        Self {
            team_name: request.team_name,
            idea: request.idea,
            idea_description: request.idea_description,
            captain: request.captain,
            members: request.members,
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTeamResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "teamID")]
    pub team_id: String,
}

/// 409 body listing every collision
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateTeamResponse {
    pub success: bool,
    pub message: String,
    pub data: DuplicateData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateData {
    pub has_duplicates: bool,
    pub duplicates: Duplicates,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Duplicates {
    /// Present only when the team name is taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<bool>,
    pub emails: Vec<String>,
    pub srns: Vec<String>,
}

impl From<DuplicateReport> for DuplicateTeamResponse {
    fn from(report: DuplicateReport) -> Self {
        Self {
            success: false,
            message: report.describe(),
            data: DuplicateData {
                has_duplicates: report.has_duplicates,
                duplicates: Duplicates {
                    team_name: report.team_name_conflict.then_some(true),
                    emails: report.conflicting_emails.into_iter().collect(),
                    srns: report.conflicting_srns.into_iter().collect(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamRegistration>,
    pub total: usize,
}

/// POST /add_team
pub async fn add_team(
    State(state): State<AppState>,
    Json(request): Json<AddTeamApiRequest>,
) -> Result<Response, ApiError> {
    debug!(team_name = %request.team_name, members = request.members.len(), "add_team called");

    let outcome = state
        .registration_service
        .register(request.into())
        .await
        .map_err(ApiError::from)?;

    let response = match outcome {
        RegistrationOutcome::Created(team) => (
            StatusCode::OK,
            Json(AddTeamResponse {
                success: true,
                message: "Team successfully added.".to_string(),
                team_id: team.id().to_string(),
            }),
        )
            .into_response(),
        RegistrationOutcome::Duplicate(report) => (
            StatusCode::CONFLICT,
            Json(DuplicateTeamResponse::from(report)),
        )
            .into_response(),
    };

    Ok(response)
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state
        .registration_service
        .list()
        .await
        .map_err(ApiError::from)?;
    let total = teams.len();

    Ok(Json(ListTeamsResponse { teams, total }))
}

/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamRegistration>, ApiError> {
    let team = state
        .registration_service
        .get(&team_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(team))
}

/// GET /wallets
pub async fn list_wallets(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let Some(wallets) = state.registration_service.wallets() else {
        return Err(ApiError::not_found("Wallet registry is disabled"));
    };

    let wallets = wallets.load().await.map_err(ApiError::from)?;
    Ok(Json(wallets))
}
