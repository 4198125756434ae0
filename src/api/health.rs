//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_teams: Option<usize>,
    pub latency_ms: u64,
}

/// Liveness: 200 while the process is serving
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: the registration store must answer a count
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let store_check = check_registration_store(&state).await;
    let status = store_check.status;

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![store_check]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn check_registration_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();

    match state.registration_service.count().await {
        Ok(count) => HealthCheck {
            name: "registration_store".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            registered_teams: Some(count),
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthCheck {
            name: "registration_store".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            registered_teams: None,
            latency_ms: start.elapsed().as_millis() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::api::router::create_router;
    use crate::config::CorsConfig;
    use crate::domain::registration::{MockTeamRegistrationRepository, RegistrationRules};
    use crate::domain::DomainError;
    use crate::infrastructure::registration::RegistrationService;

    fn app(repo: MockTeamRegistrationRepository) -> axum::Router {
        let rules = RegistrationRules::new("pes.edu", 4).unwrap();
        let service = RegistrationService::new(Arc::new(repo), rules);
        create_router(AppState::new(Arc::new(service)), &CorsConfig::default())
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get(app(MockTeamRegistrationRepository::new()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_check_reports_count() {
        let mut repo = MockTeamRegistrationRepository::new();
        repo.expect_count().times(1).returning(|| Ok(3));

        let (status, body) = get(app(repo), "/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["registered_teams"], 3);
    }

    #[tokio::test]
    async fn test_ready_check_store_down() {
        let mut repo = MockTeamRegistrationRepository::new();
        repo.expect_count()
            .returning(|| Err(DomainError::storage("pool timed out")));

        let (status, body) = get(app(repo), "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }
}
