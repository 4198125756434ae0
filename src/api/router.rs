use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::config::CorsConfig;

use super::health;
use super::middleware::logging_middleware;
use super::registration;
use super::state::AppState;

/// Build the service router with CORS and request logging applied
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/add_team", post(registration::add_team))
        .route("/teams", get(registration::list_teams))
        .route("/teams/{team_id}", get(registration::get_team))
        .route("/wallets", get(registration::list_wallets))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::registration::{MockTeamRegistrationRepository, RegistrationRules};
    use crate::infrastructure::registration::RegistrationService;

    fn app() -> Router {
        let rules = RegistrationRules::new("pes.edu", 4).unwrap();
        let service = RegistrationService::new(Arc::new(MockTeamRegistrationRepository::new()), rules);
        create_router(AppState::new(Arc::new(service)), &CorsConfig::default())
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_client_origin() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/add_team")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
