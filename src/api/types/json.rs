//! JSON extractor whose rejections use the API error body

use axum::{
    extract::{rejection::JsonRejection as AxumRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Drop-in for `axum::Json` that answers malformed bodies with an [`ApiError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Rejection produced when the body is missing, not JSON, or the wrong shape
#[derive(Debug)]
pub struct JsonRejection(ApiError);

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(|rejection| JsonRejection(rejection_to_error(&rejection)))
    }
}

fn rejection_to_error(rejection: &AxumRejection) -> ApiError {
    let (status, message) = match rejection {
        AxumRejection::JsonDataError(err) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid team data: {}", err.body_text()),
        ),
        AxumRejection::JsonSyntaxError(err) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid JSON syntax: {}", err.body_text()),
        ),
        AxumRejection::MissingJsonContentType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected 'Content-Type: application/json'".to_string(),
        ),
        other => (other.status(), "No team data provided".to_string()),
    };

    ApiError::new(status, ApiErrorType::InvalidRequestError, message).with_code("json_parse_error")
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
