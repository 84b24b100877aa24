use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::StudentProfile;
use super::intake::IntakeAnswers;
use super::service::AdvisorService;

/// Router builder exposing the recommendation and snapshot endpoints.
pub fn advisor_router(service: Arc<AdvisorService>) -> Router {
    Router::new()
        .route(
            "/api/v1/advisor/recommendations",
            post(recommendations_handler),
        )
        .route("/api/v1/advisor/snapshot", get(snapshot_handler))
        .with_state(service)
}

/// Either a canonical profile or raw intake answers. When both are present
/// the canonical profile wins; `today` anchors intake-month arithmetic.
#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    profile: Option<StudentProfile>,
    #[serde(default)]
    answers: Option<IntakeAnswers>,
    #[serde(default)]
    today: Option<NaiveDate>,
}

pub(crate) async fn recommendations_handler(
    State(service): State<Arc<AdvisorService>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response {
    let report = match (&request.profile, &request.answers) {
        (Some(profile), _) => service.recommend(profile),
        (None, Some(answers)) => {
            let today = request.today.unwrap_or_else(|| Local::now().date_naive());
            service.recommend_from_answers(answers, today)
        }
        (None, None) => {
            let payload = json!({
                "error": "request must carry a profile or intake answers",
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn snapshot_handler(State(service): State<Arc<AdvisorService>>) -> Response {
    (StatusCode::OK, axum::Json(service.snapshot_summary())).into_response()
}
