use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::{
    PlannerError, VERSION,
    locale::{self, KnownDestination},
    models::{TripPlan, TripRequest},
    planner::TripPlanner,
};

#[derive(Serialize)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub plan: TripPlan,
    /// The plan rendered as one markdown page
    pub markdown: String,
}

impl From<TripPlan> for PlanResponse {
    fn from(plan: TripPlan) -> Self {
        let markdown = plan.to_string();
        Self { plan, markdown }
    }
}

pub struct ApiError(PlannerError);

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlannerError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PlannerError::Busy => StatusCode::CONFLICT,
            PlannerError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/destinations", get(get_destinations))
        .route("/itinerary", post(create_itinerary))
        .with_state(planner)
}

async fn health(State(planner): State<Arc<TripPlanner>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": VERSION,
        "state": planner.state(),
    }))
}

async fn get_destinations() -> Json<Vec<KnownDestination>> {
    Json(locale::known_destinations())
}

async fn create_itinerary(
    State(planner): State<Arc<TripPlanner>>,
    Json(request): Json<TripRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let plan = planner.plan(&request).await?;
    Ok(Json(plan.into()))
}
