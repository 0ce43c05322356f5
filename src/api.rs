use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::planner;
use crate::render::render_report;
use crate::types::{CuttingPlan, PieceDemand, WasteFigure, deserialize_i64_from_number};

#[derive(Debug, Deserialize, Serialize)]
pub struct PlanRequest {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub stock_length: i64,
    #[serde(default)]
    pub pieces: Vec<PieceDemand>,
    #[serde(default)]
    pub waste: WasteFigure,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub plan: CuttingPlan,
    pub requested_length: u64,
    pub waste_percent: f64,
    pub report: String,
}

pub async fn plan(
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );

    // Planning is CPU-bound; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || build_response(req))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "plan task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "plan computation failed".to_string(),
            )
        })??;

    Ok(Json(response))
}

fn build_response(req: PlanRequest) -> Result<PlanResponse, (StatusCode, String)> {
    let plan = planner::plan(&req.pieces, req.stock_length).map_err(|e| {
        tracing::warn!(error = %e, "rejected plan request");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(PlanResponse {
        requested_length: plan.cut_length(),
        waste_percent: plan.waste_percent(),
        report: render_report(&req.pieces, &plan, req.waste),
        plan,
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/plan", post(plan))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
