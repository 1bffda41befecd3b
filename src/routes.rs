use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::generation::TextGenerator;
use crate::workflows::drafting::{
    ApplicationDraft, Document, DraftingService, GrantContext, Intent, OrganizationProfile,
    PriorApplication, QualityResult, Question, QuestionCategory, SectionSpec,
};

/// Shared request-scoped state for the liveness and metrics endpoints.
#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    pub(crate) question: Question,
    #[serde(default)]
    pub(crate) grant: GrantContext,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) category: QuestionCategory,
    pub(crate) intent: Intent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateRequest {
    pub(crate) content: String,
    pub(crate) category: QuestionCategory,
    #[serde(default)]
    pub(crate) word_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DraftRequest {
    pub(crate) sections: Vec<SectionSpec>,
    #[serde(default)]
    pub(crate) profile: OrganizationProfile,
    #[serde(default)]
    pub(crate) documents: Vec<Document>,
    #[serde(default)]
    pub(crate) prior_applications: Vec<PriorApplication>,
    #[serde(default)]
    pub(crate) grant: GrantContext,
}

pub fn drafting_router<G>(service: Arc<DraftingService<G>>) -> Router
where
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/drafting/classify", post(classify_endpoint::<G>))
        .route("/api/v1/drafting/validate", post(validate_endpoint::<G>))
        .route("/api/v1/drafting/draft", post(draft_endpoint::<G>))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn classify_endpoint<G>(
    Extension(service): Extension<Arc<DraftingService<G>>>,
    Json(payload): Json<ClassifyRequest>,
) -> Json<ClassifyResponse>
where
    G: TextGenerator + 'static,
{
    let category = service.classify(&payload.question, &payload.grant).await;
    let intent = service
        .resolve_intent(category, &payload.question, &payload.grant)
        .await;
    Json(ClassifyResponse { category, intent })
}

pub(crate) async fn validate_endpoint<G>(
    Extension(service): Extension<Arc<DraftingService<G>>>,
    Json(payload): Json<ValidateRequest>,
) -> Json<QualityResult>
where
    G: TextGenerator + 'static,
{
    Json(service.validate(&payload.content, payload.category, payload.word_limit))
}

pub(crate) async fn draft_endpoint<G>(
    Extension(service): Extension<Arc<DraftingService<G>>>,
    Json(payload): Json<DraftRequest>,
) -> Json<ApplicationDraft>
where
    G: TextGenerator + 'static,
{
    let draft = service
        .draft_application(
            &payload.sections,
            &payload.profile,
            &payload.documents,
            &payload.prior_applications,
            &payload.grant,
        )
        .await;
    Json(draft)
}
