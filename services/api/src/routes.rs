use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use scrape_crm::error::AppError;
use scrape_crm::workflows::dispatch::{
    build_lot_request, build_party_request, build_webhook_payload, LotScrapeRequest,
    PartyScrapeRequest, VariationSelection,
};
use scrape_crm::workflows::ingest::{ScrapeItemSeed, SpreadsheetImporter};
use scrape_crm::workflows::variations;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct VariationsRequest {
    #[serde(default)]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariationsResponse {
    pub(crate) name: Option<String>,
    pub(crate) count: usize,
    pub(crate) variations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IngestPreviewRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct IngestPreviewResponse {
    pub(crate) count: usize,
    pub(crate) items: Vec<ScrapeItemSeed>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebhookPreviewRequest {
    pub(crate) item: ScrapeItemSeed,
    #[serde(default)]
    pub(crate) selected_variations: VariationSelection,
}

#[derive(Debug, Serialize)]
pub(crate) struct WebhookPreviewResponse {
    pub(crate) webhook_url: String,
    pub(crate) count: usize,
    pub(crate) payload: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LotPreviewRequest {
    pub(crate) item: ScrapeItemSeed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartyPreviewRequest {
    pub(crate) item: ScrapeItemSeed,
    #[serde(default)]
    pub(crate) selected_variations: VariationSelection,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/variations", post(variations_endpoint))
        .route("/api/v1/ingest/preview", post(ingest_preview_endpoint))
        .route(
            "/api/v1/dispatch/webhook-preview",
            post(webhook_preview_endpoint),
        )
        .route("/api/v1/dispatch/lot-preview", post(lot_preview_endpoint))
        .route(
            "/api/v1/dispatch/party-preview",
            post(party_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
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

pub(crate) async fn variations_endpoint(
    Json(payload): Json<VariationsRequest>,
) -> Json<VariationsResponse> {
    let generated = payload
        .name
        .as_deref()
        .map(variations::generate)
        .unwrap_or_default();

    Json(VariationsResponse {
        name: payload.name,
        count: generated.len(),
        variations: generated,
    })
}

pub(crate) async fn ingest_preview_endpoint(
    Json(payload): Json<IngestPreviewRequest>,
) -> Result<Json<IngestPreviewResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let items = SpreadsheetImporter::from_reader(reader)?;

    Ok(Json(IngestPreviewResponse {
        count: items.len(),
        items,
    }))
}

pub(crate) async fn webhook_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WebhookPreviewRequest>,
) -> Json<WebhookPreviewResponse> {
    let entries = build_webhook_payload(&payload.item, &payload.selected_variations);

    Json(WebhookPreviewResponse {
        webhook_url: state.scraper.webhook_url.clone(),
        count: entries.len(),
        payload: entries,
    })
}

pub(crate) async fn lot_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LotPreviewRequest>,
) -> Json<LotScrapeRequest> {
    let request = build_lot_request(
        &payload.item,
        &state.counties,
        &state.scraper.default_search_url,
    );
    Json(request)
}

pub(crate) async fn party_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PartyPreviewRequest>,
) -> Result<Json<PartyScrapeRequest>, AppError> {
    let request = build_party_request(
        &payload.item,
        &payload.selected_variations,
        &state.counties,
        &state.scraper.default_search_url,
    )?;
    Ok(Json(request))
}
