use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::{DateTime, SecondsFormat, Utc};
use herald_types::{GuardrailResult, IncidentId, PipelineError, PublishError, Tone, Verdict};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

/// Build the API router. Kept free of listener concerns so tests can drive
/// it with `tower::ServiceExt::oneshot`.
pub fn build_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/api/draft", post(draft))
        .route("/api/draft/redact_local", post(redact_local))
        .route("/api/draft/validation", get(validation))
        .route("/api/publish", post(publish))
        .route("/api/status", get(status))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct DraftRequest {
    // Defaulted so a missing field reports 400 like an empty one, instead
    // of surfacing as a deserialization rejection.
    #[serde(default)]
    incident_id: String,
    tone: Option<String>,
}

#[derive(Debug, Serialize)]
struct DraftResponse {
    draft: String,
    leaks: Vec<String>,
    latency_ms: u64,
    tone: &'static str,
}

#[derive(Debug, Deserialize)]
struct RedactRequest {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct RedactResponse {
    redacted_text: String,
    leaks: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PublishRequest {
    draft: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    seq: u64,
    verdict: Verdict,
    leaks: Vec<String>,
    redacted_text: String,
}

#[derive(Debug, Serialize)]
struct StatusEntry {
    ts: String,
    draft: String,
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn blocked_body(message: &str, result_leaks: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message, "leaks": result_leaks })),
    )
        .into_response()
}

fn rfc3339_z(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

async fn draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Response {
    let Ok(incident) = IncidentId::new(&request.incident_id) else {
        return error_body(StatusCode::BAD_REQUEST, "incident_id is required");
    };
    // Unknown tone strings fall back to the default rather than erroring.
    let tone = request
        .tone
        .as_deref()
        .and_then(Tone::parse)
        .unwrap_or_default();

    match state.pipeline.generate(&incident, tone).await {
        Ok(result) => Json(DraftResponse {
            draft: result.guardrail.rendered_text().to_string(),
            leaks: result.guardrail.leak_lines(),
            latency_ms: result.latency_ms,
            tone: tone.as_str(),
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(incident = %incident, error = %err, "draft generation failed");
            let status = match &err {
                PipelineError::SourcingUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                PipelineError::CompositionTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                PipelineError::CompositionFailed(_) => StatusCode::BAD_GATEWAY,
            };
            error_body(status, &err.to_string())
        }
    }
}

async fn redact_local(
    State(state): State<AppState>,
    Json(request): Json<RedactRequest>,
) -> Response {
    let Some(text) = request.text else {
        return error_body(StatusCode::BAD_REQUEST, "text is required");
    };
    // Each call is an edit event: the debounced validator keeps the
    // last-validated state served by `/api/draft/validation` current, while
    // the response carries an immediate direct evaluation.
    state.validator.submit(text.clone());
    let result: GuardrailResult = state.publisher.validate(&text);
    Json(RedactResponse {
        redacted_text: result.rendered_text().to_string(),
        leaks: result.leak_lines(),
    })
    .into_response()
}

async fn publish(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> Response {
    let Some(draft_text) = request.draft else {
        return error_body(StatusCode::BAD_REQUEST, "draft is required");
    };
    match state.publisher.publish(&draft_text).await {
        Ok(update) => Json(json!({ "ok": true, "ts": rfc3339_z(update.ts) })).into_response(),
        Err(PublishError::Blocked { findings }) => {
            let leaks: Vec<String> = findings.iter().map(ToString::to_string).collect();
            tracing::warn!(leak_count = leaks.len(), "publish blocked");
            blocked_body("Cannot publish: sensitive information detected", leaks)
        }
        Err(PublishError::Store(detail)) => {
            tracing::error!(error = %detail, "status log append failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &detail)
        }
    }
}

/// Latest debounced validation, `null` until a submitted edit survives the
/// quiet window. The sequence number only ever increases.
async fn validation(State(state): State<AppState>) -> Json<Option<ValidationResponse>> {
    Json(state.validator.latest().map(|(seq, result)| ValidationResponse {
        seq,
        verdict: result.verdict(),
        leaks: result.leak_lines(),
        redacted_text: result.rendered_text().to_string(),
    }))
}

async fn status(State(state): State<AppState>) -> Response {
    match state.publisher.updates().await {
        Ok(updates) => {
            let entries: Vec<StatusEntry> = updates
                .into_iter()
                .map(|update| StatusEntry {
                    ts: rfc3339_z(update.ts),
                    draft: update.text,
                })
                .collect();
            Json(entries).into_response()
        }
        Err(detail) => {
            tracing::error!(error = %detail, "status log read failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &detail.to_string())
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
