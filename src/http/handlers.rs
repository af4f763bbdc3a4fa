//! HTTP handlers for the REST API.
//!
//! Each handler validates its input, talks to the shared-round storage and
//! answers with the fixed `{error}` bodies clients rely on.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{error, info, warn};

use super::dto::{
    parse_share_payload, HealthResponse, OEmbedQuery, OEmbedResponse, ShareRoundQuery,
    ShareRoundResponse,
};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Round id inside a public shared URL. Case-sensitive.
static SHARED_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/shared/([^/?]+)").expect("shared URL pattern is valid")
});

const OEMBED_CACHE_CONTROL: &str = "public, max-age=3600";

/// Extract the round id from a shared URL.
pub fn extract_round_id(url: &str) -> Option<&str> {
    SHARED_URL_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match state.storage.get().health_check().await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        storage,
    }))
}

// =============================================================================
// Shared rounds
// =============================================================================

/// OPTIONS /api/share-round, /api/oembed
///
/// Preflight answer. The CORS headers come from the router.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// POST /api/share-round
///
/// Store a round under its own id and return its public URL.
pub async fn share_round(
    State(state): State<AppState>,
    body: Bytes,
) -> HandlerResult<ShareRoundResponse> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Unreadable share request body");
        AppError::Internal("Failed to share round".to_string())
    })?;

    let round = parse_share_payload(body).map_err(|e| {
        warn!(error = %e, "Rejected share request");
        AppError::BadRequest("Invalid round data".to_string())
    })?;

    if let Err(e) = state.storage.get().store(&round).await {
        if e.is_validation() {
            warn!(round_id = %round.id, error = %e, "Rejected shared round id");
            return Err(AppError::BadRequest("Invalid round data".to_string()));
        }
        error!(round_id = %round.id, error = %e, "Failed to store shared round");
        return Err(AppError::Internal("Failed to share round".to_string()));
    }

    info!(round_id = %round.id, team = %round.team_name, "Round shared");

    Ok(Json(ShareRoundResponse {
        success: true,
        shared_url: state.config.shared_url(&round.id),
        shareable_id: round.id,
    }))
}

/// GET /api/share-round?id=<id>
pub async fn get_shared_round(
    State(state): State<AppState>,
    query: Result<Query<ShareRoundQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "Unreadable share query");
        AppError::BadRequest("Invalid round ID".to_string())
    })?;
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing round ID".to_string()))?;

    match state.storage.get().retrieve(&id).await {
        Ok(Some(round)) => Ok(Json(round)),
        Ok(None) => Err(AppError::NotFound("Shared round not found".to_string())),
        Err(e) if e.is_validation() => {
            warn!(round_id = %id, error = %e, "Rejected shared round id");
            Err(AppError::BadRequest("Invalid round ID".to_string()))
        }
        Err(e) => {
            error!(round_id = %id, error = %e, "Failed to retrieve shared round");
            Err(AppError::Internal(
                "Failed to retrieve shared round".to_string(),
            ))
        }
    }
}

/// GET /api/oembed?url=<shared url>&format=json
pub async fn oembed(
    State(state): State<AppState>,
    query: Result<Query<OEmbedQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| {
        warn!(error = %e, "Unreadable oEmbed query");
        AppError::BadRequest("Invalid shared URL format".to_string())
    })?;
    let url = query
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing url parameter".to_string()))?;

    if query.format.as_deref().unwrap_or("json") != "json" {
        return Err(AppError::NotImplemented(
            "Only JSON format is supported".to_string(),
        ));
    }

    let round_id = extract_round_id(&url)
        .ok_or_else(|| AppError::BadRequest("Invalid shared URL format".to_string()))?;

    let round = match state.fetcher.fetch(round_id).await {
        Ok(Some(round)) => round,
        Ok(None) => return Err(AppError::NotFound("Round not found".to_string())),
        Err(e) => {
            error!(round_id, error = %e, "oEmbed lookup failed");
            return Err(AppError::Internal("Internal server error".to_string()));
        }
    };

    let document = OEmbedResponse::for_round(&round, round_id, &state.config.base_url);
    Ok(([(header::CACHE_CONTROL, OEMBED_CACHE_CONTROL)], Json(document)))
}
