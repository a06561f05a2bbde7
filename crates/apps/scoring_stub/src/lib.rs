//! Local stand-in for the demand scoring service.
//!
//! Implements the `/predict/{category}` contract with the same validation
//! the hosts rely on, returning a deterministic score so the client and the
//! hosts can be exercised without the real model.

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use catalog::Category;
use scoring::ScoreResponse;
use serde_json::{json, Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const INVALID_CATEGORY_MESSAGE: &str =
    "Invalid service type. Use \"education\" or \"healthcare\".";

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/predict/:category", post(predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn predict(Path(category): Path<String>, body: Bytes) -> Response {
    match score_body(&category, &body) {
        Ok(resp) => {
            debug!(%category, score = resp.demand_score, "scored request");
            (StatusCode::OK, Json(resp)).into_response()
        }
        Err(message) => {
            warn!(%category, "rejected score request: {message}");
            api_error(StatusCode::BAD_REQUEST, &message)
        }
    }
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Validates a `/predict/{category}` body and scores it.
///
/// The error string is what the service reports under `"error"`.
pub fn score_body(category: &str, body: &[u8]) -> Result<ScoreResponse, String> {
    let category: Category = category
        .parse()
        .map_err(|_| INVALID_CATEGORY_MESSAGE.to_string())?;
    let value: Value =
        serde_json::from_slice(body).map_err(|err| format!("Invalid JSON body: {err}"))?;
    let Value::Object(fields) = value else {
        return Err("Request body must be a JSON object".to_string());
    };

    let lat = number(&fields, "Latitude", 90.0)?;
    let lng = number(&fields, "Longitude", 180.0)?;

    let mut selections = Vec::new();
    for spec in category.fields() {
        let value = fields
            .get(spec.name)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if value.is_empty() {
            if spec.mandatory {
                return Err(format!("Missing required field: {}", spec.name));
            }
            continue;
        }
        if !spec.options.contains(&value) {
            return Err(format!("Unknown value for {}: {value}", spec.name));
        }
        selections.push(value);
    }

    let score = demand_score(lat, lng, &selections);
    Ok(ScoreResponse {
        demand_score: score,
        recommendations: recommendation(category, score),
    })
}

fn number(fields: &Map<String, Value>, key: &str, limit: f64) -> Result<f64, String> {
    let value = fields
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Missing or invalid {key}"))?;
    if value.abs() > limit {
        return Err(format!("{key} out of range: {value}"));
    }
    Ok(value)
}

/// Deterministic score in `[0, 10]` with one decimal.
pub fn demand_score(lat: f64, lng: f64, selections: &[&str]) -> f64 {
    let mut seed = (lat * 12.9898 + lng * 78.233).sin() * 43_758.545_3;
    for selection in selections {
        seed += selection.bytes().map(f64::from).sum::<f64>() * 0.618_034;
    }
    let unit = seed.fract().abs();
    (unit * 100.0).round() / 10.0
}

pub fn recommendation(category: Category, score: f64) -> String {
    let facility = match category {
        Category::Education => "school",
        Category::Healthcare => "health facility",
    };
    if score >= 7.0 {
        format!("High demand: prioritise a new {facility} at this location.")
    } else if score >= 4.0 {
        format!("Moderate demand: consider expanding {facility} capacity nearby.")
    } else {
        format!("Low demand: existing {facility} coverage appears sufficient.")
    }
}
