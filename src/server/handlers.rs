use super::types::{ErrorResponse, HealthResponse, PredictionRequest};
use crate::{Error, Result, config::UpstreamConfig};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub upstream: Arc<UpstreamConfig>,
}

impl AppState {
    /// Fails when no upstream token is configured; the relay is useless without one.
    pub fn new(upstream: UpstreamConfig) -> Result<Self> {
        upstream.require_token()?;
        Ok(Self {
            client: reqwest::Client::new(),
            upstream: Arc::new(upstream),
        })
    }

    fn predictions_url(&self) -> String {
        format!("{}/predictions", self.upstream.base_url.trim_end_matches('/'))
    }

    /// Prediction ids are alphanumeric; anything else is refused before the
    /// token is attached.
    fn prediction_url(&self, id: &str) -> Result<reqwest::Url> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::validation(format!("invalid prediction id: {:?}", id)));
        }

        let mut url = reqwest::Url::parse(&self.predictions_url())
            .map_err(|e| Error::config(format!("invalid upstream.base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::config("upstream.base_url cannot carry a path"))?
            .push(id);
        Ok(url)
    }

    fn authorization(&self) -> Result<String> {
        Ok(format!("Token {}", self.upstream.require_token()?))
    }
}

type HandlerResult = std::result::Result<Json<Value>, (StatusCode, Json<ErrorResponse>)>;

fn error_response(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = if e.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Message carried by an upstream error body (`detail`, or `error`), if any.
fn upstream_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    ["detail", "error"]
        .iter()
        .find_map(|key| json.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Relays a successful upstream JSON body verbatim; anything else becomes an error.
async fn relay(response: reqwest::Response, context: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!("Upstream body for failed request: {}", body);
        return Err(Error::upstream(match upstream_detail(&body) {
            Some(detail) => format!("{}: upstream returned {}: {}", context, status, detail),
            None => format!("{}: upstream returned {}", context, status),
        }));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| Error::upstream(format!("{}: invalid upstream response: {}", context, e)))
}

async fn forward_create(state: &AppState, input: Value) -> Result<Value> {
    let body = PredictionRequest {
        version: state.upstream.model_version.clone(),
        input,
    };

    let response = state
        .client
        .post(state.predictions_url())
        .header("Authorization", state.authorization()?)
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::upstream(format!("Failed to reach prediction service: {}", e)))?;

    relay(response, "Failed to create prediction").await
}

async fn forward_status(state: &AppState, id: &str) -> Result<Value> {
    let response = state
        .client
        .get(state.prediction_url(id)?)
        .header("Authorization", state.authorization()?)
        .send()
        .await
        .map_err(|e| Error::upstream(format!("Failed to reach prediction service: {}", e)))?;

    relay(response, "Failed to fetch prediction status").await
}

pub async fn create_prediction(
    State(state): State<AppState>,
    Json(input): Json<Value>,
) -> HandlerResult {
    info!("Relaying prediction request");

    match forward_create(&state, input).await {
        Ok(prediction) => {
            let id = prediction
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            debug!("Created prediction {}", id);
            Ok(Json(prediction))
        }
        Err(e) => {
            error!("Failed to relay prediction request: {}", e);
            Err(error_response(e))
        }
    }
}

pub async fn get_prediction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    debug!("Relaying status request for prediction {}", id);

    forward_status(&state, &id).await.map(Json).map_err(|e| {
        error!("Failed to relay status of prediction {}: {}", id, e);
        error_response(e)
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
