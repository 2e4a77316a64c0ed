use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body the relay sends upstream when creating a prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub version: String,
    pub input: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
