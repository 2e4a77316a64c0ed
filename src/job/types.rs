use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prompt plus decoding parameters sent to the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Checks everything that can be rejected without talking to the service.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::validation("empty prompt"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::validation(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(Error::validation(format!(
                "top_p must be within [0, 1], got {}",
                self.top_p
            )));
        }
        if self.max_tokens == 0 {
            return Err(Error::validation("max_tokens must be positive"));
        }
        Ok(())
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            temperature: 0.7,
            max_tokens: 500,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Starting,
    Processing,
    Succeeded,
    Failed,
    /// Anything the service reports that we don't model; treated as still running.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Read-only projection of a remote job, refreshed on every poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Job {
    pub fn new(id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            status,
            output: None,
            error: None,
        }
    }

    pub fn succeeded(id: impl Into<String>, output: Value) -> Self {
        Self {
            output: Some(output),
            ..Self::new(id, JobStatus::Succeeded)
        }
    }

    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(Value::String(error.into())),
            ..Self::new(id, JobStatus::Failed)
        }
    }

    /// Human-readable failure detail, if the service supplied one.
    pub fn error_detail(&self) -> String {
        match &self.error {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "no error detail reported".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Output payload of a succeeded job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobOutput(pub Value);

impl JobOutput {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Flattens the payload into text. Language models on the service stream
    /// their output as an array of string fragments.
    pub fn text(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            Value::Array(items) if items.iter().all(Value::is_string) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .concat(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn test_blank_prompt_rejected(#[case] prompt: &str) {
        let err = GenerationRequest::new(prompt).validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("empty prompt"));
    }

    #[rstest]
    #[case(GenerationRequest::new("hi").with_temperature(1.5), "temperature")]
    #[case(GenerationRequest::new("hi").with_temperature(-0.1), "temperature")]
    #[case(GenerationRequest::new("hi").with_top_p(2.0), "top_p")]
    #[case(GenerationRequest::new("hi").with_max_tokens(0), "max_tokens")]
    fn test_out_of_range_parameters(#[case] request: GenerationRequest, #[case] field: &str) {
        let err = request.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains(field));
    }

    #[test]
    fn test_boundaries_accepted() {
        let request = GenerationRequest::new("describe a sunset")
            .with_temperature(1.0)
            .with_top_p(0.0)
            .with_max_tokens(1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_status_parsing() {
        let job: Job = serde_json::from_value(json!({
            "id": "abc123",
            "status": "processing",
            "version": "ignored",
            "urls": {"get": "https://example.invalid"}
        }))
        .unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.output.is_none());

        let job: Job = serde_json::from_value(json!({"id": "x", "status": "canceled"})).unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
        assert!(!job.status.is_terminal());

        let job: Job = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(job.status, JobStatus::Starting);
    }

    #[test]
    fn test_output_text() {
        assert_eq!(JobOutput(json!("A vivid sunset...")).text(), "A vivid sunset...");
        assert_eq!(JobOutput(json!(["A ", "vivid", " sunset"])).text(), "A vivid sunset");
        assert_eq!(JobOutput(json!(null)).text(), "");
        assert_eq!(JobOutput(json!({"text": "x"})).text(), r#"{"text":"x"}"#);
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(Job::failed("x", "CUDA out of memory").error_detail(), "CUDA out of memory");
        assert_eq!(
            Job::new("x", JobStatus::Failed).error_detail(),
            "no error detail reported"
        );
    }
}
