use serde_json::Value;

/// Response body, decoded according to the declared content type
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Display form: pretty-printed JSON or the raw text
    pub fn pretty(&self) -> String {
        match self {
            Body::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Body::Text(text) => text.clone(),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Body::Json(_))
    }
}

/// Everything observed about one completed response
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl ResponseEnvelope {
    /// Non-2xx statuses are still data, but the UI flags them
    pub fn is_http_error(&self) -> bool {
        !(200..300).contains(&self.status_code)
    }
}

/// Result slot for the current probe
///
/// Replaced wholesale on every send; past Pending, exactly one of
/// Success/Failure holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Idle,
    Pending,
    Success(ResponseEnvelope),
    Failure(String),
}

impl Outcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Success(_) | Outcome::Failure(_))
    }
}

/// One entry in the session probe log - in-memory only, gone on exit
#[derive(Clone, Debug)]
pub struct ProbeRecord {
    pub endpoint: String,
    pub url: String,
    /// None when the probe failed at the transport level
    pub status: Option<u16>,
    pub time_ms: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_pretty_formats_json() {
        let body = Body::Json(serde_json::json!({"code": 200}));
        assert_eq!(body.pretty(), "{\n  \"code\": 200\n}");
    }

    #[test]
    fn test_body_pretty_passes_text_through() {
        let body = Body::Text("plain".to_string());
        assert_eq!(body.pretty(), "plain");
    }

    #[test]
    fn test_outcome_starts_idle_and_resolves_exclusively() {
        assert_eq!(Outcome::default(), Outcome::Idle);
        assert!(!Outcome::Pending.is_resolved());
        let ok = Outcome::Success(ResponseEnvelope {
            status_code: 200,
            status_text: "OK".to_string(),
            headers: Vec::new(),
            body: Body::Text(String::new()),
        });
        let failed = Outcome::Failure("boom".to_string());
        assert!(ok.is_resolved() && !ok.is_pending());
        assert!(failed.is_resolved() && !failed.is_pending());
    }

    #[test]
    fn test_http_error_classification() {
        let mut envelope = ResponseEnvelope {
            status_code: 404,
            status_text: "Not Found".to_string(),
            headers: Vec::new(),
            body: Body::Text(String::new()),
        };
        assert!(envelope.is_http_error());
        envelope.status_code = 204;
        assert!(!envelope.is_http_error());
    }
}
