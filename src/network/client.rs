//! HTTP client wrapper - executes probes and decodes responses

use std::time::Instant;

use crate::messages::NetworkResponse;
use crate::models::{Body, ResponseEnvelope};

/// Create the shared HTTP client
///
/// No client-side timeout is configured: a probe is bounded only by the
/// transport's own defaults, and the UI stays responsive while one is
/// outstanding.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("minuteman-tui/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Execute one GET probe and resolve it to a single response message
///
/// Any HTTP status is a transport-level success; the endpoint's own error
/// envelope is content worth displaying. Only connection-level failures and
/// undecodable declared-JSON bodies become errors.
pub async fn execute_probe(client: &reqwest::Client, url: String, id: u64) -> NetworkResponse {
    let start = Instant::now();

    let result = client.get(&url).send().await;

    match result {
        Ok(resp) => {
            let status_code = resp.status().as_u16();
            let status_text = resp
                .status()
                .canonical_reason()
                .unwrap_or("")
                .to_string();
            let headers: Vec<(String, String)> = resp
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or("<binary>").to_string(),
                    )
                })
                .collect();
            let declared_json = headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
                .map(|(_, value)| value.contains("application/json"))
                .unwrap_or(false);

            match resp.text().await {
                Ok(text) => {
                    let elapsed = start.elapsed().as_millis() as u64;
                    let body = if declared_json {
                        match serde_json::from_str(&text) {
                            Ok(value) => Body::Json(value),
                            Err(e) => {
                                return NetworkResponse::Error {
                                    id,
                                    message: format!("Invalid JSON in response body: {}", e),
                                    time_ms: elapsed,
                                };
                            }
                        }
                    } else {
                        Body::Text(text)
                    };

                    NetworkResponse::Success {
                        id,
                        envelope: ResponseEnvelope {
                            status_code,
                            status_text,
                            headers,
                            body,
                        },
                        time_ms: elapsed,
                    }
                }
                Err(e) => NetworkResponse::Error {
                    id,
                    message: format!("Error reading body: {}", e),
                    time_ms: start.elapsed().as_millis() as u64,
                },
            }
        }
        Err(e) => {
            let msg = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            NetworkResponse::Error {
                id,
                message: msg,
                time_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_200_json_resolves_to_success_with_body_intact() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({
            "code": 200,
            "data": {"hash": "5d41402abc4b2a76b9719d911017c592"}
        });

        Mock::given(method("GET"))
            .and(path("/v2/hash"))
            .and(query_param("text", "hello"))
            .and(query_param("algorithm", "md5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = create_client();
        let url = format!("{}/v2/hash?text=hello&algorithm=md5", server.uri());
        match execute_probe(&client, url, 1).await {
            NetworkResponse::Success { id, envelope, .. } => {
                assert_eq!(id, 1);
                assert_eq!(envelope.status_code, 200);
                assert_eq!(envelope.body, Body::Json(payload));
            }
            NetworkResponse::Error { message, .. } => panic!("unexpected error: {}", message),
        }
    }

    #[tokio::test]
    async fn test_404_with_json_content_type_is_still_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_raw(
                r#"{"code":404,"message":"not found"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = create_client();
        match execute_probe(&client, format!("{}/v2/missing", server.uri()), 2).await {
            NetworkResponse::Success { envelope, .. } => {
                assert_eq!(envelope.status_code, 404);
                assert!(envelope.is_http_error());
                assert!(envelope.body.is_json());
            }
            NetworkResponse::Error { message, .. } => panic!("unexpected error: {}", message),
        }
    }

    #[tokio::test]
    async fn test_malformed_declared_json_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/broken"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
            )
            .mount(&server)
            .await;

        let client = create_client();
        match execute_probe(&client, format!("{}/v2/broken", server.uri()), 3).await {
            NetworkResponse::Error { message, .. } => {
                assert!(message.contains("Invalid JSON"));
            }
            NetworkResponse::Success { .. } => panic!("malformed JSON must not succeed"),
        }
    }

    #[tokio::test]
    async fn test_plain_text_body_is_kept_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/kfc"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("V me 50", "text/plain"))
            .mount(&server)
            .await;

        let client = create_client();
        match execute_probe(&client, format!("{}/v2/kfc", server.uri()), 4).await {
            NetworkResponse::Success { envelope, .. } => {
                assert_eq!(envelope.body, Body::Text("V me 50".to_string()));
            }
            NetworkResponse::Error { message, .. } => panic!("unexpected error: {}", message),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure_with_message() {
        let client = create_client();
        // Reserved port with nothing listening
        match execute_probe(&client, "http://127.0.0.1:9".to_string(), 5).await {
            NetworkResponse::Error { message, .. } => assert!(!message.is_empty()),
            NetworkResponse::Success { .. } => panic!("expected a transport failure"),
        }
    }
}
