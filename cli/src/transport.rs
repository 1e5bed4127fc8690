//! Blocking HTTP execution for core requests.

use workout_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

/// Runs `HttpRequest`s against the network with a shared ureq agent.
///
/// Non-2xx statuses are returned as responses, not errors, so the core
/// interprets them. Only a failed round trip becomes `ApiError::Transport`.
#[derive(Debug, Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), url = %req.url, "sending request");

        let result = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.url);
                for (key, value) in &req.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&req.url);
                for (key, value) in &req.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.send(req.body.unwrap_or_default().as_bytes())
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
