//! reqwest-backed gateway for Ollama-compatible nodes

use super::protocol::{GENERATE_PATH, GenerateRequest, GenerateResponse, TAGS_PATH};
use async_trait::async_trait;
use council_application::ports::health_probe::{HealthProbe, NodeStatus};
use council_application::ports::inference_gateway::{GatewayError, InferenceGateway};
use council_domain::Endpoint;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Shared HTTP gateway for every member and the chairman
///
/// Cheap to share behind an `Arc`; the inner client pools connections
/// per host across concurrent calls.
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: Client,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl OllamaGateway {
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            request_timeout,
            probe_timeout,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.request_timeout)
        } else if e.is_connect() {
            GatewayError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            GatewayError::InvalidResponse(e.to_string())
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl InferenceGateway for OllamaGateway {
    async fn generate(&self, endpoint: &Endpoint, prompt: &str) -> Result<String, GatewayError> {
        let url = endpoint.api_url(GENERATE_PATH);
        trace!(url = %url, model = %endpoint.model, "POST generate");

        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(&GenerateRequest::new(endpoint.model.as_str(), prompt))
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {} from {}: {}",
                status,
                endpoint.url,
                body.trim()
            )));
        }

        let reply: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.request_timeout)
            } else {
                GatewayError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(reply.into_text())
    }
}

#[async_trait]
impl HealthProbe for OllamaGateway {
    async fn probe(&self, endpoint: &Endpoint) -> NodeStatus {
        let started = Instant::now();
        let result = self
            .client
            .get(endpoint.api_url(TAGS_PATH))
            .timeout(self.probe_timeout)
            .send()
            .await;

        let status = match result {
            Ok(response) if response.status().is_success() => NodeStatus::Online {
                latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            },
            Ok(response) => NodeStatus::Offline {
                reason: format!("HTTP {}", response.status()),
            },
            Err(e) if e.is_timeout() => NodeStatus::Offline {
                reason: "probe timed out".to_string(),
            },
            Err(e) => NodeStatus::Offline {
                reason: e.to_string(),
            },
        };
        debug!(url = %endpoint.url, online = status.is_online(), "Probed node");
        status
    }
}
