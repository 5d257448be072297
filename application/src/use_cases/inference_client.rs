//! Inference client
//!
//! Issues one prompt to one endpoint, measures latency, and normalizes every
//! outcome into an [`InferenceResult`]. This is the only place where
//! backend errors exist as errors; above it they are data.

use crate::ports::inference_gateway::{GatewayError, InferenceGateway};
use council_domain::core::string::{single_line, truncate};
use council_domain::{Endpoint, FailureKind, InferenceOutcome, InferenceResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Failure-tolerant wrapper around an [`InferenceGateway`]
///
/// Cheap to clone; clones share the gateway (and its connection pool).
pub struct InferenceClient<G: InferenceGateway + ?Sized> {
    gateway: Arc<G>,
    timeout: Duration,
}

impl<G: InferenceGateway + ?Sized> Clone for InferenceClient<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            timeout: self.timeout,
        }
    }
}

impl<G: InferenceGateway + ?Sized> InferenceClient<G> {
    pub fn new(gateway: Arc<G>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `prompt` to `endpoint`, never failing.
    ///
    /// - reply with text: success, measured latency, text trimmed
    /// - empty/whitespace reply: `Empty` failure, measured latency
    /// - per-call bound elapsed: `Timeout` failure, latency 0
    /// - any other gateway error: `Offline` failure, latency 0
    pub async fn invoke(&self, endpoint: &Endpoint, prompt: &str, label: &str) -> InferenceResult {
        debug!(
            label,
            model = %endpoint.model,
            url = %endpoint.url,
            prompt_bytes = prompt.len(),
            "Sending inference request"
        );

        let start = Instant::now();
        let reply = tokio::time::timeout(self.timeout, self.gateway.generate(endpoint, prompt)).await;
        let elapsed = start.elapsed();
        let model = endpoint.model.clone();

        let result = match reply {
            Ok(Ok(text)) if text.trim().is_empty() => {
                InferenceResult::failure(label, model, FailureKind::Empty, "empty response", elapsed)
            }
            Ok(Ok(text)) => InferenceResult::success(label, model, text.trim(), elapsed),
            Ok(Err(GatewayError::Timeout(limit))) => InferenceResult::failure(
                label,
                model,
                FailureKind::Timeout,
                format!("request timed out after {}s", limit.as_secs()),
                Duration::ZERO,
            ),
            Err(_) => InferenceResult::failure(
                label,
                model,
                FailureKind::Timeout,
                format!("request timed out after {}s", self.timeout.as_secs()),
                Duration::ZERO,
            ),
            Ok(Err(e)) => InferenceResult::failure(
                label,
                model,
                FailureKind::Offline,
                e.to_string(),
                Duration::ZERO,
            ),
        };

        Self::trace_outcome(endpoint, &result, elapsed);
        result
    }

    fn trace_outcome(endpoint: &Endpoint, result: &InferenceResult, elapsed: Duration) {
        let elapsed_secs = elapsed.as_secs_f64();
        match &result.outcome {
            InferenceOutcome::Success { text } => {
                info!(
                    label = %result.label,
                    model = %endpoint.model,
                    url = %endpoint.url,
                    latency_secs = elapsed_secs,
                    bytes = text.len(),
                    outcome = "success",
                    "{} completed in {:.2}s",
                    result.label,
                    elapsed_secs
                );
                debug!(label = %result.label, preview = %truncate(&single_line(text), 120), "Reply");
            }
            InferenceOutcome::Failure {
                kind: FailureKind::Empty,
                ..
            } => warn!(
                label = %result.label,
                model = %endpoint.model,
                url = %endpoint.url,
                latency_secs = elapsed_secs,
                outcome = "empty",
                "{} returned an empty response",
                result.label
            ),
            InferenceOutcome::Failure { kind, detail } => warn!(
                label = %result.label,
                model = %endpoint.model,
                url = %endpoint.url,
                latency_secs = elapsed_secs,
                outcome = ?kind,
                error = %detail,
                "{} FAILED",
                result.label
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Behavior, FakeGateway};
    use council_domain::Model;

    const URL: &str = "http://node:11434";

    fn endpoint() -> Endpoint {
        Endpoint::new(URL, "gemma2:2b")
    }

    fn client(gateway: FakeGateway) -> InferenceClient<FakeGateway> {
        InferenceClient::new(Arc::new(gateway), Duration::from_secs(180))
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_is_trimmed_and_timed() {
        let gateway = FakeGateway::new().with(URL, Behavior::Delay(Duration::from_secs(2)));
        let result = client(gateway).invoke(&endpoint(), "What is 6x7?", "Council_1").await;

        assert!(result.is_success());
        assert_eq!(result.response_text(), "http://node:11434 says 42");
        assert_eq!(result.label, "Council_1");
        assert_eq!(result.model, Model::new("gemma2:2b"));
        assert_eq!(result.latency_secs(), 2.0);
    }

    #[tokio::test]
    async fn test_refused_connection_is_offline_with_zero_latency() {
        let gateway = FakeGateway::new().with(URL, Behavior::Refuse);
        let result = client(gateway).invoke(&endpoint(), "hi", "Council_1").await;

        assert!(result.is_failed());
        assert_eq!(result.failure_kind(), Some(FailureKind::Offline));
        assert_eq!(result.latency, Duration::ZERO);
        assert!(result.response_text().starts_with("Offline: "));
        assert!(result.response_text().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_whitespace_reply_is_empty_failure() {
        let gateway = FakeGateway::new().with(URL, Behavior::Empty);
        let result = client(gateway).invoke(&endpoint(), "hi", "Council_1").await;

        assert_eq!(result.failure_kind(), Some(FailureKind::Empty));
        assert_eq!(result.response_text(), InferenceResult::EMPTY_MARKER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_backend_times_out() {
        let gateway = FakeGateway::new().with(URL, Behavior::Hang);
        let client = InferenceClient::new(Arc::new(gateway), Duration::from_secs(30));

        let started = Instant::now();
        let result = client.invoke(&endpoint(), "hi", "Council_2").await;

        assert_eq!(result.failure_kind(), Some(FailureKind::Timeout));
        assert_eq!(result.latency, Duration::ZERO);
        assert_eq!(result.response_text(), "Offline: request timed out after 30s");
        assert!(started.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_gateway_timeout_error_maps_to_timeout() {
        struct SlowAdapter;

        #[async_trait::async_trait]
        impl InferenceGateway for SlowAdapter {
            async fn generate(&self, _: &Endpoint, _: &str) -> Result<String, GatewayError> {
                Err(GatewayError::Timeout(Duration::from_secs(180)))
            }
        }

        let client = InferenceClient::new(Arc::new(SlowAdapter), Duration::from_secs(180));
        let result = client.invoke(&endpoint(), "hi", "CHAIRMAN").await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Timeout));
        assert_eq!(result.error_detail(), Some("request timed out after 180s"));
    }
}
