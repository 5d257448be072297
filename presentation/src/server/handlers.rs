//! HTTP handlers for the council API

use crate::server::error::{ApiError, ApiResult};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use council_application::{CheckHealthUseCase, HealthProbe, HealthReport, InferenceGateway, RunCouncilUseCase};
use council_domain::{Question, SessionReport};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Body of `POST /api/chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// State shared across all handlers
///
/// Only immutable configuration and stateless use cases: concurrent
/// requests run independent sessions.
pub struct AppState<G: InferenceGateway + 'static> {
    pub council: Arc<RunCouncilUseCase<G>>,
    pub health: Arc<CheckHealthUseCase<dyn HealthProbe>>,
}

impl<G: InferenceGateway + 'static> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            council: Arc::clone(&self.council),
            health: Arc::clone(&self.health),
        }
    }
}

impl<G: InferenceGateway + 'static> AppState<G> {
    pub fn new(
        council: Arc<RunCouncilUseCase<G>>,
        health: Arc<CheckHealthUseCase<dyn HealthProbe>>,
    ) -> Self {
        Self { council, health }
    }
}

/// POST /api/chat - run one council session
pub async fn chat<G: InferenceGateway + 'static>(
    State(state): State<AppState<G>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<SessionReport>> {
    let question =
        Question::parse(request.message).map_err(|e| ApiError::validation(e.to_string()))?;
    info!(bytes = question.content().len(), "Council session requested");

    let result = state.council.execute(&question).await;
    Ok(Json(SessionReport::from(&result)))
}

/// GET /api/health - node reachability
pub async fn health<G: InferenceGateway + 'static>(
    State(state): State<AppState<G>>,
) -> Json<HealthReport> {
    Json(state.health.execute().await)
}

/// Build the API router
pub fn create_router<G: InferenceGateway + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/api/chat", post(chat::<G>))
        .route("/api/health", get(health::<G>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use council_application::{ExecutionParams, GatewayError, NodeStatus};
    use council_domain::{Chairman, Council, Endpoint, Member, Roster};
    use std::time::Duration;
    use tower::ServiceExt;

    struct EchoGateway;

    #[async_trait]
    impl InferenceGateway for EchoGateway {
        async fn generate(&self, endpoint: &Endpoint, prompt: &str) -> Result<String, GatewayError> {
            if endpoint.url.contains("down") {
                return Err(GatewayError::ConnectionError("connection refused".to_string()));
            }
            if prompt.starts_with("Critique") {
                Ok("Rating: 7/10\nFine.".to_string())
            } else if prompt.starts_with("You are the Council Chairman") {
                Ok("Final answer.".to_string())
            } else {
                Ok(format!("{} answers", endpoint.url))
            }
        }
    }

    struct StaticProbe;

    #[async_trait]
    impl HealthProbe for StaticProbe {
        async fn probe(&self, endpoint: &Endpoint) -> NodeStatus {
            if endpoint.url.contains("down") {
                NodeStatus::Offline {
                    reason: "connection refused".to_string(),
                }
            } else {
                NodeStatus::Online { latency_ms: 2 }
            }
        }
    }

    fn router() -> Router {
        let council = Arc::new(Council::new(
            Roster::new(vec![
                Member::new("Council_1", "http://a:11434", "gemma2:2b"),
                Member::new("Council_2", "http://down:11434", "llama3.2:1b"),
            ])
            .unwrap(),
            Chairman::new("http://c:11434", "llama3.2:3b"),
        ));
        let params = ExecutionParams::default();
        let health: Arc<CheckHealthUseCase<dyn HealthProbe>> = Arc::new(CheckHealthUseCase::new(
            Arc::new(StaticProbe) as Arc<dyn HealthProbe>,
            Arc::clone(&council),
            Duration::from_millis(1500),
        ));
        let use_case = Arc::new(RunCouncilUseCase::new(Arc::new(EchoGateway), council, params));
        create_router(AppState::new(use_case, health))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_envelope() {
        let response = router()
            .oneshot(post_chat(r#"{"message": "What is 6x7?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["opinions"]["Council_1"]["response"], "http://a:11434 answers");
        assert!(
            json["opinions"]["Council_2"]["response"]
                .as_str()
                .unwrap()
                .starts_with("Offline: ")
        );
        assert_eq!(json["opinions"]["Council_2"]["latency"], 0.0);
        assert_eq!(json["reviews"]["Council_1"]["score"], 7);
        assert_eq!(json["reviews"]["Council_2"]["score"], "N/A");
        assert_eq!(json["final"]["response"], "Final answer.");
        assert!(json["total_time"].as_str().unwrap().ends_with('s'));

        let keys: Vec<_> = json["opinions"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["Council_1", "Council_2"]);
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let response = router()
            .oneshot(post_chat(r#"{"message": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_message_field_is_rejected() {
        let response = router().oneshot(post_chat("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["chairman"]["status"], "online");
        assert_eq!(json["members"][0]["label"], "Council_1");
        assert_eq!(json["members"][1]["status"], "offline");
        assert_eq!(json["members"][1]["reason"], "connection refused");
    }
}
