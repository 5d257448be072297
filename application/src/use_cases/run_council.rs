//! Run Council use case
//!
//! Drives one session through its three phases:
//!
//! 1. **Opinions** - every member answers the raw query, concurrently
//! 2. **Review** - every member critiques its ring successor, concurrently
//! 3. **Synthesis** - the chairman merges everything into one answer
//!
//! Each phase starts only after every call of the previous one has
//! finished (success, failure or timeout). Failures never abort a session;
//! they flow through as marker text.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::inference_gateway::InferenceGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::inference_client::InferenceClient;
use council_domain::{
    Chairman, Council, Endpoint, FailureKind, InferenceOutcome, InferenceResult, Model, Opinion,
    Phase, PromptTemplate, Question, Review, Score, SessionResult, extract_score, plan_reviews,
};
use council_domain::core::string::{single_line, truncate};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// One backend call scheduled within a phase
struct PlannedCall {
    label: String,
    endpoint: Endpoint,
    prompt: String,
}

/// Use case for running a council session
///
/// Holds only immutable configuration, so one instance can serve any
/// number of concurrent sessions.
pub struct RunCouncilUseCase<G: InferenceGateway + 'static> {
    client: InferenceClient<G>,
    council: Arc<Council>,
    params: ExecutionParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: InferenceGateway + 'static> RunCouncilUseCase<G> {
    pub fn new(gateway: Arc<G>, council: Arc<Council>, params: ExecutionParams) -> Self {
        Self {
            client: InferenceClient::new(gateway, params.request_timeout),
            council,
            params,
            logger: Arc::new(NoConversationLogger),
        }
    }

    /// Record session events through `logger`
    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn council(&self) -> &Council {
        &self.council
    }

    /// Execute a session with default (no-op) progress
    pub async fn execute(&self, question: &Question) -> SessionResult {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute a session with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> SessionResult {
        let started = Instant::now();
        let session_id = new_session_id();

        info!(
            session = %session_id,
            members = self.council.roster.len(),
            question = %truncate(&single_line(question.content()), 80),
            "Starting council session"
        );
        self.logger.log(ConversationEvent::new(
            "session_started",
            json!({
                "session": session_id,
                "question": question.content(),
                "members": self.council.roster.names(),
                "chairman": self.council.chairman.endpoint.model.as_str(),
            }),
        ));

        let opinions = self.phase_opinions(&session_id, question, progress).await;
        let reviews = self.phase_review(&session_id, &opinions, progress).await;
        let synthesis = self
            .phase_synthesis(&session_id, question, &opinions, &reviews, progress)
            .await;

        let result = SessionResult {
            question: question.clone(),
            opinions,
            reviews,
            synthesis,
            total_duration: started.elapsed(),
        };

        info!(
            session = %session_id,
            total_secs = result.total_secs(),
            failed_calls = result.failed_calls(),
            "Council session complete"
        );
        self.logger.log(ConversationEvent::new(
            "session_completed",
            json!({
                "session": session_id,
                "total_secs": result.total_secs(),
                "failed_calls": result.failed_calls(),
                "final_ok": result.synthesis.is_success(),
            }),
        ));

        result
    }

    /// Phase 1: every member answers the raw query
    async fn phase_opinions(
        &self,
        session_id: &str,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Opinion> {
        info!("Phase 1: Initial Opinions");

        let calls = self
            .council
            .roster
            .iter()
            .map(|member| PlannedCall {
                label: member.name.clone(),
                endpoint: member.endpoint.clone(),
                prompt: question.content().to_string(),
            })
            .collect();

        let results = self
            .fan_out(session_id, Phase::Opinions, calls, progress)
            .await;

        self.council
            .roster
            .iter()
            .zip(results)
            .map(|(member, result)| Opinion::new(member.name.clone(), result))
            .collect()
    }

    /// Phase 2: member `i` critiques member `(i + 1) mod N`
    async fn phase_review(
        &self,
        session_id: &str,
        opinions: &[Opinion],
        progress: &dyn ProgressNotifier,
    ) -> Vec<Review> {
        info!("Phase 2: Peer Review");

        let requests = plan_reviews(&self.council.roster, opinions);
        let calls = requests
            .iter()
            .map(|request| PlannedCall {
                label: format!("Reviewer:{}", request.reviewer.name),
                endpoint: request.reviewer.endpoint.clone(),
                prompt: request.prompt.clone(),
            })
            .collect();

        let results = self
            .fan_out(session_id, Phase::Review, calls, progress)
            .await;

        requests
            .into_iter()
            .zip(results)
            .map(|(request, critique)| {
                let score = match &critique.outcome {
                    InferenceOutcome::Success { text } => extract_score(text),
                    InferenceOutcome::Failure { .. } => Score::Unparsable,
                };
                debug!(
                    reviewer = %request.assignment.reviewer,
                    reviewee = %request.assignment.reviewee,
                    score = %score,
                    "Review scored"
                );
                Review {
                    assignment: request.assignment,
                    critique,
                    score,
                }
            })
            .collect()
    }

    /// Phase 3: the chairman synthesizes opinions and reviews
    async fn phase_synthesis(
        &self,
        session_id: &str,
        question: &Question,
        opinions: &[Opinion],
        reviews: &[Review],
        progress: &dyn ProgressNotifier,
    ) -> InferenceResult {
        info!("Phase 3: Chairman Synthesis");
        progress.on_phase_start(&Phase::Synthesis, 1);

        let opinion_pairs: Vec<(&str, String)> = opinions
            .iter()
            .map(|o| (o.member.as_str(), o.result.response_text()))
            .collect();
        let review_pairs: Vec<(&str, String)> = reviews
            .iter()
            .map(|r| (r.reviewer(), r.critique.response_text()))
            .collect();
        let prompt =
            PromptTemplate::synthesis_prompt(question.content(), &opinion_pairs, &review_pairs);

        let chairman = &self.council.chairman;
        let mut attempt = 0;
        let result = loop {
            let result = self
                .client
                .invoke(&chairman.endpoint, &prompt, Chairman::LABEL)
                .await;
            if result.is_success() || attempt >= self.params.chairman_retries {
                break result;
            }
            attempt += 1;
            warn!(
                attempt,
                retries = self.params.chairman_retries,
                "Chairman call failed, retrying"
            );
        };

        if let Some(detail) = result.error_detail() {
            error!(
                model = %chairman.endpoint.model,
                url = %chairman.endpoint.url,
                error = %detail,
                "Chairman synthesis failed, final answer is a failure marker"
            );
        }

        self.log_inference(session_id, &Phase::Synthesis, &result);
        progress.on_task_complete(&Phase::Synthesis, &result.label, result.is_success());
        progress.on_phase_complete(&Phase::Synthesis);
        result
    }

    /// Issue every call concurrently; results come back in `calls` order.
    ///
    /// Returns only after all calls have resolved. A task that dies without
    /// reporting still yields an `Offline` result in its slot.
    async fn fan_out(
        &self,
        session_id: &str,
        phase: Phase,
        calls: Vec<PlannedCall>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<InferenceResult> {
        progress.on_phase_start(&phase, calls.len());

        let fallbacks: Vec<(String, Model)> = calls
            .iter()
            .map(|c| (c.label.clone(), c.endpoint.model.clone()))
            .collect();
        let mut slots: Vec<Option<InferenceResult>> = vec![None; calls.len()];
        let mut join_set = JoinSet::new();

        for (index, call) in calls.into_iter().enumerate() {
            let client = self.client.clone();
            join_set.spawn(async move {
                let result = client.invoke(&call.endpoint, &call.prompt, &call.label).await;
                (index, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    progress.on_task_complete(&phase, &result.label, result.is_success());
                    self.log_inference(session_id, &phase, &result);
                    slots[index] = Some(result);
                }
                Err(e) => {
                    warn!(phase = phase.as_str(), "Task join error: {}", e);
                }
            }
        }

        let results: Vec<InferenceResult> = slots
            .into_iter()
            .zip(fallbacks)
            .map(|(slot, (label, model))| {
                slot.unwrap_or_else(|| {
                    let result = InferenceResult::failure(
                        label,
                        model,
                        FailureKind::Offline,
                        "inference task aborted",
                        Duration::ZERO,
                    );
                    progress.on_task_complete(&phase, &result.label, false);
                    self.log_inference(session_id, &phase, &result);
                    result
                })
            })
            .collect();

        progress.on_phase_complete(&phase);
        results
    }

    fn log_inference(&self, session_id: &str, phase: &Phase, result: &InferenceResult) {
        self.logger.log(ConversationEvent::new(
            "inference_completed",
            json!({
                "session": session_id,
                "phase": phase.as_str(),
                "label": result.label,
                "model": result.model.as_str(),
                "success": result.is_success(),
                "latency": result.latency_secs(),
                "response": result.response_text(),
            }),
        ));
    }
}

fn new_session_id() -> String {
    let now = chrono::Utc::now();
    format!(
        "{}-{:x}",
        now.format("%Y%m%dT%H%M%S"),
        now.timestamp_subsec_nanos()
    )
}
