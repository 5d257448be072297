//! Scripted fakes for use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::health_probe::{HealthProbe, NodeStatus};
use crate::ports::inference_gateway::{GatewayError, InferenceGateway};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use council_domain::{Chairman, Council, Endpoint, Member, Phase, Roster};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

pub const CHAIR_URL: &str = "http://chair:11434";

/// How a fake backend answers one call
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Opinion, rating-led critique or final answer depending on the prompt
    Echo,
    Reply(String),
    /// Sleep, then behave like `Echo`
    Delay(Duration),
    /// Never answer
    Hang,
    Refuse,
    Empty,
    /// The backend task dies mid-call
    Panic,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub prompt: String,
    pub started: Instant,
    pub finished: Instant,
}

pub struct FakeGateway {
    defaults: HashMap<String, Behavior>,
    scripted: Mutex<HashMap<String, VecDeque<Behavior>>>,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            defaults: HashMap::new(),
            scripted: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Default behavior for every call to `url`
    pub fn with(mut self, url: &str, behavior: Behavior) -> Self {
        self.defaults.insert(url.to_string(), behavior);
        self
    }

    /// One-shot behaviors consumed before the default applies
    pub fn with_sequence(self, url: &str, behaviors: Vec<Behavior>) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .insert(url.to_string(), behaviors.into());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.url == url).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_behavior(&self, url: &str) -> Behavior {
        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());
        scripted
            .or_else(|| self.defaults.get(url).cloned())
            .unwrap_or(Behavior::Echo)
    }

    fn echo(url: &str, prompt: &str) -> String {
        if prompt.starts_with("Critique this answer") {
            format!("Rating: 8/10\nSolid answer, reviewed via {}", url)
        } else if prompt.starts_with("You are the Council Chairman") {
            "Final: the council agrees.".to_string()
        } else {
            format!("{} says 42", url)
        }
    }
}

#[async_trait]
impl InferenceGateway for FakeGateway {
    async fn generate(&self, endpoint: &Endpoint, prompt: &str) -> Result<String, GatewayError> {
        let started = Instant::now();
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let reply = match self.next_behavior(&endpoint.url) {
            Behavior::Echo => Ok(Self::echo(&endpoint.url, prompt)),
            Behavior::Reply(text) => Ok(text),
            Behavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(Self::echo(&endpoint.url, prompt))
            }
            Behavior::Hang => std::future::pending().await,
            Behavior::Refuse => Err(GatewayError::ConnectionError(
                "connection refused".to_string(),
            )),
            Behavior::Empty => Ok("   \n".to_string()),
            Behavior::Panic => panic!("backend task crashed"),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(RecordedCall {
            url: endpoint.url.clone(),
            prompt: prompt.to_string(),
            started,
            finished: Instant::now(),
        });
        reply
    }
}

/// Probe that reports every URL in `offline` as down
pub struct FakeProbe {
    pub offline: Vec<String>,
    pub hang: Vec<String>,
}

#[async_trait]
impl HealthProbe for FakeProbe {
    async fn probe(&self, endpoint: &Endpoint) -> NodeStatus {
        if self.hang.contains(&endpoint.url) {
            return std::future::pending().await;
        }
        if self.offline.contains(&endpoint.url) {
            NodeStatus::Offline {
                reason: "connection refused".to_string(),
            }
        } else {
            NodeStatus::Online { latency_ms: 3 }
        }
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl ProgressNotifier for RecordingProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start:{}:{}", phase.as_str(), total_tasks));
    }

    fn on_task_complete(&self, phase: &Phase, label: &str, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("task:{}:{}:{}", phase.as_str(), label, success));
    }

    fn on_phase_complete(&self, phase: &Phase) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done:{}", phase.as_str()));
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

pub fn member_url(i: usize) -> String {
    format!("http://node{}:11434", i)
}

/// Council_1..=Council_n on node1..=noden, chairman on `CHAIR_URL`
pub fn council(n: usize) -> Council {
    let members = (1..=n)
        .map(|i| Member::new(format!("Council_{}", i), member_url(i), "llama3.2:1b"))
        .collect();
    Council::new(
        Roster::new(members).unwrap(),
        Chairman::new(CHAIR_URL, "llama3.2:3b"),
    )
}
