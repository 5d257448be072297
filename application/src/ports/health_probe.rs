//! Health probe port
//!
//! Lightweight reachability checks, independent of the chat protocol.
//! Used by dashboards and the CLI; the session pipeline never probes.

use async_trait::async_trait;
use council_domain::{Endpoint, Model};
use serde::Serialize;

/// Reachability of one backend node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NodeStatus {
    Online { latency_ms: u64 },
    Offline { reason: String },
}

impl NodeStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, NodeStatus::Online { .. })
    }
}

/// Health of one named node (member or chairman)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeHealth {
    pub label: String,
    pub url: String,
    pub model: Model,
    #[serde(flatten)]
    pub status: NodeStatus,
}

impl NodeHealth {
    pub fn new(label: impl Into<String>, endpoint: &Endpoint, status: NodeStatus) -> Self {
        Self {
            label: label.into(),
            url: endpoint.url.clone(),
            model: endpoint.model.clone(),
            status,
        }
    }
}

/// Probe whether a backend address answers at all
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint) -> NodeStatus;
}
