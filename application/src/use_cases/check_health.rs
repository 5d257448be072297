//! Check Health use case
//!
//! Probes the chairman and every member concurrently. Read-only; shares
//! nothing with council sessions beyond the static configuration.

use crate::ports::health_probe::{HealthProbe, NodeHealth, NodeStatus};
use council_domain::{Chairman, Council, Endpoint};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Reachability of every node in the council
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub chairman: NodeHealth,
    pub members: Vec<NodeHealth>,
}

impl HealthReport {
    /// Online nodes, chairman included
    pub fn online_count(&self) -> usize {
        usize::from(self.chairman.status.is_online())
            + self.members.iter().filter(|m| m.status.is_online()).count()
    }

    pub fn total(&self) -> usize {
        self.members.len() + 1
    }

    pub fn all_online(&self) -> bool {
        self.online_count() == self.total()
    }
}

pub struct CheckHealthUseCase<P: HealthProbe + ?Sized> {
    probe: Arc<P>,
    council: Arc<Council>,
    timeout: Duration,
}

impl<P: HealthProbe + ?Sized> CheckHealthUseCase<P> {
    pub fn new(probe: Arc<P>, council: Arc<Council>, timeout: Duration) -> Self {
        Self {
            probe,
            council,
            timeout,
        }
    }

    pub async fn execute(&self) -> HealthReport {
        let members = join_all(
            self.council
                .roster
                .iter()
                .map(|m| self.check(&m.name, &m.endpoint)),
        );
        let (chairman, members) = tokio::join!(
            self.check(Chairman::LABEL, &self.council.chairman.endpoint),
            members
        );

        let report = HealthReport { chairman, members };
        debug!(
            online = report.online_count(),
            total = report.total(),
            "Health check complete"
        );
        report
    }

    async fn check(&self, label: &str, endpoint: &Endpoint) -> NodeHealth {
        let status = match tokio::time::timeout(self.timeout, self.probe.probe(endpoint)).await {
            Ok(status) => status,
            Err(_) => NodeStatus::Offline {
                reason: format!("probe timed out after {}ms", self.timeout.as_millis()),
            },
        };
        NodeHealth::new(label, endpoint, status)
    }
}
