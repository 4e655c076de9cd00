use async_trait::async_trait;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Node;

use crate::threshold::NodeSnapshot;

use super::error::ClusterError;

/// Everything the policy needs from the cluster state store.
#[async_trait]
pub trait NodeCluster: Send + Sync {
    async fn get_node(&self, name: &str) -> Result<Node, ClusterError>;
    async fn list_nodes(&self) -> Result<NodeSnapshot, ClusterError>;
    /// Fails with [`ClusterError::Conflict`] if `node` carries a stale resource version.
    async fn update_node(&self, node: &Node) -> Result<(), ClusterError>;
    /// Fire and forget, implementations log their own failures.
    async fn emit_event(&self, node: &Node, reason: &str, note: String);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
