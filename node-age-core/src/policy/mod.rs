use std::fmt::Display;

use k8s_openapi::api::core::v1::Node;
use log::{debug, info};

use crate::{
    classifier::{age_of, is_control_plane, is_cordoned, is_ignored},
    config::PolicyConfig,
    cordon::cordon,
    helpers::format_age,
    threshold::{evaluate, NodeSnapshot},
    NODE_CORDONED_REASON,
};

use self::{
    cluster::{Clock, NodeCluster, SystemClock},
    error::PolicyError,
};

pub mod cluster;
pub mod error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ControlPlane,
    Ignored,
    ThresholdMet,
    TooYoung,
    AlreadyCordoned,
    DryRun,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ControlPlane => "control-plane node",
            Self::Ignored => "ignore annotation set",
            Self::ThresholdMet => "cordon threshold met",
            Self::TooYoung => "node too young",
            Self::AlreadyCordoned => "node already cordoned",
            Self::DryRun => "dry run enabled",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    Cordon,
}

/// Decides, one node at a time, whether a node has outlived `max_node_age`
/// and may be cordoned without breaching the cluster-wide limits.
///
/// Holds no cluster state between calls: every [`Policy::reconcile`] fetches
/// the node and lists the cluster again. Two nodes reconciled concurrently
/// near a limit may both pass the threshold check, so the limits can be
/// overshot by the number of concurrent workers.
pub struct Policy<C, K = SystemClock> {
    cluster: C,
    clock: K,
    config: PolicyConfig,
}

impl<C: NodeCluster> Policy<C> {
    pub fn new(cluster: C, config: PolicyConfig) -> Self {
        Self::with_clock(cluster, SystemClock, config)
    }
}

impl<C: NodeCluster, K: Clock> Policy<C, K> {
    pub fn with_clock(cluster: C, clock: K, config: PolicyConfig) -> Self {
        Self {
            cluster,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn cluster(&self) -> &C {
        &self.cluster
    }

    pub async fn reconcile(&self, name: &str) -> Result<Decision, PolicyError> {
        let node = self.cluster.get_node(name).await?;

        if is_control_plane(&node) {
            return Ok(self.skip(name, SkipReason::ControlPlane));
        }

        if is_ignored(&node) {
            return Ok(self.skip(name, SkipReason::Ignored));
        }

        let snapshot = self.cluster.list_nodes().await?;
        if evaluate(&snapshot, &self.config) {
            log_threshold(name, &snapshot, &self.config);
            return Ok(self.skip(name, SkipReason::ThresholdMet));
        }

        let age = age_of(&node, self.clock.now())
            .ok_or_else(|| PolicyError::MissingCreationTimestamp(name.to_owned()))?;
        debug!("Checking age of node '{name}' ({})", format_age(age));

        if age <= self.config.max_node_age_signed() {
            return Ok(self.skip(name, SkipReason::TooYoung));
        }

        if is_cordoned(&node) {
            return Ok(self.skip(name, SkipReason::AlreadyCordoned));
        }

        if self.config.dry_run {
            info!(
                "Node '{name}' ({}) would be cordoned, not touching it in dry run mode",
                format_age(age)
            );
            return Ok(Decision::Skip(SkipReason::DryRun));
        }

        self.cordon(name, &node, age).await?;

        Ok(Decision::Cordon)
    }

    async fn cordon(&self, name: &str, node: &Node, age: chrono::Duration) -> Result<(), PolicyError> {
        info!("Cordoning node '{name}' ({})...", format_age(age));

        let cordoned = cordon(node);
        self.cluster.update_node(&cordoned).await?;

        self.cluster
            .emit_event(
                &cordoned,
                NODE_CORDONED_REASON,
                format!("Cordoned node {name}, age {}", format_age(age)),
            )
            .await;

        Ok(())
    }

    fn skip(&self, name: &str, reason: SkipReason) -> Decision {
        info!("Skipping node '{name}': {reason}");

        Decision::Skip(reason)
    }
}

fn log_threshold(name: &str, snapshot: &NodeSnapshot, config: &PolicyConfig) {
    debug!(
        "Threshold check for '{name}': {} of {} nodes cordoned (max {}), {} available (min {})",
        snapshot.cordoned_count(),
        snapshot.total(),
        config.max_cordoned_nodes,
        snapshot.available_count(),
        config.min_available_nodes
    );
}
