use k8s_openapi::api::core::v1::Node;

use crate::{classifier::is_cordoned, config::PolicyConfig};

/// Nodes returned by a single list call.
#[derive(Debug, Clone, Default)]
pub struct NodeSnapshot {
    nodes: Vec<Node>,
}

impl NodeSnapshot {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn total(&self) -> usize {
        self.nodes.len()
    }

    pub fn cordoned_count(&self) -> usize {
        self.nodes.iter().filter(|node| is_cordoned(node)).count()
    }

    pub fn available_count(&self) -> usize {
        self.total() - self.cordoned_count()
    }
}

impl From<Vec<Node>> for NodeSnapshot {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

/// Returns `true` when no further node may be cordoned.
pub fn evaluate(snapshot: &NodeSnapshot, config: &PolicyConfig) -> bool {
    let cordoned = snapshot.cordoned_count();
    let available = snapshot.total() - cordoned;

    available <= config.min_available_nodes || cordoned >= config.max_cordoned_nodes
}
