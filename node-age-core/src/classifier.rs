use chrono::{DateTime, Duration, Utc};
use k8s_openapi::api::core::v1::Node;

use crate::{CONTROL_PLANE_TAINT_KEY, IGNORE_ANNOTATION, MASTER_TAINT_KEY};

pub fn is_control_plane(node: &Node) -> bool {
    node.spec
        .as_ref()
        .and_then(|spec| spec.taints.as_ref())
        .map(|taints| {
            taints
                .iter()
                .any(|taint| taint.key == MASTER_TAINT_KEY || taint.key == CONTROL_PLANE_TAINT_KEY)
        })
        .unwrap_or(false)
}

pub fn is_cordoned(node: &Node) -> bool {
    node.spec
        .as_ref()
        .and_then(|spec| spec.unschedulable)
        .unwrap_or(false)
}

/// Only the exact value `"true"` exempts a node, anything else is treated as unset.
pub fn is_ignored(node: &Node) -> bool {
    node.metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(IGNORE_ANNOTATION))
        .map(|value| value == "true")
        .unwrap_or(false)
}

/// Time elapsed since the node was created. Clock skew may make it negative,
/// the value is returned as is. `None` if the object carries no creation timestamp.
pub fn age_of(node: &Node, now: DateTime<Utc>) -> Option<Duration> {
    node.metadata
        .creation_timestamp
        .as_ref()
        .map(|created| now - created.0)
}
