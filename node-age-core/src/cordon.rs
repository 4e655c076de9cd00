use k8s_openapi::api::core::v1::Node;

/// Copy of `node` marked unschedulable. Everything else, including the
/// resource version used for optimistic concurrency, is preserved.
pub fn cordon(node: &Node) -> Node {
    let mut cordoned = node.clone();
    cordoned
        .spec
        .get_or_insert_with(Default::default)
        .unschedulable = Some(true);

    cordoned
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::Node;

    use super::cordon;
    use crate::classifier::{is_cordoned, tests::{tainted, test_node}};

    #[test]
    fn cordon_leaves_input_untouched() {
        let node = tainted(test_node("worker-1", 31), "example.com/dedicated");
        let cordoned = cordon(&node);

        assert!(!is_cordoned(&node));
        assert!(is_cordoned(&cordoned));
        assert_eq!(cordoned.metadata, node.metadata);
        assert_eq!(
            cordoned.spec.as_ref().and_then(|spec| spec.taints.clone()),
            node.spec.as_ref().and_then(|spec| spec.taints.clone())
        );
    }

    #[test]
    fn cordon_creates_missing_spec() {
        let cordoned = cordon(&Node::default());

        assert!(is_cordoned(&cordoned));
    }
}
