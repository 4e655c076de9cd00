use std::time::Duration;

use derive_builder::Builder;

/// Limits the policy works within. Built once at startup and never changed afterwards.
#[derive(Debug, Clone, Builder)]
pub struct PolicyConfig {
    /// log what would be cordoned without touching any node
    #[builder(default)]
    pub dry_run: bool,
    /// cordoning stops once this many nodes are unschedulable
    pub max_cordoned_nodes: usize,
    /// cordoning stops once only this many schedulable nodes are left
    pub min_available_nodes: usize,
    /// nodes strictly older than this are cordoned
    pub max_node_age: Duration,
}

impl PolicyConfig {
    /// `max_node_age` in the signed representation node ages are computed in.
    /// Ages that don't fit saturate, so such a limit is never exceeded.
    pub fn max_node_age_signed(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.max_node_age).unwrap_or(chrono::TimeDelta::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::PolicyConfigBuilder;

    #[test]
    fn builder_defaults_to_live_mode() {
        let config = PolicyConfigBuilder::default()
            .max_cordoned_nodes(3)
            .min_available_nodes(3)
            .max_node_age(Duration::from_secs(720 * 3600))
            .build()
            .unwrap();

        assert!(!config.dry_run);
        assert_eq!(config.max_node_age_signed(), chrono::Duration::hours(720));
    }

    #[test]
    fn builder_requires_limits() {
        assert!(PolicyConfigBuilder::default().dry_run(true).build().is_err());
    }

    #[test]
    fn oversized_age_saturates() {
        let config = PolicyConfigBuilder::default()
            .max_cordoned_nodes(1)
            .min_available_nodes(1)
            .max_node_age(Duration::MAX)
            .build()
            .unwrap();

        assert_eq!(config.max_node_age_signed(), chrono::TimeDelta::MAX);
    }
}
