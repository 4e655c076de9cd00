use std::time::Duration;

use clap::Parser;
use node_age_core::config::{PolicyConfig, PolicyConfigBuilder, PolicyConfigBuilderError};

pub const DEFAULT_MAX_NODE_AGE: &str = "720h";

/// cordon kubernetes nodes older than the configured age
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// don't operate on nodes, only log what would happen
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,
    /// the max number of nodes that can be cordoned at one time
    #[arg(long = "max-nodes", env = "MAX_NODES", default_value_t = 3)]
    pub max_nodes: usize,
    /// how many nodes must stay uncordoned before we attempt to cordon a node
    #[arg(long, env = "MIN_AVAILABLE_NODES", default_value_t = 3)]
    pub min_available_nodes: usize,
    /// how old a node is allowed to be before we attempt to cordon it (e.g. 720h, 1h30m)
    #[arg(long, env = "MAX_NODE_AGE", default_value = DEFAULT_MAX_NODE_AGE, value_parser = parse_go_duration)]
    pub max_node_age: Duration,
    /// enable development (debug) logging
    #[arg(long)]
    pub development: bool,
    /// instance name reported on published events
    #[arg(long, env = "POD_NAME")]
    pub instance: Option<String>,
    /// override default kubeconfig
    #[arg(long)]
    pub kube_config: Option<String>,
    /// override default kubeconfig context
    #[arg(long)]
    pub kube_context: Option<String>,
}

impl Cli {
    pub fn policy_config(&self) -> Result<PolicyConfig, PolicyConfigBuilderError> {
        PolicyConfigBuilder::default()
            .dry_run(self.dry_run)
            .max_cordoned_nodes(self.max_nodes)
            .min_available_nodes(self.min_available_nodes)
            .max_node_age(self.max_node_age)
            .build()
    }
}

fn parse_go_duration(raw: &str) -> Result<Duration, String> {
    let nanos = go_parse_duration::parse_duration(raw)
        .map_err(|err| format!("invalid duration '{raw}': {err:?}"))?;

    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| format!("duration '{raw}' can't be negative"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::{parse_go_duration, Cli};

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["node-age-controller"]).unwrap();
        let config = cli.policy_config().unwrap();

        assert!(!config.dry_run);
        assert_eq!(config.max_cordoned_nodes, 3);
        assert_eq!(config.min_available_nodes, 3);
        assert_eq!(config.max_node_age, Duration::from_secs(720 * 3600));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "node-age-controller",
            "--dry-run",
            "--max-nodes",
            "5",
            "--min-available-nodes",
            "1",
            "--max-node-age",
            "1h30m",
        ])
        .unwrap();
        let config = cli.policy_config().unwrap();

        assert!(config.dry_run);
        assert_eq!(config.max_cordoned_nodes, 5);
        assert_eq!(config.min_available_nodes, 1);
        assert_eq!(config.max_node_age, Duration::from_secs(90 * 60));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_go_duration("-5h").is_err());
        assert!(parse_go_duration("thirty days").is_err());
        assert!(Cli::try_parse_from(["node-age-controller", "--max-nodes", "-1"]).is_err());
    }
}
