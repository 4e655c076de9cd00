use std::{process::exit, sync::Arc};

use clap::Parser;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Node;
use kube::{
    runtime::{watcher::Config, Controller},
    Api, Client,
};
use log::{error, info};
use node_age_core::{
    config::PolicyConfig, helpers::format_age, kubernetes::operations::create_client,
    kubernetes::KubeNodeCluster, policy::Policy,
};

use crate::{
    cli::Cli,
    helpers::handle_reconciliation_result,
    reconciler::{context::ReconcilerContext, reconcile_node, reconcile_node_error},
};

mod cli;
mod helpers;
mod reconciler;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    configure_logger(cli.development);

    let config = get_policy_config(&cli);
    let client = get_client(&cli).await;

    info!(
        "Starting node-age-controller (dry run: {}, max cordoned: {}, min available: {}, max age: {})",
        config.dry_run,
        config.max_cordoned_nodes,
        config.min_available_nodes,
        format_age(config.max_node_age_signed())
    );

    let context = ReconcilerContext {
        policy: Policy::new(KubeNodeCluster::new(client.clone(), cli.instance), config),
    };

    Controller::new(Api::<Node>::all(client), Config::default())
        .shutdown_on_signal()
        .run(reconcile_node, reconcile_node_error, Arc::new(context))
        .for_each(handle_reconciliation_result)
        .await;

    info!("Controller has shut down");
}

async fn get_client(cli: &Cli) -> Client {
    match create_client(&cli.kube_config, &cli.kube_context).await {
        Ok(client) => client,
        Err(error) => {
            error!("Couldn't create client! {error:?}");
            exit(6)
        }
    }
}

fn get_policy_config(cli: &Cli) -> PolicyConfig {
    match cli.policy_config() {
        Ok(config) => config,
        Err(error) => {
            error!("Invalid policy configuration! {error:?}");
            exit(7)
        }
    }
}

fn configure_logger(development: bool) {
    env_logger::builder()
        .default_format()
        .format_module_path(false)
        .filter_level(match development {
            true => log::LevelFilter::Debug,
            false => log::LevelFilter::Info,
        })
        .parse_default_env()
        .init()
}
