use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::{
    api::{ListParams, PostParams},
    runtime::events::{Event, EventType, Recorder, Reporter},
    Api, Client, Resource,
};
use log::{debug, warn};

use crate::{
    helpers::RequireMetadata,
    policy::{cluster::NodeCluster, error::ClusterError},
    threshold::NodeSnapshot,
    CONTROLLER_NAME,
};

pub mod operations;

/// [`NodeCluster`] backed by the Kubernetes API server.
pub struct KubeNodeCluster {
    client: Client,
    reporter: Reporter,
    list_params: ListParams,
    post_params: PostParams,
}

impl KubeNodeCluster {
    pub fn new(client: Client, instance: Option<String>) -> Self {
        Self {
            client,
            reporter: Reporter {
                controller: CONTROLLER_NAME.to_owned(),
                instance,
            },
            list_params: ListParams::default(),
            post_params: PostParams {
                field_manager: Some(CONTROLLER_NAME.to_owned()),
                ..Default::default()
            },
        }
    }

    fn api(&self) -> Api<Node> {
        Api::all(self.client.clone())
    }
}

#[async_trait]
impl NodeCluster for KubeNodeCluster {
    async fn get_node(&self, name: &str) -> Result<Node, ClusterError> {
        self.api()
            .get(name)
            .await
            .map_err(|error| classify_error(name, error))
    }

    async fn list_nodes(&self) -> Result<NodeSnapshot, ClusterError> {
        let nodes = self
            .api()
            .list(&self.list_params)
            .await
            .map_err(ClusterError::Transient)?;

        Ok(nodes.items.into())
    }

    async fn update_node(&self, node: &Node) -> Result<(), ClusterError> {
        let name = node.require_name_or(ClusterError::MissingObjectMetadata)?;

        self.api()
            .replace(name, &self.post_params, node)
            .await
            .map_err(|error| classify_error(name, error))?;

        Ok(())
    }

    async fn emit_event(&self, node: &Node, reason: &str, note: String) {
        let recorder = Recorder::new(self.client.clone(), self.reporter.clone(), node.object_ref(&()));
        let event = Event {
            type_: EventType::Normal,
            reason: reason.to_owned(),
            note: Some(note),
            action: "Cordon".to_owned(),
            secondary: None,
        };

        match recorder.publish(event).await {
            Ok(_) => debug!("Published {reason} event"),
            Err(error) => warn!("Couldn't publish {reason} event! {error:?}"),
        }
    }
}

/// Maps API failures onto the error kinds the policy distinguishes.
pub fn classify_error(name: &str, error: kube::Error) -> ClusterError {
    match &error {
        kube::Error::Api(response) => match response.code {
            404 => ClusterError::NotFound(name.to_owned()),
            409 => ClusterError::Conflict(name.to_owned()),
            _ => ClusterError::Transient(error),
        },
        _ => ClusterError::Transient(error),
    }
}
