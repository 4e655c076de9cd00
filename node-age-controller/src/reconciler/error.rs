use node_age_core::policy::error::{ClusterError, PolicyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Object is missing metadata!")]
    MissingObjectMetadata,
    #[error("Couldn't reconcile the node! Reason: {}", .0)]
    PolicyError(PolicyError),
}

impl ReconcilerError {
    /// The node vanished before it could be fetched, nothing to retry.
    pub fn is_node_gone(&self) -> bool {
        matches!(
            self,
            Self::PolicyError(PolicyError::Cluster(ClusterError::NotFound(_)))
        )
    }
}
