use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("Object is missing metadata!")]
    MissingObjectMetadata,
    #[error("Node '{}' doesn't exist!", .0)]
    NotFound(String),
    #[error("Node '{}' was modified concurrently!", .0)]
    Conflict(String),
    #[error("Cluster API request failed! Reason: {}", .0)]
    Transient(kube::Error),
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error("Node '{}' is missing its creation timestamp!", .0)]
    MissingCreationTimestamp(String),
}
