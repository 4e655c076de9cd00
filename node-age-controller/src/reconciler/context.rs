use node_age_core::{kubernetes::KubeNodeCluster, policy::Policy};

pub struct ReconcilerContext {
    pub policy: Policy<KubeNodeCluster>,
}
