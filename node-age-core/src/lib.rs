pub mod classifier;
pub mod config;
pub mod cordon;
pub mod helpers;
pub mod kubernetes;
pub mod policy;
pub mod threshold;

pub const CONTROLLER_NAME: &str = "node-age-controller";

pub const IGNORE_ANNOTATION: &str = "node-age-controller/ignore";
pub const MASTER_TAINT_KEY: &str = "node-role.kubernetes.io/master";
pub const CONTROL_PLANE_TAINT_KEY: &str = "node-role.kubernetes.io/control-plane";

pub const NODE_CORDONED_REASON: &str = "NodeCordoned";
