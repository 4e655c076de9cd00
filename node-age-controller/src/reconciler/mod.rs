use std::{sync::Arc, time::Duration};

use chrono::Utc;
use k8s_openapi::api::core::v1::Node;
use kube::runtime::controller::Action;
use node_age_core::{
    classifier::age_of,
    helpers::RequireMetadata,
    policy::{
        error::{ClusterError, PolicyError},
        Decision, SkipReason,
    },
};

use self::{context::ReconcilerContext, error::ReconcilerError};

pub mod context;
pub mod error;

const THRESHOLD_REQUEUE_SECS: u64 = 60 * 5;
const MAX_AGE_REQUEUE_SECS: u64 = 60 * 60;

const CONFLICT_REQUEUE_SECS: u64 = 1;
const DEFAULT_ERROR_REQUEUE_SECS: u64 = 10;

pub async fn reconcile_node(
    object: Arc<Node>,
    context: Arc<ReconcilerContext>,
) -> Result<Action, ReconcilerError> {
    let name = object.require_name_or(ReconcilerError::MissingObjectMetadata)?;

    let decision = context
        .policy
        .reconcile(name)
        .await
        .map_err(ReconcilerError::PolicyError)?;

    // creation timestamps never change, the cached object is good enough here
    let until_too_old = age_of(&object, Utc::now())
        .and_then(|age| context.policy.config().max_node_age_signed().checked_sub(&age));

    Ok(next_action(decision, until_too_old))
}

pub fn reconcile_node_error(
    _object: Arc<Node>,
    error: &ReconcilerError,
    _context: Arc<ReconcilerContext>,
) -> Action {
    error_action(error)
}

fn next_action(decision: Decision, until_too_old: Option<chrono::Duration>) -> Action {
    match decision {
        Decision::Skip(SkipReason::TooYoung) => {
            let secs = until_too_old
                .map(|remaining| {
                    remaining
                        .num_seconds()
                        .saturating_add(1)
                        .clamp(1, MAX_AGE_REQUEUE_SECS as i64) as u64
                })
                .unwrap_or(MAX_AGE_REQUEUE_SECS);

            Action::requeue(Duration::from_secs(secs))
        }
        Decision::Skip(SkipReason::ThresholdMet) => {
            Action::requeue(Duration::from_secs(THRESHOLD_REQUEUE_SECS))
        }
        _ => Action::await_change(),
    }
}

fn error_action(error: &ReconcilerError) -> Action {
    match error {
        // a new watch event will bring the node back if it reappears
        error if error.is_node_gone() => Action::await_change(),
        ReconcilerError::PolicyError(PolicyError::Cluster(ClusterError::Conflict(_))) => {
            Action::requeue(Duration::from_secs(CONFLICT_REQUEUE_SECS))
        }
        _ => Action::requeue(Duration::from_secs(DEFAULT_ERROR_REQUEUE_SECS)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kube::runtime::controller::Action;
    use node_age_core::policy::{
        error::{ClusterError, PolicyError},
        Decision, SkipReason,
    };

    use super::{error::ReconcilerError, error_action, next_action};

    #[test]
    fn young_nodes_come_back_when_they_age_out() {
        assert_eq!(
            next_action(
                Decision::Skip(SkipReason::TooYoung),
                Some(chrono::Duration::minutes(10))
            ),
            Action::requeue(Duration::from_secs(601))
        );
        assert_eq!(
            next_action(
                Decision::Skip(SkipReason::TooYoung),
                Some(chrono::Duration::days(20))
            ),
            Action::requeue(Duration::from_secs(3600))
        );
        assert_eq!(
            next_action(Decision::Skip(SkipReason::TooYoung), None),
            Action::requeue(Duration::from_secs(3600))
        );
    }

    #[test]
    fn threshold_met_polls_again() {
        assert_eq!(
            next_action(Decision::Skip(SkipReason::ThresholdMet), None),
            Action::requeue(Duration::from_secs(300))
        );
    }

    #[test]
    fn final_decisions_wait_for_changes() {
        for decision in [
            Decision::Cordon,
            Decision::Skip(SkipReason::ControlPlane),
            Decision::Skip(SkipReason::Ignored),
            Decision::Skip(SkipReason::AlreadyCordoned),
            Decision::Skip(SkipReason::DryRun),
        ] {
            assert_eq!(next_action(decision, None), Action::await_change());
        }
    }

    #[test]
    fn errors_map_to_retry_policy() {
        let not_found =
            ReconcilerError::PolicyError(ClusterError::NotFound("worker-1".to_owned()).into());
        let conflict =
            ReconcilerError::PolicyError(ClusterError::Conflict("worker-1".to_owned()).into());
        let missing = ReconcilerError::PolicyError(PolicyError::MissingCreationTimestamp(
            "worker-1".to_owned(),
        ));

        assert_eq!(error_action(&not_found), Action::await_change());
        assert_eq!(
            error_action(&conflict),
            Action::requeue(Duration::from_secs(1))
        );
        assert_eq!(
            error_action(&missing),
            Action::requeue(Duration::from_secs(10))
        );
        assert_eq!(
            error_action(&ReconcilerError::MissingObjectMetadata),
            Action::requeue(Duration::from_secs(10))
        );
    }
}
