use kube::{
    runtime::{
        controller::{Action, Error as ControllerError},
        reflector::ObjectRef,
        watcher::Error as WatcherError,
    },
    Resource,
};
use log::{debug, error, warn};
use node_age_core::helpers::pretty_type_name;

use crate::reconciler::error::ReconcilerError;

pub fn handle_reconciliation_result<T>(
    result: Result<(ObjectRef<T>, Action), ControllerError<ReconcilerError, WatcherError>>,
) -> impl std::future::Future<Output = ()>
where
    T: Resource,
{
    let resource_name = pretty_type_name::<T>();

    match result {
        Ok(result) => debug!(
            "Reconciled {} '{}'. Next action: {:?}",
            resource_name.to_lowercase(),
            result.0.name,
            result.1
        ),
        Err(err) => match err {
            ControllerError::ObjectNotFound(_) => (), // node is gone, nothing left to cordon
            ControllerError::ReconcilerFailed(reconciler_error, with_obj)
                if reconciler_error.is_node_gone() =>
            {
                debug!("{} '{}' is gone, skipping", resource_name, with_obj.name)
            }
            ControllerError::ReconcilerFailed(reconciler_error, with_obj) => {
                warn!(
                    "{} reconciliation failed for '{}': {:#?}",
                    resource_name, with_obj.name, reconciler_error
                )
            }
            ControllerError::QueueError(watcher_err) => {
                error!("Watcher has failed! {watcher_err:#?}")
            }
        },
    }

    std::future::ready(())
}
