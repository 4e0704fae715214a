use stockdash_core::{Capability, DashboardError};
use tokio::time::Instant;

/// Join a collection of tasks, bounding each one by a shared deadline.
///
/// Output order follows `tasks`. A task still pending when `deadline` passes
/// yields `None`; tasks that finished in time keep their output.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<Instant>,
) -> Vec<Option<T>>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    futures::future::join_all(
        tasks
            .into_iter()
            .map(|task| crate::core::within_deadline(deadline, task)),
    )
    .await
}

/// Collapse a set of provider errors into a uniform `DashboardError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - If exactly one provider failed → that error unchanged.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    mut errors: Vec<DashboardError>,
    not_found_what: Option<String>,
) -> DashboardError {
    if !attempted_any {
        return DashboardError::unsupported(capability.as_str());
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, DashboardError::NotFound { .. }))
    {
        return DashboardError::not_found(what);
    }
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    DashboardError::AllProvidersFailed(errors)
}
