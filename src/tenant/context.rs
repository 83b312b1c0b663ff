// Request-scoped tenant context backed by a tokio task-local.
//
// Ordinary globals or thread-locals would leak between requests that
// interleave on the shared runtime; the task-local binding follows the
// logical request task across await points instead.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Identifiers bound for the duration of one request's async call chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

task_local! {
    static CONTEXT: RequestContext;
}

/// Run `fut` with `(tenant_id, user_id)` bound as the ambient context.
///
/// The binding covers `fut`'s entire async extent, including suspension
/// points. A nested `scope` call shadows the outer binding for its own
/// extent only; the outer values are visible again once it returns. The
/// future's output (or panic) passes through unchanged.
pub async fn scope<F>(tenant_id: Option<Uuid>, user_id: Option<Uuid>, fut: F) -> F::Output
where
    F: Future,
{
    CONTEXT
        .scope(RequestContext { tenant_id, user_id }, fut)
        .await
}

/// Tenant id bound by the nearest enclosing [`scope`] call.
///
/// Returns `None` when called outside any scope, never panics.
pub fn current_tenant_id() -> Option<Uuid> {
    CONTEXT.try_with(|ctx| ctx.tenant_id).ok().flatten()
}

/// User id bound by the nearest enclosing [`scope`] call.
pub fn current_user_id() -> Option<Uuid> {
    CONTEXT.try_with(|ctx| ctx.user_id).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_outside_any_scope_return_none() {
        assert_eq!(current_tenant_id(), None);
        assert_eq!(current_user_id(), None);
    }

    #[tokio::test]
    async fn scope_binds_both_identifiers() {
        let tenant = Uuid::new_v4();
        let user = Uuid::new_v4();

        scope(Some(tenant), Some(user), async {
            assert_eq!(current_tenant_id(), Some(tenant));
            assert_eq!(current_user_id(), Some(user));
        })
        .await;

        // Scope exit discards the binding
        assert_eq!(current_tenant_id(), None);
    }

    #[tokio::test]
    async fn binding_survives_await_points() {
        let tenant = Uuid::new_v4();

        scope(Some(tenant), None, async {
            tokio::task::yield_now().await;
            assert_eq!(current_tenant_id(), Some(tenant));
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            assert_eq!(current_tenant_id(), Some(tenant));
        })
        .await;
    }

    #[tokio::test]
    async fn nested_scope_shadows_and_restores() {
        let outer_tenant = Uuid::new_v4();
        let outer_user = Uuid::new_v4();
        let inner_tenant = Uuid::new_v4();
        let inner_user = Uuid::new_v4();

        scope(Some(outer_tenant), Some(outer_user), async {
            scope(Some(inner_tenant), Some(inner_user), async {
                assert_eq!(current_tenant_id(), Some(inner_tenant));
                assert_eq!(current_user_id(), Some(inner_user));
            })
            .await;

            assert_eq!(current_tenant_id(), Some(outer_tenant));
            assert_eq!(current_user_id(), Some(outer_user));
        })
        .await;
    }

    #[tokio::test]
    async fn concurrent_tasks_do_not_observe_each_other() {
        let tenant_a = Uuid::new_v4();
        let tenant_b = Uuid::new_v4();

        // Both tasks interleave on the runtime; each must only ever see
        // its own binding no matter how the scheduler orders them.
        let task_a = tokio::spawn(scope(Some(tenant_a), None, async move {
            for _ in 0..50 {
                tokio::task::yield_now().await;
                assert_eq!(current_tenant_id(), Some(tenant_a));
            }
        }));
        let task_b = tokio::spawn(scope(Some(tenant_b), None, async move {
            for _ in 0..50 {
                tokio::task::yield_now().await;
                assert_eq!(current_tenant_id(), Some(tenant_b));
            }
        }));

        task_a.await.unwrap();
        task_b.await.unwrap();
    }

    #[tokio::test]
    async fn error_propagates_through_scope_unchanged() {
        let result: Result<(), &str> = scope(Some(Uuid::new_v4()), None, async { Err("boom") }).await;
        assert_eq!(result, Err("boom"));
    }
}
