//! Optimistic local mutation with snapshot rollback.

use chesslens_core::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Applies `mutate_local` to the watched state, then awaits `remote_call`.
///
/// The snapshot of the previous state is captured in the same critical
/// section as the local mutation, so observers see the change before the
/// remote call is even polled. If the remote call fails the exact snapshot is
/// restored (discarding anything that happened to the state in between) and
/// the error is returned unchanged.
///
/// `remote_call` is a future and therefore lazy: it is only started after the
/// local mutation has been published.
pub async fn with_optimistic_update<T, R, M, F>(
    state: &watch::Sender<Arc<T>>,
    mutate_local: M,
    remote_call: F,
) -> Result<R>
where
    T: Clone,
    M: FnOnce(&mut T),
    F: Future<Output = Result<R>>,
{
    let mut snapshot: Option<Arc<T>> = None;
    state.send_modify(|current| {
        snapshot = Some(Arc::clone(current));
        mutate_local(Arc::make_mut(current));
    });

    match remote_call.await {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(snapshot) = snapshot {
                warn!(error = %err, "Remote call failed, restoring snapshot");
                state.send_replace(snapshot);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chesslens_core::LensError;

    #[tokio::test]
    async fn test_success_keeps_mutation() {
        let (tx, rx) = watch::channel(Arc::new(vec![1, 2, 3]));

        let result = with_optimistic_update(&tx, |v: &mut Vec<i32>| v.retain(|n| *n != 2), async {
            Ok("done")
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(**rx.borrow(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_failure_restores_snapshot() {
        let (tx, rx) = watch::channel(Arc::new(vec![1, 2, 3]));
        let before = Arc::clone(&rx.borrow());

        let result: Result<()> = with_optimistic_update(
            &tx,
            |v: &mut Vec<i32>| v.retain(|n| *n != 2),
            async { Err(LensError::delete("server down")) },
        )
        .await;

        assert_eq!(result, Err(LensError::delete("server down")));
        assert!(Arc::ptr_eq(&rx.borrow(), &before));
        assert_eq!(**rx.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_mutation_is_visible_before_remote_call_runs() {
        let (tx, rx) = watch::channel(Arc::new(vec!["a", "b"]));

        let result = with_optimistic_update(&tx, |v: &mut Vec<&str>| v.clear(), async {
            assert!(rx.borrow().is_empty());
            Ok(())
        })
        .await;

        assert!(result.is_ok());
    }
}
