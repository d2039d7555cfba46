//! Screen reducers: each owns one state cell and drives its fetches.
//!
//! # Design
//! `Screen` is the shared driver. It holds the only writer for a state cell
//! and at most one in-flight fetch task. Restarting bumps a generation
//! counter in the same critical section that publishes the reset state; a
//! fetch only publishes its result if the generation it was started with is
//! still current. A superseded fetch is also aborted, so a stale response can
//! never overwrite a newer loading state. Dropping the screen aborts the
//! in-flight fetch.
//!
//! Reducers must be created inside a tokio runtime.

mod detail;
mod list;

pub use detail::DetailReducer;
pub use list::ListReducer;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::result::FetchResult;
use crate::state::StateHandle;

pub(crate) struct Screen<S> {
    tx: Arc<watch::Sender<S>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<S> Screen<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    pub(crate) fn subscribe(&self) -> StateHandle<S> {
        StateHandle::new(self.tx.subscribe())
    }

    pub(crate) fn current(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Publish `reset`, drop any in-flight fetch, and start `fetch`.
    /// `apply` derives the next state from the current one once `fetch`
    /// resolves, unless another restart happened first.
    pub(crate) fn restart<D, F, A>(&mut self, reset: S, fetch: F, apply: A)
    where
        D: Send + 'static,
        F: Future<Output = FetchResult<D>> + Send + 'static,
        A: FnOnce(&S, FetchResult<D>) -> S + Send + 'static,
    {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let mut started = 0;
        self.tx.send_modify(|state| {
            started = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = reset;
        });

        let tx = Arc::clone(&self.tx);
        let generation = Arc::clone(&self.generation);
        self.task = Some(tokio::spawn(async move {
            let outcome = fetch.await;
            tx.send_if_modified(|state| {
                if generation.load(Ordering::SeqCst) != started {
                    debug!(started, "discarding superseded fetch result");
                    return false;
                }
                *state = apply(state, outcome);
                true
            });
        }));
    }
}

impl<S> Drop for Screen<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
