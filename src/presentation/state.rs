use std::future::Future;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

/// Observable state snapshot owned by a state holder
///
/// Every transition replaces the snapshot under the channel's lock and
/// notifies subscribers. Work spawned through the cell is aborted when the
/// cell is dropped, and anything that still completes afterwards writes
/// through a `WeakState` that no longer upgrades.
pub(crate) struct StateCell<S> {
    state: Arc<watch::Sender<S>>,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl<S> StateCell<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    pub(crate) fn update(&self, modify: impl FnOnce(&mut S)) {
        self.state.send_modify(modify);
    }

    pub(crate) fn downgrade(&self) -> WeakState<S> {
        WeakState(Arc::downgrade(&self.state))
    }

    /// Spawns work owned by this cell
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn<F>(&self, work: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(work);

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle.abort_handle());

        handle
    }
}

impl<S> Drop for StateCell<S> {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(|e| e.into_inner());
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

/// Handle used by spawned work to apply its result
pub(crate) struct WeakState<S>(Weak<watch::Sender<S>>);

impl<S> WeakState<S> {
    /// Applies `modify` if the owning holder is still alive
    ///
    /// Returns `false` when the holder has been torn down, in which case
    /// nothing is written.
    ///
    /// The upgrade and the write are not atomic with the holder's drop. If
    /// the holder is dropped after the upgrade succeeds, this one write still
    /// lands and receivers that outlive the holder observe it. The upgraded
    /// sender lives only for the duration of the write, after which the
    /// channel closes and every later call returns `false`.
    pub(crate) fn update(&self, modify: impl FnOnce(&mut S)) -> bool {
        match self.0.upgrade() {
            Some(state) => {
                state.send_modify(modify);
                true
            }
            None => {
                tracing::debug!("state holder dropped; discarding result");
                false
            }
        }
    }
}
