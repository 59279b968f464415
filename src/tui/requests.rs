//! Scoped network requests.
//!
//! Every request runs as a tokio task owned by a [`RequestSet`]. The task
//! delivers its outcome back into the event loop as an [`AppEvent`]; the
//! loop then calls [`RequestSet::complete`] to release the slot. Dropping
//! the set aborts whatever is still in flight.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::events::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

pub struct RequestSet {
    next_id: u64,
    in_flight: HashMap<RequestId, JoinHandle<()>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl RequestSet {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            next_id: 0,
            in_flight: HashMap::new(),
            event_tx,
        }
    }

    /// Run `future` on the runtime and turn its output into an event.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, T, D>(&mut self, future: F, deliver: D) -> RequestId
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        D: FnOnce(RequestId, T) -> AppEvent + Send + 'static,
    {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        let tx = self.event_tx.clone();

        let handle = tokio::spawn(async move {
            let output = future.await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(deliver(id, output));
        });

        self.in_flight.insert(id, handle);
        id
    }

    /// Release a finished request. Returns `false` for unknown ids.
    pub fn complete(&mut self, id: RequestId) -> bool {
        self.in_flight.remove(&id).is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn abort_all(&mut self) {
        for (id, handle) in self.in_flight.drain() {
            log::debug!("Aborting in-flight request {id:?}");
            handle.abort();
        }
    }
}

impl Drop for RequestSet {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::events::Action;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_completion_is_delivered_and_released() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut set = RequestSet::new(tx);

        let id = set.spawn(async { 7u32 }, |_, n| {
            assert_eq!(n, 7);
            AppEvent::Action(Action::Quit)
        });
        assert_eq!(set.in_flight(), 1);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Action(Action::Quit)));
        assert!(set.complete(id));
        assert!(!set.complete(id));
        assert_eq!(set.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_drop_aborts_pending_requests() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut set = RequestSet::new(tx);
        let (guard_tx, guard_rx) = oneshot::channel::<()>();

        set.spawn(
            async move {
                let _guard = guard_tx;
                futures::future::pending::<()>().await;
            },
            |_, _| AppEvent::Action(Action::Quit),
        );

        drop(set);
        // The aborted task drops its guard without sending.
        assert!(guard_rx.await.is_err());
    }
}
