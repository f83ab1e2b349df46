use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::watch;
use tracing::debug;

use crate::{
    classifier::Flow,
    types::{Dispatch, FlowState},
};

/// Published state of one flow plus the generation of its newest request.
///
/// The generation is only bumped or compared inside the watch sender's lock.
pub(crate) struct FlowHandle<T> {
    flow: Flow,
    generation: AtomicU64,
    state: watch::Sender<FlowState<T>>,
}

impl<T: Send + Sync + 'static> FlowHandle<T> {
    pub(crate) fn new(flow: Flow) -> Arc<Self> {
        let (state, _) = watch::channel(FlowState::Idle);
        Arc::new(Self {
            flow,
            generation: AtomicU64::new(0),
            state,
        })
    }

    /// Moves the flow to `Loading` and hands out the ticket that settles it.
    pub(crate) fn begin(self: &Arc<Self>) -> Ticket<T> {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FlowState::Loading;
        });
        debug!(flow = self.flow.name(), generation, "request dispatched");
        Ticket {
            handle: Arc::clone(self),
            generation,
            settled: false,
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FlowState<T>> {
        self.state.subscribe()
    }

    pub(crate) fn snapshot(&self) -> FlowState<T>
    where
        T: Clone,
    {
        self.state.borrow().clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Exclusive right to resolve one dispatched request.
///
/// Dropping an unsettled ticket (an abandoned request future) returns the flow
/// to `Idle`.
pub(crate) struct Ticket<T: Send + Sync + 'static> {
    handle: Arc<FlowHandle<T>>,
    generation: u64,
    settled: bool,
}

impl<T: Send + Sync + 'static> Ticket<T> {
    pub(crate) fn settle(mut self, next: FlowState<T>) -> Dispatch {
        self.settled = true;
        let generation = self.generation;
        let handle = &self.handle;
        let applied = handle.state.send_if_modified(|state| {
            if !handle.is_current(generation) {
                return false;
            }
            *state = next;
            true
        });

        if applied {
            Dispatch::Applied
        } else {
            debug!(
                flow = handle.flow.name(),
                generation, "discarding response from superseded request"
            );
            Dispatch::Superseded
        }
    }
}

impl<T: Send + Sync + 'static> Drop for Ticket<T> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.generation;
        let handle = &self.handle;
        handle.state.send_if_modified(|state| {
            if !handle.is_current(generation) || !state.is_loading() {
                return false;
            }
            *state = FlowState::Idle;
            true
        });
        debug!(
            flow = handle.flow.name(),
            generation, "request abandoned before resolution"
        );
    }
}
