use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::protocol::{BridgeEvent, WindowId};

/// Delivers host → surface events. Implementations must address exactly
/// one window; there is no broadcast.
pub trait EventSink: Send + Sync {
    fn emit(&self, window: &WindowId, event: BridgeEvent) -> Result<()>;
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, window: &WindowId, event: BridgeEvent) -> Result<()> {
        (**self).emit(window, event)
    }
}

type Listeners = HashMap<WindowId, Vec<(u64, mpsc::UnboundedSender<BridgeEvent>)>>;

#[derive(Default)]
struct HubState {
    next_id: u64,
    listeners: Listeners,
}

/// In-process event routing keyed by window.
///
/// Each [`EventHub::subscribe`] call hands back a [`Subscription`]; dropping
/// it unregisters the listener, so a torn-down surface leaves nothing behind.
#[derive(Clone, Default)]
pub struct EventHub {
    state: Arc<Mutex<HubState>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        window: &WindowId,
    ) -> (Subscription, mpsc::UnboundedReceiver<BridgeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state
            .listeners
            .entry(window.clone())
            .or_default()
            .push((id, tx));
        let subscription = Subscription {
            state: Arc::downgrade(&self.state),
            window: window.clone(),
            id,
        };
        (subscription, rx)
    }

    pub fn listener_count(&self, window: &WindowId) -> usize {
        self.state
            .lock()
            .listeners
            .get(window)
            .map_or(0, Vec::len)
    }
}

impl EventSink for EventHub {
    fn emit(&self, window: &WindowId, event: BridgeEvent) -> Result<()> {
        let mut state = self.state.lock();
        let Some(listeners) = state.listeners.get_mut(window) else {
            log::debug!("no listener for {window}, dropping {event:?}");
            return Ok(());
        };
        // Receivers dropped without their subscription are pruned here.
        listeners.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        Ok(())
    }
}

/// Registration handle returned by [`EventHub::subscribe`].
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    state: Weak<Mutex<HubState>>,
    window: WindowId,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state.lock();
        if let Some(listeners) = state.listeners.get_mut(&self.window) {
            listeners.retain(|(id, _)| *id != self.id);
            if listeners.is_empty() {
                state.listeners.remove(&self.window);
            }
        }
    }
}
