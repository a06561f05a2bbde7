use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::node::NodeId;

/// A pointer-down somewhere in the host UI.
///
/// `path` runs from the event target up through its ancestors, like a DOM
/// composed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub path: Vec<NodeId>,
}

impl PointerEvent {
    pub fn new(path: Vec<NodeId>) -> Self {
        Self { path }
    }

    pub fn target(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    /// True if the event target is `root` or one of its descendants.
    pub fn is_within(&self, root: NodeId) -> bool {
        self.path.contains(&root)
    }
}

/// What a listener wants after handling an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ListenerControl {
    Keep,
    Detach,
}

type Listener = Box<dyn FnMut(&PointerEvent) -> ListenerControl>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
    dispatching: bool,
    dropped_during_dispatch: Vec<u64>,
}

/// Process-wide stream of pointer-down events.
///
/// Cloning yields another handle to the same bus. Listeners run in
/// subscription order and may detach themselves or drop other subscriptions
/// while an event is being dispatched.
#[derive(Clone, Default)]
pub struct PointerBus {
    inner: Rc<RefCell<Listeners>>,
}

impl std::fmt::Debug for PointerBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`; it stays attached until it returns
    /// [`ListenerControl::Detach`] or the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PointerEvent) -> ListenerControl + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(id, Box::new(listener));
        tracing::trace!(listener = id, "pointer listener attached");
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to every attached listener; returns how many ran.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let mut running = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatching = true;
            std::mem::take(&mut inner.entries)
        };

        let mut detached = Vec::new();
        for (id, listener) in running.iter_mut() {
            if listener(event) == ListenerControl::Detach {
                detached.push(*id);
            }
        }
        let ran = running.len();

        let mut inner = self.inner.borrow_mut();
        inner.dispatching = false;
        let dropped = std::mem::take(&mut inner.dropped_during_dispatch);
        for (id, listener) in running {
            if detached.contains(&id) || dropped.contains(&id) {
                tracing::trace!(listener = id, "pointer listener detached");
                continue;
            }
            inner.entries.insert(id, listener);
        }
        ran
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Keeps a listener attached; dropping it detaches the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// False once the listener detached itself or the bus is gone.
    pub fn is_active(&self) -> bool {
        self.bus
            .upgrade()
            .map(|bus| bus.borrow().entries.contains_key(&self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        let Ok(mut inner) = bus.try_borrow_mut() else {
            return;
        };
        inner.entries.remove(&self.id);
        if inner.dispatching {
            inner.dropped_during_dispatch.push(self.id);
        }
    }
}
