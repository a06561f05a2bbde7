use std::cell::Cell;
use std::rc::Rc;

use crate::event_bus::{ListenerControl, PointerBus, Subscription};
use crate::node::NodeId;

/// Outside-click detection for one widget.
///
/// While armed, a listener sits on the pointer bus; the first pointer-down
/// whose path does not pass through `root` disarms it and detaches the
/// listener. Disarming or dropping detaches it as well, so a closed or
/// unmounted widget never leaves a listener behind.
#[derive(Debug)]
pub struct ClickOutside {
    root: NodeId,
    armed: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl ClickOutside {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            armed: Rc::new(Cell::new(false)),
            subscription: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// True while a listener for this widget is attached to a bus.
    pub fn is_listening(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn arm(&mut self, bus: &PointerBus) {
        if self.is_armed() {
            return;
        }
        // A listener that already fired has detached; release its handle.
        self.subscription = None;
        self.armed.set(true);

        let armed = Rc::clone(&self.armed);
        let root = self.root;
        self.subscription = Some(bus.subscribe(move |event| {
            if event.is_within(root) {
                ListenerControl::Keep
            } else {
                armed.set(false);
                ListenerControl::Detach
            }
        }));
    }

    pub fn disarm(&mut self) {
        self.armed.set(false);
        self.subscription = None;
    }
}
