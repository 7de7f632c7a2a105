//! Typed publish/subscribe channel keyed by [`CardEventKind`].
//!
//! Listeners are stored per event kind and invoked synchronously, in
//! subscription order, with the payload by reference. The bus is
//! single-threaded and takes `&self` everywhere so it can be shared through
//! `Rc` between a stack and the cards feeding it.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use log::error;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::CardEventKind;

/// A subscribed callback.
pub type Listener<P> = Rc<dyn Fn(&P)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

struct Subscription<P> {
    id: ListenerId,
    listener: Listener<P>,
}

/// Most kinds have one or two listeners: the stack proxy and maybe a UI hook.
type SubscriptionList<P> = SmallVec<[Subscription<P>; 2]>;

/// Event bus for card events carrying payloads of type `P`.
///
/// Holds one subscription list per [`CardEventKind`] variant, indexed by
/// [`CardEventKind::index`].
///
/// ## Re-entrancy
///
/// `publish` snapshots the listener list before calling anything, so a
/// listener may subscribe, unsubscribe or publish on the same bus. Changes
/// take effect from the next publication.
///
/// ## Panics in listeners
///
/// Each invocation is isolated: a panicking listener is logged and the
/// remaining listeners still run.
///
/// ## Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use swipe_stack::events::{CardEventKind, EventBus};
///
/// let bus: EventBus<u32> = EventBus::new();
/// let total = Rc::new(Cell::new(0));
///
/// let sink = Rc::clone(&total);
/// let id = bus.subscribe(CardEventKind::DragMove, move |dx: &u32| sink.set(sink.get() + dx));
///
/// bus.publish(CardEventKind::DragMove, &5);
/// bus.publish(CardEventKind::DragEnd, &100); // nobody listening
/// assert_eq!(total.get(), 5);
///
/// assert!(bus.unsubscribe(id));
/// assert_eq!(bus.publish(CardEventKind::DragMove, &5), 0);
/// ```
pub struct EventBus<P> {
    listeners: RefCell<[SubscriptionList<P>; CardEventKind::COUNT]>,
    next_id: Cell<u64>,
}

impl<P> EventBus<P> {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(std::array::from_fn(|_| SmallVec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Register a listener for `kind`.
    pub fn subscribe(&self, kind: CardEventKind, listener: impl Fn(&P) + 'static) -> ListenerId {
        self.subscribe_rc(kind, Rc::new(listener))
    }

    /// Register an already shared listener for `kind`.
    pub fn subscribe_rc(&self, kind: CardEventKind, listener: Listener<P>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.listeners.borrow_mut()[kind.index()].push(Subscription { id, listener });
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        for subs in listeners.iter_mut() {
            if let Some(pos) = subs.iter().position(|s| s.id == id) {
                subs.remove(pos);
                return true;
            }
        }
        false
    }

    /// Invoke every listener of `kind` with `payload`.
    ///
    /// Returns the number of listeners invoked.
    pub fn publish(&self, kind: CardEventKind, payload: &P) -> usize {
        let snapshot: SmallVec<[Listener<P>; 4]> = self.listeners.borrow()[kind.index()]
            .iter()
            .map(|s| Rc::clone(&s.listener))
            .collect();

        for listener in &snapshot {
            let result = panic::catch_unwind(AssertUnwindSafe(|| listener(payload)));
            if result.is_err() {
                error!("listener for `{}` panicked; continuing with the rest", kind);
            }
        }
        snapshot.len()
    }

    /// Number of listeners subscribed to `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: CardEventKind) -> usize {
        self.listeners.borrow()[kind.index()].len()
    }

    /// Check if nothing is subscribed to any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().iter().all(|subs| subs.is_empty())
    }

    /// Drop every listener.
    pub fn clear(&self) {
        for subs in self.listeners.borrow_mut().iter_mut() {
            subs.clear();
        }
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.borrow();
        let counts: Vec<_> = CardEventKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let n = listeners[kind.index()].len();
                (n > 0).then_some((kind, n))
            })
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
