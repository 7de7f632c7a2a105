//! Shared spring system.
//!
//! One `SpringSystem` exists per stack. It is handed to every card as an
//! `Rc<SpringSystem>`; cards create springs on it and the host loop calls
//! [`SpringSystem::step`] once per frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

use super::spring::{Spring, SpringConfig};

/// Displacement below which a spring counts as settled.
pub const REST_DISPLACEMENT: f64 = 0.001;

/// Speed below which a spring counts as settled.
pub const REST_VELOCITY: f64 = 0.001;

/// Identifier of a spring within one system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpringId(pub u32);

impl SpringId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SpringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spring({})", self.0)
    }
}

/// Callback invoked after a step with the spring's new position.
pub type SpringListener = Rc<dyn Fn(SpringId, f64)>;

/// Handle returned by [`SpringSystem::on_update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpringListenerId(pub u64);

/// Single-threaded spring simulation shared by every card of a stack.
///
/// All methods take `&self`; state lives behind `RefCell`s so the system
/// can be shared through `Rc` without the stack ever mutating it.
#[derive(Default)]
pub struct SpringSystem {
    springs: RefCell<FxHashMap<SpringId, Spring>>,
    listeners: RefCell<Vec<(SpringListenerId, SpringListener)>>,
    next_id: Cell<u32>,
    next_listener_id: Cell<u64>,
}

impl SpringSystem {
    /// Create an empty system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spring resting at `initial`.
    pub fn create_spring(&self, config: SpringConfig, initial: f64) -> Result<SpringId, PhysicsError> {
        let spring = Spring::new(config, initial)?;
        let id = SpringId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.springs.borrow_mut().insert(id, spring);
        Ok(id)
    }

    /// Remove a spring. Returns `false` if it did not exist.
    pub fn destroy_spring(&self, id: SpringId) -> bool {
        self.springs.borrow_mut().remove(&id).is_some()
    }

    /// Run `f` against a spring.
    pub fn with_spring<R>(&self, id: SpringId, f: impl FnOnce(&mut Spring) -> R) -> Result<R, PhysicsError> {
        let mut springs = self.springs.borrow_mut();
        let spring = springs
            .get_mut(&id)
            .ok_or(PhysicsError::SpringNotFound(id.0))?;
        Ok(f(spring))
    }

    pub fn set_end_value(&self, id: SpringId, end_value: f64) -> Result<(), PhysicsError> {
        self.with_spring(id, |s| s.set_end_value(end_value))
    }

    pub fn set_current_value(&self, id: SpringId, value: f64) -> Result<(), PhysicsError> {
        self.with_spring(id, |s| s.set_current_value(value))
    }

    pub fn set_velocity(&self, id: SpringId, velocity: f64) -> Result<(), PhysicsError> {
        self.with_spring(id, |s| s.set_velocity(velocity))
    }

    /// Current position of a spring, if it exists.
    #[must_use]
    pub fn value(&self, id: SpringId) -> Option<f64> {
        self.springs.borrow().get(&id).map(Spring::value)
    }

    /// Current velocity of a spring, if it exists.
    #[must_use]
    pub fn velocity(&self, id: SpringId) -> Option<f64> {
        self.springs.borrow().get(&id).map(Spring::velocity)
    }

    /// Register a listener notified for every spring that moved during a step.
    ///
    /// The listener stays registered until passed to
    /// [`SpringSystem::remove_listener`].
    pub fn on_update(&self, listener: impl Fn(SpringId, f64) + 'static) -> SpringListenerId {
        let id = SpringListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove an update listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: SpringListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|(l, _)| *l == id) {
            Some(pos) => {
                listeners.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of registered update listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Advance every moving spring by `dt` seconds.
    ///
    /// Settled springs are snapped to their end value and skipped.
    /// Listeners run after all springs have moved, in spring ID order, and
    /// may call back into the system. Returns the number of springs that
    /// moved.
    pub fn step(&self, dt: f64) -> Result<usize, PhysicsError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        let mut moved: Vec<(SpringId, f64)> = {
            let mut springs = self.springs.borrow_mut();
            springs
                .iter_mut()
                .filter(|(_, s)| !s.is_at_rest(REST_DISPLACEMENT, REST_VELOCITY))
                .map(|(id, s)| {
                    s.update(dt);
                    if s.is_at_rest(REST_DISPLACEMENT, REST_VELOCITY) {
                        s.snap_to_end();
                    }
                    (*id, s.value())
                })
                .collect()
        };
        moved.sort_unstable_by_key(|(id, _)| *id);

        let listeners: Vec<SpringListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for (id, value) in &moved {
            for listener in &listeners {
                listener(*id, *value);
            }
        }

        Ok(moved.len())
    }

    /// Check if every spring is settled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.springs
            .borrow()
            .values()
            .all(|s| s.is_at_rest(REST_DISPLACEMENT, REST_VELOCITY))
    }

    /// Number of live springs.
    #[must_use]
    pub fn spring_count(&self) -> usize {
        self.springs.borrow().len()
    }
}

impl std::fmt::Debug for SpringSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpringSystem")
            .field("springs", &self.spring_count())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
