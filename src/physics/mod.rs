//! Spring physics shared by the cards of a stack.
//!
//! The stack owns exactly one [`SpringSystem`] and vends it to every card it
//! creates. The stack itself never steps or mutates the system; cards build
//! springs on it to animate throws and returns and release them in
//! [`Card::detach`](crate::cards::Card::detach), and the host loop steps it.
//!
//! ## Example
//!
//! ```
//! use swipe_stack::physics::{SpringConfig, SpringSystem};
//!
//! let system = SpringSystem::new();
//! let x = system.create_spring(SpringConfig::default(), 0.0).unwrap();
//!
//! // Card released 120px right of its origin: spring it back home.
//! system.set_current_value(x, 120.0).unwrap();
//! system.set_end_value(x, 0.0).unwrap();
//!
//! while !system.is_idle() {
//!     system.step(1.0 / 60.0).unwrap();
//! }
//! assert_eq!(system.value(x), Some(0.0));
//! ```

mod spring;
mod system;

pub use spring::{DampingMode, Spring, SpringConfig};
pub use system::{
    SpringId, SpringListener, SpringListenerId, SpringSystem, REST_DISPLACEMENT, REST_VELOCITY,
};
