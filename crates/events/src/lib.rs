//! In-process domain events and the view-invalidation signal.
//!
//! Write operations publish a [`DomainEvent`] naming the logical views made
//! stale by the mutation. The rendering layer (or any other consumer)
//! subscribes to the bus and decides how to act; the core never re-renders
//! anything itself.

pub mod bus;

pub use bus::{DomainEvent, EventBus, StaleView};
