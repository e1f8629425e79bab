//! Domain event system.
//!
//! Every domain operation in the client (ticket lifecycle, change approval,
//! asset updates, ...) publishes what happened here:
//! - `EventBus`: in-memory broadcast channel fanning events out to consumers
//! - The notification center attaches the primary receiver; debugging taps
//!   and activity feeds attach their own
//!
//! Emission is fire-and-forget: publishers never learn whether anyone listened.

mod event_bus;

pub use event_bus::{DomainEvent, EventBus};
