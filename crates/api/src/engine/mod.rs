//! Mutation engine.
//!
//! Every write follows the same sequence: persist, append to the change
//! log (entries only), then publish on the [`EventBus`](cuadrante_events::EventBus).
//! The steps are not transactional; a failure part-way leaves the earlier
//! steps applied.

pub mod calendar;
pub mod users;

pub use calendar::CalendarEngine;
pub use users::UserEngine;
