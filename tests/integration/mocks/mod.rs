//! Mock implementations for testing purposes.
//!
//! This module contains mock implementations of the traits the balance
//! monitor is built on:
//! - Blockchain transports and clients
//! - Balance sources
//! - Notifiers
//!
//! The mocks are implemented using the `mockall` crate, next to a few
//! hand-written fakes for scenarios that need scripted streams.

mod clients;
mod notifiers;
mod sources;
mod transports;
#[allow(unused_imports)]
pub use clients::*;
#[allow(unused_imports)]
pub use notifiers::*;
#[allow(unused_imports)]
pub use sources::*;
#[allow(unused_imports)]
pub use transports::*;
