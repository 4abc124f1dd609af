//! Background workers
//!
//! The dashboard worker owns the controller; the UI talks to it through channels.

pub mod core;
pub mod poller;
