//! Empire CEO: a business-simulation game core.
//!
//! A player builds a CEO profile, registers a startup, and then watches
//! the business advance one simulated day at a time.

pub mod catalog;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod notify;
pub mod profile;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod types;
