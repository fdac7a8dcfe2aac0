//! Integration test utilities for the client
//!
//! This crate runs the real HTTP transport against an in-process stub of the
//! emoji REST endpoints.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
