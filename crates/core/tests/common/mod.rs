//! Common test utilities shared by the integration suites.
//!
//! This module provides:
//! - Schema providers used as fixtures
//! - Helpers for editing persisted config files
//! - Custom assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;
