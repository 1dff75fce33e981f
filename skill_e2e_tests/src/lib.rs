// lib.rs - Root module for the skill_e2e_tests library
//
// End-to-end checks for the skills REST API. The library holds what the
// test binaries in tests/ share: database fixtures, the API client, and the
// envelope assertions.

pub mod api;
pub mod config;
pub mod error;
/// Database fixtures: run-marker keys, the `skill` table, setup and teardown
pub mod fixtures;
pub mod logging;

pub use config::E2eConfig;
pub use error::{E2eError, Result};
