// fixtures/mod.rs - Test fixtures module
//
// A fixture is test-controlled data: inserted before a test group runs and
// removed after it finishes. For the skills API that means rows in the
// `skill` table, tagged with a run marker so teardown only removes what this
// run created.
//
// Layout:
//   keygen   - run marker and random key generation
//   tables   - table definitions and sample rows
//   manager  - the single-connection fixture manager
//   scope    - before-all / after-all wrapper around a test group

pub mod keygen;
pub mod manager;
pub mod scope;
pub mod tables;

use std::str::FromStr;

use crate::error::E2eError;

pub use keygen::{generate, TestDataKeys, RUN_MARKER};
pub use manager::FixtureManager;
pub use scope::{with_skill_fixture, SkillFixture};
pub use tables::{Skill, SkillTable};

/// A simple trait that all test tables must implement
pub trait TestTable {
    /// The SQL commands to create this table
    /// Returns a slice of SQL strings that should be executed in order
    fn setup_sql() -> &'static [&'static str];
}

/// What a fixture operation does when the database call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error; the test run fails at setup
    #[default]
    Strict,
    /// Log the error and carry on with an empty result
    Lenient,
}

impl FromStr for FailurePolicy {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FailurePolicy::Strict),
            "lenient" => Ok(FailurePolicy::Lenient),
            other => Err(E2eError::InvalidConfig {
                name: "E2E_FIXTURE_POLICY",
                reason: format!("expected `strict` or `lenient`, got `{other}`"),
            }),
        }
    }
}
