// fixtures/keygen.rs - Collision-resistant fixture keys
//
// Every key a fixture creates starts with RUN_MARKER. Teardown deletes by
// that prefix, so rows written by a run can be swept without touching data
// that belongs to anyone else.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Prefix carried by every key generated for e2e fixtures
pub const RUN_MARKER: &str = "e2e_";

/// Number of random characters appended to the marker by default
pub const DEFAULT_KEY_LENGTH: usize = 10;

/// RUN_MARKER followed by `length` characters drawn uniformly from
/// `A-Z a-z 0-9`. Not suitable for secrets.
pub fn generate(length: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();

    format!("{}{}", RUN_MARKER, suffix)
}

/// Keys used by one test group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDataKeys {
    /// Key of the sample row inserted before the group runs
    pub insert_setup_key: String,
    /// Fresh key for the `POST /skills` step
    pub create_skill_key: String,
}

impl TestDataKeys {
    pub fn generate() -> Self {
        Self {
            insert_setup_key: generate(DEFAULT_KEY_LENGTH),
            create_skill_key: generate(DEFAULT_KEY_LENGTH),
        }
    }
}
