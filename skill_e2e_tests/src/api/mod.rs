// api/mod.rs - Client side of the skills REST API
//
// Nothing here implements the API. These are the pieces a test group needs
// to talk to it and check what comes back:
//   client   - reqwest client with the fixed Accept/Authorization headers
//   types    - request payloads
//   envelope - the {status, data|message} wrapper and its assertions
//   matching - subset matching of JSON values
//   poll     - waiting for accepted writes to become visible

pub mod client;
pub mod envelope;
pub mod matching;
pub mod poll;
pub mod types;

pub use client::SkillsClient;
pub use envelope::{ApiResponse, Envelope, SkillAction};
pub use poll::poll_until;
pub use types::{CreateSkill, UpdateSkill};
