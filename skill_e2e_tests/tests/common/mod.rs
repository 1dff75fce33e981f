// common/mod.rs - Shared helpers for the e2e test binaries
//
// Live tests need a running skills API and its Postgres database. They are
// #[ignore]d so a plain `cargo test` stays offline; run them with
//   cargo test -- --ignored
// after exporting POSTGRES_URI, API_BASE_URL and API_TOKEN (or writing a .env).

#![allow(dead_code)]

use serde_json::{json, Value};

use skill_e2e_tests::api::SkillsClient;
use skill_e2e_tests::fixtures::Skill;
use skill_e2e_tests::logging::init_test_tracing;
use skill_e2e_tests::E2eConfig;

/// Config and API client for a live run
pub fn live_setup() -> anyhow::Result<(E2eConfig, SkillsClient)> {
    init_test_tracing();
    let config = E2eConfig::from_env()?;
    let client = SkillsClient::from_config(&config)?;
    Ok((config, client))
}

/// The fields a response must contain for `skill`, tags compared as a set
pub fn expected_skill(skill: &Skill) -> Value {
    json!({
        "key": skill.key,
        "name": skill.name,
        "description": skill.description,
        "logo": skill.logo,
        "tags": skill.tags,
    })
}
