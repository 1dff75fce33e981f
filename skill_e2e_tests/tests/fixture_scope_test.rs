// tests/fixture_scope_test.rs
//
// Scoped fixture (before-all / after-all) against a real Postgres
//
// with_skill_fixture clears the whole `skill` table on entry, so everything
// lives in one test to keep it from racing other tests of this binary.
//
// Prerequisites: POSTGRES_URI (or DATABASE_URL) with the `skill` table.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use skill_e2e_tests::fixtures::{with_skill_fixture, FailurePolicy, FixtureManager, RUN_MARKER};
use skill_e2e_tests::logging::init_test_tracing;
use skill_e2e_tests::E2eConfig;

#[tokio::test]
#[ignore = "requires Postgres; clears the skill table"]
async fn test_scoped_fixture_always_tears_down() -> Result<()> {
    init_test_tracing();
    let config = E2eConfig::from_env()?;

    // 1. Body succeeds: the sample row is visible inside, gone afterwards
    let setup_key = with_skill_fixture(&config, |fixture| async move {
        let stored = fixture
            .db
            .lock()
            .await
            .fetch(&fixture.keys.insert_setup_key)
            .await?;
        assert_eq!(stored.as_ref(), Some(&fixture.sample));
        Ok::<_, anyhow::Error>(fixture.keys.insert_setup_key.clone())
    })
    .await?;

    assert!(setup_key.starts_with(RUN_MARKER));

    // 2. Body fails: the error comes back and teardown still ran
    let failed_key = Arc::new(Mutex::new(String::new()));
    let seen = Arc::clone(&failed_key);
    let result: Result<()> = with_skill_fixture(&config, |fixture| async move {
        *seen.lock().unwrap() = fixture.keys.insert_setup_key.clone();
        Err(anyhow::anyhow!("body failed on purpose"))
    })
    .await;

    assert!(result.unwrap_err().to_string().contains("on purpose"));
    let failed_key = failed_key.lock().unwrap().clone();
    assert!(failed_key.starts_with(RUN_MARKER));

    let mut db = FixtureManager::connect(&config.database_url, FailurePolicy::Strict).await?;
    assert_eq!(db.fetch(&setup_key).await?, None, "teardown removes the sample row");
    assert_eq!(db.fetch(&failed_key).await?, None, "teardown runs after a failing body");
    assert_eq!(db.count_by_marker(RUN_MARKER).await?, 0);
    db.disconnect().await?;
    Ok(())
}
