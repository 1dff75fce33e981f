// fixtures/scope.rs - Before-all / after-all wrapper for a test group
//
// with_skill_fixture runs a whole group against one fixture:
//   1. connect and clear the `skill` table
//   2. insert the sample row under a freshly generated key
//   3. run the group body
//   4. delete rows carrying RUN_MARKER and disconnect
//
// Step 4 runs whether the body returned Ok, returned Err or panicked. The
// body runs on its own tokio task so a failed assertion surfaces as a
// JoinError here instead of unwinding past the teardown.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::E2eConfig;
use crate::error::{E2eError, Result};
use crate::fixtures::{FixtureManager, Skill, TestDataKeys, RUN_MARKER};

/// What a test group gets to work with
#[derive(Debug, Clone)]
pub struct SkillFixture {
    pub keys: TestDataKeys,
    /// The row inserted before the group started
    pub sample: Skill,
    /// The fixture's database connection, for checks that bypass the API
    pub db: Arc<Mutex<FixtureManager>>,
}

pub async fn with_skill_fixture<F, Fut, T, E>(config: &E2eConfig, body: F) -> std::result::Result<T, E>
where
    F: FnOnce(SkillFixture) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<E2eError> + Send + 'static,
{
    let mut db = FixtureManager::connect_and_clear(&config.database_url, config.fixture_policy).await?;

    let keys = TestDataKeys::generate();
    let sample = match db.insert_sample(&keys.insert_setup_key).await {
        Ok(sample) => sample,
        Err(e) => {
            if let Err(close_err) = db.disconnect().await {
                warn!(error = %close_err, "Disconnect after failed setup also failed");
            }
            return Err(e.into());
        }
    };

    let db = Arc::new(Mutex::new(db));
    let fixture = SkillFixture {
        keys,
        sample,
        db: Arc::clone(&db),
    };

    info!(key = %fixture.keys.insert_setup_key, "Fixture ready");
    let outcome = tokio::spawn(body(fixture)).await;

    let teardown = teardown(db).await;

    match outcome {
        Ok(Ok(value)) => teardown.map(|_| value).map_err(E::from),
        Ok(Err(e)) => {
            if let Err(td) = teardown {
                error!(error = %td, "Fixture teardown failed after a failing test body");
            }
            Err(e)
        }
        Err(join_err) => {
            if let Err(td) = teardown {
                error!(error = %td, "Fixture teardown failed after a panicking test body");
            }
            if join_err.is_panic() {
                std::panic::resume_unwind(join_err.into_panic());
            }
            Err(E::from(E2eError::BodyAborted(join_err.to_string())))
        }
    }
}

/// Delete this run's rows, then close the connection.
///
/// Both steps run even if the first one fails; the first error wins.
async fn teardown(db: Arc<Mutex<FixtureManager>>) -> Result<()> {
    let swept = db.lock().await.delete_by_marker(RUN_MARKER).await;

    let closed = match Arc::try_unwrap(db) {
        Ok(manager) => manager.into_inner().disconnect().await,
        Err(_) => {
            warn!("Fixture connection still shared; it closes when the last handle drops");
            Ok(())
        }
    };

    swept.and(closed)
}
