// fixtures/manager.rs - Single-connection fixture manager
//
// Owns exactly one Postgres connection for the lifetime of a test group.
// Queries are issued one at a time; nothing here runs concurrently.
//
// Every operation goes through `settle`, which applies the FailurePolicy:
//   Strict  -> the error is returned to the caller
//   Lenient -> the error is logged and an empty result is returned
//
// Under Lenient a failed connect still yields a manager. It has no
// connection, and every later call logs NotConnected and does nothing.

use sqlx::{Connection, PgConnection};
use tracing::{debug, error, info};

use crate::error::{E2eError, Result};
use crate::fixtures::{FailurePolicy, Skill, SkillTable, TestTable};

pub struct FixtureManager {
    conn: Option<PgConnection>,
    policy: FailurePolicy,
}

impl std::fmt::Debug for FixtureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureManager")
            .field("connected", &self.conn.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}

impl FixtureManager {
    /// Open the connection, then delete every row of `skill`
    pub async fn connect_and_clear(database_url: &str, policy: FailurePolicy) -> Result<Self> {
        let mut manager = Self::connect(database_url, policy).await?;
        manager.clear().await?;
        Ok(manager)
    }

    /// Open the connection without touching existing rows
    pub async fn connect(database_url: &str, policy: FailurePolicy) -> Result<Self> {
        let conn = match PgConnection::connect(database_url).await {
            Ok(conn) => {
                info!("Connected to Postgres database");
                Some(conn)
            }
            Err(e) => match policy {
                FailurePolicy::Strict => return Err(e.into()),
                FailurePolicy::Lenient => {
                    error!(error = %e, "Error connecting to database");
                    None
                }
            },
        };

        Ok(Self { conn, policy })
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Create the `skill` table if it does not exist yet
    pub async fn ensure_schema(&mut self) -> Result<()> {
        let result = async {
            let conn = self.conn()?;
            for sql in SkillTable::setup_sql() {
                sqlx::query(sql).execute(&mut *conn).await?;
            }
            Ok::<_, E2eError>(())
        }
        .await;

        self.settle("ensure_schema", result)
    }

    /// Delete every row, whoever wrote it. Returns the number of rows removed.
    pub async fn clear(&mut self) -> Result<u64> {
        let result = async {
            let conn = self.conn()?;
            let done = sqlx::query("DELETE FROM skill").execute(conn).await?;
            Ok::<_, E2eError>(done.rows_affected())
        }
        .await;

        if let Ok(count) = &result {
            debug!(count = *count, "Cleared skill table");
        }
        self.settle("clear", result)
    }

    pub async fn insert(&mut self, skill: &Skill) -> Result<()> {
        let result = async {
            let conn = self.conn()?;
            sqlx::query(
                "INSERT INTO skill (key, name, description, logo, tags) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&skill.key)
            .bind(&skill.name)
            .bind(&skill.description)
            .bind(&skill.logo)
            .bind(&skill.tags)
            .execute(conn)
            .await?;
            Ok::<_, E2eError>(())
        }
        .await;

        if result.is_ok() {
            info!(key = %skill.key, "Inserted skill");
        }
        self.settle("insert", result)
    }

    /// Insert the Playwright sample row under `key`
    pub async fn insert_sample(&mut self, key: &str) -> Result<Skill> {
        let sample = Skill::playwright_sample(key);
        self.insert(&sample).await?;
        Ok(sample)
    }

    /// Delete rows whose key starts with `prefix`.
    ///
    /// The prefix is compared literally, so `_` and `%` in a marker are not
    /// wildcards. Running it again removes nothing and is not an error.
    pub async fn delete_by_marker(&mut self, prefix: &str) -> Result<u64> {
        if prefix.is_empty() {
            return Err(E2eError::InvalidConfig {
                name: "marker",
                reason: "an empty prefix would match every row".to_string(),
            });
        }

        let result = async {
            let conn = self.conn()?;
            let done = sqlx::query(
                "DELETE FROM skill WHERE left(key, char_length($1::text)) = $1::text",
            )
            .bind(prefix)
            .execute(conn)
            .await?;
            Ok::<_, E2eError>(done.rows_affected())
        }
        .await;

        if let Ok(count) = &result {
            info!(prefix, count = *count, "Deleted fixture rows");
        }
        self.settle("delete_by_marker", result)
    }

    pub async fn fetch(&mut self, key: &str) -> Result<Option<Skill>> {
        let result = async {
            let conn = self.conn()?;
            let skill = sqlx::query_as::<_, Skill>(
                "SELECT key, name, description, logo, tags FROM skill WHERE key = $1",
            )
            .bind(key)
            .fetch_optional(conn)
            .await?;
            Ok::<_, E2eError>(skill)
        }
        .await;

        self.settle("fetch", result)
    }

    pub async fn count_by_marker(&mut self, prefix: &str) -> Result<i64> {
        let result = async {
            let conn = self.conn()?;
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM skill WHERE left(key, char_length($1::text)) = $1::text",
            )
            .bind(prefix)
            .fetch_one(conn)
            .await?;
            Ok::<_, E2eError>(count)
        }
        .await;

        self.settle("count_by_marker", result)
    }

    pub async fn count_all(&mut self) -> Result<i64> {
        let result = async {
            let conn = self.conn()?;
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skill")
                .fetch_one(conn)
                .await?;
            Ok::<_, E2eError>(count)
        }
        .await;

        self.settle("count_all", result)
    }

    /// Close the connection
    pub async fn disconnect(mut self) -> Result<()> {
        let result = match self.conn.take() {
            Some(conn) => conn.close().await.map_err(E2eError::from),
            None => Err(E2eError::NotConnected),
        };

        if result.is_ok() {
            info!("Closed Postgres database connection");
        }
        self.settle("disconnect", result)
    }

    fn conn(&mut self) -> Result<&mut PgConnection> {
        self.conn.as_mut().ok_or(E2eError::NotConnected)
    }

    fn settle<T: Default>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        match (result, self.policy) {
            (Ok(value), _) => Ok(value),
            (Err(e), FailurePolicy::Strict) => Err(e),
            (Err(e), FailurePolicy::Lenient) => {
                error!(operation, error = %e, "Fixture operation failed");
                Ok(T::default())
            }
        }
    }
}
