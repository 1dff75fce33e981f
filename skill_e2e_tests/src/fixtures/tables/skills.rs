// fixtures/tables/skills.rs
//
// The `skill` table and the sample rows the e2e groups work with.
//
// The API reads and writes this table; the fixture only needs to put known
// rows in and take them out again.

use crate::fixtures::TestTable;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `skill` table, also the `data` payload of the API
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Skill {
    pub key: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub tags: Vec<String>,
}

impl Skill {
    /// The Playwright row inserted before every test group
    pub fn playwright_sample(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: "E2E Playwright".to_string(),
            description: "Playwright is a Node.js library to automate the Chromium, WebKit, and Firefox browsers with a single API.".to_string(),
            logo: "https://playwright.dev/img/playwright-logo.svg".to_string(),
            tags: tags(&["node", "javascript", "typescript", "automation", "testing"]),
        }
    }

    /// The Jest skill created through `POST /skills`
    pub fn jest_sample(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: "E2E Jest".to_string(),
            description: "Jest is a delightful JavaScript Testing Framework with a focus on simplicity.".to_string(),
            logo: "https://jestjs.io/img/jest.svg".to_string(),
            tags: tags(&["node", "javascript", "typescript", "testing"]),
        }
    }

    /// True if every tag of `other` is present here (order and duplicates ignored)
    pub fn has_all_tags<I, S>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        other
            .into_iter()
            .all(|wanted| self.tags.iter().any(|t| t == wanted.as_ref()))
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub struct SkillTable;

impl TestTable for SkillTable {
    fn setup_sql() -> &'static [&'static str] {
        &[r#"
            CREATE TABLE IF NOT EXISTS skill (
                key TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                logo TEXT NOT NULL,
                tags TEXT[] NOT NULL DEFAULT '{}'
            )
            "#]
    }
}
