// Manual fixture tool for the skills e2e suite
//
// Useful when running the API by hand: seed the sample row, look at what is
// in the table, or sweep leftovers from an interrupted run.

use anyhow::Result;
use clap::{Parser, Subcommand};

use skill_e2e_tests::fixtures::{generate, FixtureManager, RUN_MARKER};
use skill_e2e_tests::fixtures::keygen::DEFAULT_KEY_LENGTH;
use skill_e2e_tests::logging::init_tracing;
use skill_e2e_tests::E2eConfig;

#[derive(Debug, Parser)]
#[command(name = "skill_fixtures", about = "Set up and tear down skills e2e fixtures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect and report how many rows the skill table holds
    Check,
    /// Create the table if needed and insert the sample skill
    Seed {
        /// Key for the sample row (generated when omitted)
        #[arg(long)]
        key: Option<String>,
    },
    /// Delete rows whose key starts with the run marker
    Sweep {
        #[arg(long, default_value = RUN_MARKER)]
        prefix: String,
    },
    /// Delete every row of the skill table
    Clear,
}

fn main() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = E2eConfig::from_env()?;

    match cli.command {
        Command::Check => {
            let mut db = FixtureManager::connect(&config.database_url, config.fixture_policy).await?;
            let total = db.count_all().await?;
            let ours = db.count_by_marker(RUN_MARKER).await?;
            println!("✓ Connected. skill rows: {} ({} with prefix {})", total, ours, RUN_MARKER);
            db.disconnect().await?;
        }
        Command::Seed { key } => {
            let key = key.unwrap_or_else(|| generate(DEFAULT_KEY_LENGTH));
            let mut db = FixtureManager::connect(&config.database_url, config.fixture_policy).await?;
            db.ensure_schema().await?;
            let sample = db.insert_sample(&key).await?;
            println!("✓ Seeded {} ({})", sample.key, sample.name);
            db.disconnect().await?;
        }
        Command::Sweep { prefix } => {
            let mut db = FixtureManager::connect(&config.database_url, config.fixture_policy).await?;
            let deleted = db.delete_by_marker(&prefix).await?;
            println!("✓ Deleted {} rows with prefix {}", deleted, prefix);
            db.disconnect().await?;
        }
        Command::Clear => {
            let db = FixtureManager::connect_and_clear(&config.database_url, config.fixture_policy).await?;
            println!("✓ Cleared skill table");
            db.disconnect().await?;
        }
    }

    Ok(())
}
