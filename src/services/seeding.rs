use anyhow::{Context, Result};
use log::info;

use crate::database::{self, players, DbPool};
use crate::domain::PlayerRecord;

/// Imports player records from a JSON file maintained by the external
/// data pipeline. Existing players are refreshed in place, keyed on the
/// full name.
pub struct SeedService {
    path: String,
}

impl SeedService {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    pub fn run(&self, pool: &DbPool) -> Result<()> {
        info!("=== Starting Player Seed ===");

        let records = self.load_records()?;
        info!("  → Loaded {} players from {}", records.len(), self.path);

        let mut conn = database::get_connection(pool)?;
        database::setup::init_database(&mut conn)?;

        let mut upserted = 0usize;
        for record in &records {
            players::upsert_player(&mut conn, record)
                .with_context(|| format!("Failed to seed {}", record.full_name()))?;
            upserted += 1;
        }
        info!("  → Upserted {upserted} players");

        info!("=== Seed Complete ===");
        Ok(())
    }

    fn load_records(&self) -> Result<Vec<PlayerRecord>> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read seed file {}", self.path))?;
        serde_json::from_str(&raw).context("Failed to parse seed file")
    }
}
