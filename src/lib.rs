pub mod api;
pub mod cli;
pub mod compare;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod game;
pub mod resolver;
pub mod services;

#[cfg(test)]
pub mod testutil;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::seeding::SeedService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::init_database(&mut conn)
}

pub fn handle_seed(file: &str) -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let service = SeedService::new(file.to_string());
    service.run(&pool)
}

pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "dartle.db".to_string())
}
