//! Applies a batch of external place records to the stored locations.
//!
//! Usage: `tasteranker-reconcile <records.json> [config-path]`

use std::fs;
use std::process::ExitCode;

use tasteranker::db::establish_connection_pool_with;
use tasteranker::forms::places::ExternalPlaceRecord;
use tasteranker::models::config::ServerConfig;
use tasteranker::repository::DieselRepository;
use tasteranker::services::reconcile::reconcile_batch;

const DEFAULT_CONFIG_PATH: &str = "config/tasteranker";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = std::env::args().skip(1);
    let Some(records_path) = args.next() else {
        log::error!("Usage: tasteranker-reconcile <records.json> [config-path]");
        return ExitCode::from(2);
    };
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let server_config = match ServerConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration from {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool_with(
        &server_config.database_url,
        server_config.pool_options(),
    ) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };
    let repo = DieselRepository::new(pool);

    let records: Vec<ExternalPlaceRecord> = match fs::read_to_string(&records_path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to read place records from {records_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = reconcile_batch(records, &repo);
    log::info!(
        "Processed {} records: {} reconciled, {} unmatched, {} failed",
        summary.total(),
        summary.reconciled,
        summary.unmatched,
        summary.failed
    );

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
