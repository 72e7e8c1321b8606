//! droidflash - Main entry point
//!
//! Startup order matters: logging first, then configuration (built once
//! and passed by reference, no global), then the datastore connection.
//! A database connection failure at startup is the only exit code 1;
//! everything else, including an unrecoverable top-level error after its
//! message is printed, exits 0.

use droidflash::config::ToolConfig;
use droidflash::db::ActionLogger;
use droidflash::session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber; RUST_LOG overrides the default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    info!("droidflash starting up");
    std::process::exit(run());
}

fn run() -> i32 {
    let config = match ToolConfig::load_from_file(ToolConfig::DEFAULT_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return 0;
        }
    };

    let logger = match ActionLogger::connect(&config.database) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "Check the \"database\" section of {} and that the server is reachable.",
                ToolConfig::DEFAULT_PATH
            );
            return 1;
        }
    };

    let mut session = Session::new(&config, logger);
    if let Err(e) = session.run_menu_loop() {
        eprintln!("Session ended: {e}");
    }
    0
}
