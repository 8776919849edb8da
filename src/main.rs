use std::io;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use atm_console::account::AccountStore;
use atm_console::cli::{Atm, Console};
use atm_console::config::AtmConfig;

fn init_tracing(level: &str) {
    // Logs go to stderr so stdout carries only the ATM screens
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let config = AtmConfig::default();
    init_tracing(&config.log_level);

    let store = AccountStore::seeded(&config.seed_accounts);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());

    let mut atm = Atm::new(store, console, config.registration.clone());
    match atm.run() {
        Ok(end) => debug!(?end, accounts = atm.store().len(), "session finished"),
        Err(e) => error!("session aborted: {}", e),
    }
}
