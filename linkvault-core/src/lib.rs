pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod import;
pub mod query;
pub mod scope;

pub use classify::UrlClassifier;
pub use config::PatternConfig;
pub use data::{UrlRecord, UrlStore};
pub use error::{Result, StoreError};
pub use import::{ImportOutcome, UrlImporter};
pub use query::{SearchOutcome, UrlFilter, UrlMatch};
pub use scope::{HostScope, ScopeOracle};

use colored::Colorize;

pub fn print_banner() {
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!("{}", "  LINKVAULT".bright_white().bold());
    println!(
        "  {} {}",
        format!("v{}", env!("CARGO_PKG_VERSION")).cyan(),
        "the URL ledger behind your scans".bright_black()
    );
    println!("{}", "═".repeat(60).bright_blue().bold());
    println!();
}
