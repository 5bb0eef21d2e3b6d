pub mod analysis;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod error;
pub mod page;
pub mod prefs;
pub mod preview;
pub mod report;
pub mod score;

pub use analysis::{SiteAnalysis, analyze_pages, analyze_site};
pub use config::AnalysisConfig;
pub use error::{CoreError, Result};
pub use page::{PageRecord, PageStore};
pub use prefs::BusinessPreferences;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
  _ _       _
 | (_)_ __ | | _____  ___ ___  _ __   ___
 | | | '_ \| |/ / __|/ __/ _ \| '_ \ / _ \
 | | | | | |   <\__ \ (_| (_) | |_) |  __/
 |_|_|_| |_|_|\_\___/\___\___/| .__/ \___|
                              |_|"#;
    eprintln!("{}", banner.cyan().bold());
    eprintln!(
        "  {} {}\n",
        "internal linking analysis".dimmed(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
