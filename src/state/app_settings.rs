use log::LevelFilter;
use std::path::PathBuf;
use wiffle_league::store::LeagueStore;

/// Process-level configuration, resolved once at startup from the
/// environment.
#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Where the three JSON collections live.
    pub data_dir: PathBuf,
    /// Secret gating the reset-all action; None leaves reset disabled.
    pub admin_secret: Option<String>,
}

impl AppSettings {
    pub fn load() -> Self {
        // Log level can additionally be overridden via env var RUST_LOG in the future.
        Self {
            full_screen: false,
            log_level: None,
            data_dir: LeagueStore::default_dir(),
            admin_secret: std::env::var("WBTUI_ADMIN_PASSWORD")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}
