use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides, e.g. `ROSTER_TEAM__BASE_URL`.
pub const ENV_PREFIX: &str = "ROSTER_";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub team: TeamConfig,
    pub message: MessageConfig,
    pub slideshow: SlideshowConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Where the team API and its static assets live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub base_url: String,
    pub team_path: String,
    pub message_path: String,
    /// Page whose `<meta name="csrf-token">` carries the anti-forgery token.
    pub page_path: String,
    pub csrf_header: String,
    /// Prefix prepended to profile image references.
    pub asset_base: String,
    pub placeholder_image: String,
}

/// Message form limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub max_words: usize,
    /// Delay before the dialog closes itself after a successful send.
    pub close_delay_ms: u64,
}

/// Header slideshow of site attractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    pub interval_ms: u64,
    pub captions: Vec<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: true,
        }
    }
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            team_path: "/api/team".to_string(),
            message_path: "/api/send-team-message".to_string(),
            page_path: "/about".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            asset_base: "/static/images/".to_string(),
            placeholder_image: "placeholder.png".to_string(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            max_words: 500,
            close_delay_ms: 1000,
        }
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            captions: vec![
                "Kayaking the San Juan channels".to_string(),
                "Whale watching from the marina".to_string(),
                "Scuba diving at Moffat Point".to_string(),
                "Hiking the island ridge trail".to_string(),
            ],
        }
    }
}

impl TeamConfig {
    /// Join the configured base URL and an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl MessageConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/roster-tui/config.toml` plus
    /// `ROSTER_*` environment overrides.
    /// Returns `Default` if the sources are unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration layered as defaults, then `path`, then environment.
    pub fn load_from(path: &Path) -> Self {
        match Self::figment(path).extract::<AppConfig>() {
            Ok(config) => {
                log::info!("Loaded config (file: {})", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}: {e}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("roster-tui").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
