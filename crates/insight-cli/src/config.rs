//! Settings file loading.
//!
//! Lookup order: an explicit `--config` path, then `settings.toml` in the
//! platform config directory, then built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use insight_core::AnalyticsOptions;
use insight_map::RoleKeywords;

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analytics: AnalyticsOptions,
    pub keywords: RoleKeywords,
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Sent with chat requests; empty means anonymous.
    pub user_id: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            user_id: String::new(),
        }
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Settings {
    /// Parses settings text, keeping default keywords for roles it omits.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("parse settings")?;
        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        self.keywords = self.keywords.normalized();
        self
    }

    /// Resolves settings from an explicit path or the default location.
    ///
    /// An explicit file must exist and parse. A broken default file only
    /// warns.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read settings {}", path.display()))?;
            let settings = Self::from_toml(&text)
                .with_context(|| format!("load settings {}", path.display()))?;
            debug!(path = %path.display(), "settings loaded");
            return Ok(settings);
        }
        match default_settings_path() {
            Some(path) => Ok(Self::load_default(&path)),
            None => Ok(Self::default()),
        }
    }

    fn load_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "settings unreadable, using defaults");
                return Self::default();
            }
        };
        match Self::from_toml(&text) {
            Ok(settings) => {
                debug!(path = %path.display(), "settings loaded");
                settings
            }
            Err(error) => {
                warn!(path = %path.display(), error = %format!("{error:#}"), "invalid settings, using defaults");
                Self::default()
            }
        }
    }
}

/// `settings.toml` under the platform config directory, if one exists.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "insight").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::PagePolicy;
    use insight_model::SemanticRole;

    #[test]
    fn empty_text_gives_defaults() {
        let settings = Settings::from_toml("").expect("parse");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let settings = Settings::from_toml(
            r#"
            [analytics]
            page_size = 20
            page_policy = "preserve"

            [keywords]
            region = ["Zone"]

            [remote]
            endpoint = "https://insight.example.com/api"
            "#,
        )
        .expect("parse");
        assert_eq!(settings.analytics.page_size, 20);
        assert_eq!(settings.analytics.page_policy, PagePolicy::Preserve);
        assert_eq!(settings.analytics.top_n, 5);
        assert_eq!(settings.keywords.keywords(SemanticRole::Region), ["zone"]);
        assert_eq!(
            settings.keywords.keywords(SemanticRole::Revenue),
            RoleKeywords::default().keywords(SemanticRole::Revenue)
        );
        assert_eq!(settings.remote.timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_reads_as_one_second() {
        let remote = RemoteSettings {
            timeout_secs: 0,
            ..RemoteSettings::default()
        };
        assert_eq!(remote.timeout(), Duration::from_secs(1));
    }
}
