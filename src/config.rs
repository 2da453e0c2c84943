use config::{Config as ConfigLoader, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Origin the wizard runs against when nothing else is configured
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
/// Local provisioning server started by the development tooling
pub const DEFAULT_LOCAL_API_URL: &str = "http://localhost:8000";
/// Hosts that select the local provisioning server
pub const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Provisioning endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Site origin the wizard is served from (decides local vs production)
    pub site_url: String,
    /// Base URL of the local development provisioning server
    pub local_api_url: String,
    /// Optional request timeout; unset means wait for the server indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            local_api_url: DEFAULT_LOCAL_API_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Terminal front-end settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval in milliseconds
    pub tick_rate_ms: u64,
    /// Seconds between loading-page quotes
    pub quote_interval_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            quote_interval_secs: 6,
        }
    }
}

/// Complete onboarding configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OnboardingConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

impl OnboardingConfig {
    /// Load configuration layered as defaults, optional file, then `CLARA_*` environment.
    ///
    /// Environment keys use `__` between sections, e.g. `CLARA_API__SITE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let defaults = Self::default();
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        let settings = ConfigLoader::builder()
            .set_default("api.site_url", defaults.api.site_url)?
            .set_default("api.local_api_url", defaults.api.local_api_url)?
            .set_default("ui.tick_rate_ms", defaults.ui.tick_rate_ms)?
            .set_default("ui.quote_interval_secs", defaults.ui.quote_interval_secs)?
            .add_source(File::from(path.as_path()).required(false))
            .add_source(
                Environment::with_prefix("CLARA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: OnboardingConfig = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// Read configuration from a TOML file only
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("clara-onboarding");
        path.push("config.toml");
        path
    }

    /// Override the site origin
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.api.site_url = site_url.into();
        self
    }

    /// Override the local provisioning server
    pub fn with_local_api_url(mut self, local_api_url: impl Into<String>) -> Self {
        self.api.local_api_url = local_api_url.into();
        self
    }

    /// Whether the site host is a loopback name, selecting the local server
    pub fn use_local_api(&self) -> bool {
        Url::parse(&self.api.site_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .map(|host| LOOPBACK_HOSTS.contains(&host.as_str()))
            .unwrap_or(false)
    }

    /// Resolve the onboarding endpoint for the current environment
    pub fn onboard_url(&self) -> Result<Url, Error> {
        if self.use_local_api() {
            let base = self.api.local_api_url.trim_end_matches('/');
            Url::parse(&format!("{}/onboard", base)).map_err(|e| {
                Error::InvalidEndpoint(format!("{}: {}", self.api.local_api_url, e))
            })
        } else {
            Url::parse(&self.api.site_url)
                .and_then(|site| site.join("/api/onboard"))
                .map_err(|e| Error::InvalidEndpoint(format!("{}: {}", self.api.site_url, e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_local_server() {
        let config = OnboardingConfig::default();
        assert!(config.use_local_api());
        assert_eq!(
            config.onboard_url().unwrap().as_str(),
            "http://localhost:8000/onboard"
        );
    }

    #[test]
    fn test_loopback_address_selects_local_server() {
        let config = OnboardingConfig::default()
            .with_site_url("http://127.0.0.1:5173")
            .with_local_api_url("http://127.0.0.1:9000/");
        assert!(config.use_local_api());
        assert_eq!(
            config.onboard_url().unwrap().as_str(),
            "http://127.0.0.1:9000/onboard"
        );
    }

    #[test]
    fn test_public_host_uses_relative_api_path() {
        let config =
            OnboardingConfig::default().with_site_url("https://onboarding.example.com/start");
        assert!(!config.use_local_api());
        assert_eq!(
            config.onboard_url().unwrap().as_str(),
            "https://onboarding.example.com/api/onboard"
        );
    }

    #[test]
    fn test_unparseable_site_url() {
        let config = OnboardingConfig::default().with_site_url("not a url");
        assert!(!config.use_local_api());
        assert!(matches!(
            config.onboard_url(),
            Err(Error::InvalidEndpoint(_))
        ));
    }
}
