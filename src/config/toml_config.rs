use crate::config::FeedEndpoints;
use crate::core::i18n::Locale;
use crate::core::loading::LoadingOptions;
use crate::utils::error::{Result, StorefrontError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub feeds: Option<FeedEndpoints>,
    pub catalog: CatalogConfig,
    pub language: LanguageConfig,
    pub loading: LoadingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSource {
    #[default]
    Static,
    Remote,
    RemoteWithFallback,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    pub api_base_url: Option<String>,
    /// Snapshot file; the bundled snapshot is used when unset.
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub default: String,
    pub data_dir: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: Locale::default().code().to_string(),
            data_dir: ".kisagold".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub duration_ms: u64,
    pub finish_delay_ms: u64,
    pub min_display_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            finish_delay_ms: 300,
            min_display_ms: 1000,
        }
    }
}

impl TomlConfig {
    /// Loads the config file, expanding `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StorefrontError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| StorefrontError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left untouched.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn feed_endpoints(&self) -> Result<&FeedEndpoints> {
        validate_required_field("feeds", &self.feeds)
    }

    pub fn default_locale(&self) -> Result<Locale> {
        self.language.default.parse()
    }

    pub fn loading_options(&self) -> LoadingOptions {
        LoadingOptions {
            duration: Duration::from_millis(self.loading.duration_ms),
            delay: Duration::from_millis(self.loading.finish_delay_ms),
            min_display_time: Duration::from_millis(self.loading.min_display_ms),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(feeds) = &self.feeds {
            feeds.validate()?;
        }

        if self.catalog.source != CatalogSource::Static {
            let base = validate_required_field("catalog.api_base_url", &self.catalog.api_base_url)?;
            validate_url("catalog.api_base_url", base)?;
        }
        if let Some(path) = &self.catalog.snapshot_path {
            validate_path("catalog.snapshot_path", path)?;
        }

        validate_non_empty_string("language.default", &self.language.default)?;
        self.default_locale()?;
        validate_path("language.data_dir", &self.language.data_dir)?;

        validate_range("loading.duration_ms", self.loading.duration_ms, 50, 60_000)?;
        validate_range("loading.finish_delay_ms", self.loading.finish_delay_ms, 0, 10_000)?;
        validate_range("loading.min_display_ms", self.loading.min_display_ms, 0, 10_000)?;
        Ok(())
    }
}
