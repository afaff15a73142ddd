//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `APP_*` env vars (nested keys separated by `__`, e.g.
//! `APP_SEARCH__LIMIT=10`). Provides helpers to expand `~` and `${VAR}` and to
//! resolve relative paths against the directory the config was loaded from.

use std::env;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?.validate()?;
        tracing::debug!(env = env_name, base_dir = %base_dir.display(), "configuration loaded");
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a configured path against the config directory.
    pub fn resolve<S: AsRef<str>>(&self, p: S) -> PathBuf {
        resolve_with_base(&self.base_dir, p)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub graph: GraphSettings,
    pub roi: RoiSettings,
    pub pacing: PacingSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.search.limit == 0 {
            return Err(Error::InvalidConfig("search.limit must be greater than 0".to_string()));
        }
        if self.search.score_divisor <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "search.score_divisor must be positive, got {}",
                self.search.score_divisor
            )));
        }
        if !(self.search.score_cap > 0.0 && self.search.score_cap <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "search.score_cap must be in (0, 1], got {}",
                self.search.score_cap
            )));
        }
        if self.roi.monthly_subscription <= 0.0 {
            return Err(Error::InvalidConfig("roi.monthly_subscription must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSettings {
    /// Directory of extra `*.json` knowledge files. Empty disables it.
    pub knowledge_dir: String,
    pub export_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { knowledge_dir: String::new(), export_dir: "exports".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Semantic,
    Bm25,
    Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub engine: EngineKind,
    pub limit: usize,
    pub min_score: f32,
    pub score_divisor: f32,
    pub score_cap: f32,
    pub min_query_len: usize,
    /// Force-return MAC items when nothing else scores. Demo-only behavior.
    pub demo_fallback: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engine: EngineKind::Semantic,
            limit: 20,
            min_score: 0.05,
            score_divisor: 150.0,
            score_cap: 0.99,
            min_query_len: 3,
            demo_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphSettings {
    pub category_cap: usize,
    pub author_cap: usize,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self { category_cap: 5, author_cap: 3, center_x: 400.0, center_y: 300.0, radius: 250.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoiSettings {
    pub hourly_rate: f64,
    pub hours_per_week: f64,
    pub weeks_per_year: f64,
    pub monthly_subscription: f64,
    pub auto_select_confidence: u8,
}

impl Default for RoiSettings {
    fn default() -> Self {
        Self {
            hourly_rate: 600.0,
            hours_per_week: 8.0,
            weeks_per_year: 48.0,
            monthly_subscription: 3200.0,
            auto_select_confidence: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingSettings {
    pub enabled: bool,
    pub search_ms: u64,
    pub answer_ms: u64,
    pub analysis_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self { enabled: true, search_ms: 800, answer_ms: 1500, analysis_ms: 2000 }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
