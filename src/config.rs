//! TOML configuration parsing and validation.
//!
//! ```toml
//! [data]
//! source = "./data/quran"          # directory or http(s):// base URL
//!
//! [cache]
//! dir = "./data/cache"
//! ttl_hours = 24
//!
//! [reader]
//! language = "en"
//! font_size = 24
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use quran_core::Language;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub source: String,
    #[serde(default = "default_chapters_file")]
    pub chapters_file: String,
    #[serde(default = "default_surah_info_file")]
    pub surah_info_file: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_chapters_file() -> String {
    "quran.json".to_string()
}
fn default_surah_info_file() -> String {
    "surah-info.json".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl DataConfig {
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            ttl_hours: default_ttl_hours(),
            enabled: true,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}
fn default_ttl_hours() -> u64 {
    24
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReaderConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            font_size: default_font_size(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
fn default_font_size() -> u32 {
    24
}

pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 12..=48;

impl ReaderConfig {
    /// The configured language. Only valid after [`load_config`] validation.
    pub fn language(&self) -> Language {
        self.language.parse().unwrap_or_default()
    }
}

impl Config {
    /// Configuration used when no config file exists: data in
    /// `./data/quran`, default cache and reader settings.
    pub fn minimal() -> Self {
        Self {
            data: DataConfig {
                source: "./data/quran".to_string(),
                chapters_file: default_chapters_file(),
                surah_info_file: default_surah_info_file(),
                timeout_secs: default_timeout_secs(),
            },
            cache: CacheConfig::default(),
            reader: ReaderConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.data.source.trim().is_empty() {
        anyhow::bail!("data.source must not be empty");
    }

    if config.data.timeout_secs == 0 {
        anyhow::bail!("data.timeout_secs must be > 0");
    }

    if config.cache.ttl_hours == 0 {
        anyhow::bail!("cache.ttl_hours must be > 0");
    }

    if let Err(e) = config.reader.language.parse::<Language>() {
        anyhow::bail!("reader.language: {}", e);
    }

    if !FONT_SIZE_RANGE.contains(&config.reader.font_size) {
        anyhow::bail!(
            "reader.font_size must be in [{}, {}]",
            FONT_SIZE_RANGE.start(),
            FONT_SIZE_RANGE.end()
        );
    }

    Ok(())
}
