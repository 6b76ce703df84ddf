//! YAML configuration shared by the generate, load and report commands.
//!
//! Every key is optional; missing keys fall back to the built-in defaults
//! and command-line flags override both.

use crate::error::{PipelineError, Result};
use crate::store::DEFAULT_DB;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shop_data_gen::{DatasetCounts, GeneratorConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-collection record counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountsConfig {
    pub categories: Option<usize>,
    pub users: Option<usize>,
    pub products: Option<usize>,
    pub orders: Option<usize>,
    pub order_items: Option<usize>,
}

impl CountsConfig {
    fn apply(&self, counts: &mut DatasetCounts) {
        let overrides = [
            (self.categories, &mut counts.categories),
            (self.users, &mut counts.users),
            (self.products, &mut counts.products),
            (self.orders, &mut counts.orders),
            (self.order_items, &mut counts.order_items),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

/// Complete YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Random seed
    pub seed: Option<u64>,
    /// First day of the timestamp window (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Width of the timestamp window in days
    pub day_span: Option<u32>,
    /// Directory for the CSV files
    pub data_dir: Option<PathBuf>,
    /// DuckDB database file
    pub database: Option<PathBuf>,
    pub counts: CountsConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|message| PipelineError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse configuration from a YAML string
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn database(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB))
    }

    /// Build generator settings from this config over the defaults
    pub fn generator_config(&self) -> std::result::Result<GeneratorConfig, String> {
        let mut config = GeneratorConfig::default();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ref date) = self.start_date {
            config.start_date = parse_start_date(date)?;
        }
        if let Some(span) = self.day_span {
            config.day_span = span;
        }
        self.counts.apply(&mut config.counts);

        Ok(config)
    }
}

/// Parse `YYYY-MM-DD` into midnight of that day
pub fn parse_start_date(s: &str) -> std::result::Result<chrono::NaiveDateTime, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("Invalid start date: {}. Expected YYYY-MM-DD", s))
}
