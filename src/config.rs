use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::dates::DateOrder;
use crate::source::{DEFAULT_SHEET_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub student: Option<String>,
    pub date_order: DateOrder,
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SHEET_URL.to_string(),
            student: None,
            date_order: DateOrder::default(),
            fetch_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Command line values that take precedence over the stored config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub source_url: Option<String>,
    pub student: Option<String>,
    pub day_first: bool,
    pub fetch_timeout_secs: Option<u64>,
}

impl Config {
    pub fn merged(mut self, overrides: &Overrides) -> Self {
        if let Some(url) = &overrides.source_url {
            self.source_url = url.clone();
        }
        if let Some(student) = &overrides.student {
            self.student = Some(student.clone());
        }
        if overrides.day_first {
            self.date_order = DateOrder::DayFirst;
        }
        if let Some(secs) = overrides.fetch_timeout_secs {
            self.fetch_timeout_secs = secs;
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("classcal_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
