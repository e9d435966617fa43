use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;
use crate::render::SessionOptions;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where saved templates live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// JSON document path for the file backend
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "data/forms.json".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on exit
    Memory,
    #[default]
    File,
}

/// Form filling behaviour
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormSettings {
    /// Seed field values from their `defaultValue` when a form opens.
    /// Off by default: users enter every value explicitly.
    #[serde(default)]
    pub prefill_defaults: bool,
}

impl FormSettings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            prefill_defaults: self.prefill_defaults,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `FORMWRIGHT_<SECTION>__<KEY>` variables, e.g. `FORMWRIGHT_STORAGE__PATH`
fn environment() -> Environment {
    Environment::with_prefix("FORMWRIGHT")
        .prefix_separator("_")
        .separator("__")
}

impl Settings {
    /// Create settings from CLI arguments (config file, env vars, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Self::builder(File::from(cli.config.clone()).required(false), environment())?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;

        Ok(settings)
    }

    /// Load `formwright.{toml,yaml,json}` from `root`, then env vars
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        Self::from_root_with_env(root, environment())
    }

    fn from_root_with_env(root: &str, env: Environment) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("formwright");
        let s = Self::builder(File::from(config_path).required(false), env)?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    fn builder<S>(file: S, env: Environment) -> Result<Config, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .add_source(file)
            .add_source(env)
            .set_default("storage.backend", "file")?
            .set_default("storage.path", default_storage_path())?
            .set_default("form.prefill_defaults", false)?
            .set_default("logging.level", default_log_level())?
            .build()?)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(path) = &cli.storage_path {
            self.storage.path = path.clone();
            self.storage.backend = StorageBackend::File;
        }
        if cli.in_memory {
            self.storage.backend = StorageBackend::Memory;
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        if cli.prefill_defaults {
            self.form.prefill_defaults = true;
        }
    }
}
