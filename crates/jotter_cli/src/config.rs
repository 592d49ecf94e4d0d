//! Runtime configuration resolved from flags, environment and platform
//! defaults.
//!
//! Precedence: command-line flag, then `JOTTER_*` environment variable (both
//! handled by clap), then a path under the platform data directory.

use crate::cli::Cli;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "jotter";
const FALLBACK_DATA_DIR: &str = ".jotter";
const STORE_FILE_NAME: &str = "notes.json";
const TEMPLATE_FILE_NAME: &str = "template.html";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub template_path: PathBuf,
    /// Always absolute.
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves configuration for this process.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::resolve_with(cli, dirs::data_dir(), &cwd))
    }

    /// Resolves configuration against an explicit data dir and working dir.
    pub fn resolve_with(cli: &Cli, data_dir: Option<PathBuf>, cwd: &Path) -> Self {
        let app_dir = data_dir
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| cwd.join(FALLBACK_DATA_DIR));

        let store_path = cli
            .store
            .clone()
            .unwrap_or_else(|| app_dir.join(STORE_FILE_NAME));
        let template_path = cli
            .template
            .clone()
            .unwrap_or_else(|| app_dir.join(TEMPLATE_FILE_NAME));
        let log_dir = cli
            .log_dir
            .clone()
            .unwrap_or_else(|| app_dir.join(LOG_DIR_NAME));
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        };
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| jotter_core::default_log_level().to_string());

        Self {
            store_path,
            template_path,
            log_dir,
            log_level,
        }
    }
}
