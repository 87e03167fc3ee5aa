//! Command-line configuration and config-file lookup.
//!
//! Flags fall back to `USRDESK_*` environment variables where noted. Theme and
//! keybinding files live in `$XDG_CONFIG_HOME/usrdesk` (or
//! `$HOME/.config/usrdesk`) unless given explicitly.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::error::{Context, Result, simple_error};
use crate::router::Route;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const APP_DIR: &str = "usrdesk";

#[derive(Parser, Debug, Clone)]
#[command(name = "usrdesk", version, about = "Terminal client for a REST user directory")]
pub struct Cli {
    /// Base URL of the user service.
    #[arg(long, env = "USRDESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path to open first: `/` or `/user/{id}`.
    #[arg(long, default_value = "/", value_parser = parse_route)]
    pub route: Route,

    /// Per-request timeout in seconds.
    #[arg(long, env = "USRDESK_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Log file (the terminal is taken by the UI).
    #[arg(long, env = "USRDESK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Theme file; defaults to `theme.conf` in the config directory.
    #[arg(long)]
    pub theme: Option<String>,

    /// Keybinding file; defaults to `keybinds.conf` in the config directory.
    #[arg(long)]
    pub keybinds: Option<String>,
}

fn parse_route(s: &str) -> std::result::Result<Route, String> {
    Route::parse(s).map_err(|e| e.to_string())
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub route: Route,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub theme_path: String,
    pub keybinds_path: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base_url = validate_base_url(&cli.base_url)?;
        if cli.timeout_secs == 0 {
            return Err(simple_error("--timeout-secs must be greater than zero"));
        }
        Ok(Self {
            base_url,
            route: cli.route,
            timeout: Duration::from_secs(cli.timeout_secs),
            log_file: cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join("usrdesk.log")),
            theme_path: cli.theme.unwrap_or_else(|| config_file_write_path("theme.conf")),
            keybinds_path: cli
                .keybinds
                .unwrap_or_else(|| config_file_write_path("keybinds.conf")),
        })
    }
}

/// Accept only absolute http(s) URLs; the returned string has no trailing slash.
pub fn validate_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).with_ctx(|| format!("invalid base URL {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(simple_error(format!(
                "unsupported scheme {other:?} in base URL (expected http or https)"
            )));
        }
    }
    if url.host_str().is_none() {
        return Err(simple_error(format!("base URL {raw:?} has no host")));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn config_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(xdg).join(APP_DIR));
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(home).join(".config").join(APP_DIR));
    }
    dirs
}

/// First existing `name` across the config directories.
pub fn config_file_read_path(name: &str) -> Option<String> {
    config_dirs()
        .into_iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
        .map(|p| p.to_string_lossy().into_owned())
}

/// Where `name` should be written. Creates the directory; falls back to the
/// working directory when no config directory is known.
pub fn config_file_write_path(name: &str) -> String {
    match config_dirs().into_iter().next() {
        Some(dir) => {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                tracing::warn!(dir = %dir.display(), error = %e, "could not create config dir");
            }
            dir.join(name).to_string_lossy().into_owned()
        }
        None => name.to_string(),
    }
}
