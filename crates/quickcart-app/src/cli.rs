//! CLI argument definitions for the QuickCart assistant.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// QuickCart - rule-based FAQ assistant for the QuickCart storefront.
#[derive(Parser, Debug)]
#[command(name = "quickcart", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Data directory for the SQLite database.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// JSON file with an array of products to load before serving.
    #[arg(long = "seed-products")]
    pub seed_products: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > QUICKCART_CONFIG env var > ~/.quickcart/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("QUICKCART_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > QUICKCART_PORT env var > config file value > 5000.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("QUICKCART_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        5000
    }

    /// Resolve the data directory path.
    ///
    /// Returns `None` if not overridden (use config value).
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    /// Resolve the log level.
    ///
    /// Returns `None` if not overridden (use config value).
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path: `~/.quickcart/config.toml`.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".quickcart").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".quickcart").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let args = CliArgs::try_parse_from([
            "quickcart",
            "-c",
            "/tmp/qc.toml",
            "-p",
            "8080",
            "-d",
            "/var/lib/quickcart",
            "-l",
            "debug",
            "--seed-products",
            "products.json",
        ])
        .unwrap();

        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/qc.toml"));
        assert_eq!(args.resolve_port(5000), 8080);
        assert_eq!(args.resolve_data_dir().as_deref(), Some("/var/lib/quickcart"));
        assert_eq!(args.resolve_log_level().as_deref(), Some("debug"));
        assert_eq!(args.seed_products, Some(PathBuf::from("products.json")));
    }

    #[test]
    fn test_no_overrides() {
        let args = CliArgs::try_parse_from(["quickcart"]).unwrap();
        assert!(args.resolve_data_dir().is_none());
        assert!(args.resolve_log_level().is_none());
        assert!(args.seed_products.is_none());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(CliArgs::try_parse_from(["quickcart", "--port", "99999"]).is_err());
    }
}
