use std::net::IpAddr;
use std::path::PathBuf;

/// Server configuration, read from the environment with sensible defaults.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub theme_dir: PathBuf,
    /// Request body cap in bytes.
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let host = std::env::var("STYLA_HOST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| "127.0.0.1".parse().expect("default host should parse"));
        let port = std::env::var("STYLA_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);
        let theme_dir = std::env::var("STYLA_THEME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_theme_dir());
        let max_body_bytes = std::env::var("STYLA_MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(16 * 1024 * 1024);

        Self {
            host,
            port,
            theme_dir,
            max_body_bytes,
        }
    }
}

/// Default theme directory under the platform data dir.
pub fn default_theme_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("styla")
        .join("themes")
}
