use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default destination directory, relative to the working directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "Fetched_Images";

/// Safety limit on image size: 50 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Whole-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_user_agent() -> String {
    format!(
        "imgfetch/{} (image collection tool)",
        env!("CARGO_PKG_VERSION")
    )
}

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
///
/// Defaults reproduce the built-in behavior exactly; the file only exists so
/// operators can tune the limits without rebuilding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Destination directory for saved images.
    pub download_dir: PathBuf,
    /// Maximum accepted image size in bytes (declared or actual).
    pub max_image_bytes: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Whether to skip content already present under another name.
    pub check_duplicates: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            check_duplicates: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.download_dir, PathBuf::from("Fetched_Images"));
        assert_eq!(cfg.max_image_bytes, 50 * 1024 * 1024);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert!(cfg.check_duplicates);
        assert!(cfg.user_agent.starts_with("imgfetch/"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.download_dir, cfg.download_dir);
        assert_eq!(parsed.max_image_bytes, cfg.max_image_bytes);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
        assert_eq!(parsed.check_duplicates, cfg.check_duplicates);
    }

    #[test]
    fn config_toml_partial_file_uses_defaults() {
        let toml = r#"
            download_dir = "wallpapers"
            check_duplicates = false
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_dir, PathBuf::from("wallpapers"));
        assert!(!cfg.check_duplicates);
        assert_eq!(cfg.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(cfg.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_toml_custom_limits() {
        let toml = r#"
            max_image_bytes = 1048576
            request_timeout_secs = 3
            user_agent = "test-agent/1.0"
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_image_bytes, 1_048_576);
        assert_eq!(cfg.request_timeout_secs, 3);
        assert_eq!(cfg.user_agent, "test-agent/1.0");
    }
}
