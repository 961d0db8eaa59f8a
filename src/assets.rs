//! Asset loading with embedded fallbacks
//!
//! The web-app shell (HTML, service worker, manifest, scripts) and the
//! default config.yaml are compiled into the binary. Behavior:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set and the file exists: use the filesystem copy
//! - If an env var IS set and the file is missing: fall back to embedded

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded web-app shell assets
#[derive(RustEmbed)]
#[folder = "static/"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.json"]
#[include = "**/*.html"]
#[include = "**/*.js"]
#[include = "**/*.css"]
#[include = "**/*.json"]
struct EmbeddedStatic;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External static assets directory (from STATIC_DIR env var)
    static_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(static_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            static_dir,
            config_file,
        }
    }

    /// Read a static asset by its path relative to the static root.
    ///
    /// Tries the external directory first when one is configured, then falls
    /// back to the embedded copy.
    pub fn read_static(&self, relative_path: &str) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref dir) = self.static_dir {
            let full_path = dir.join(relative_path);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading asset from filesystem");
                return Ok(Cow::Owned(fs::read(&full_path)?));
            }
        }

        EmbeddedStatic::get(relative_path)
            .map(|f| f.data)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("asset not found: {relative_path}"),
                )
            })
    }

    /// Read the configuration file as a string.
    pub fn read_config_string(&self) -> io::Result<String> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return fs::read_to_string(path);
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| String::from_utf8_lossy(&f.data).into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "embedded config.yaml missing"))
    }

    /// List the embedded static assets.
    pub fn list_embedded() -> Vec<String> {
        EmbeddedStatic::iter().map(|f| f.to_string()).collect()
    }

    /// Content type for a static asset, derived from its extension.
    pub fn content_type(relative_path: &str) -> &'static str {
        match relative_path.rsplit('.').next() {
            Some("html") => "text/html; charset=utf-8",
            Some("js") => "application/javascript",
            Some("css") => "text/css",
            Some("json") => "application/json",
            Some("png") => "image/png",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }

    /// Extract embedded assets to the filesystem for customization.
    ///
    /// Static files land in the configured static directory (default
    /// `./static`), the config in the configured config path (default
    /// `./config.yaml`). Existing files are skipped unless `force` is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        let static_root = self
            .static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("static"));

        for name in EmbeddedStatic::iter() {
            let target = static_root.join(name.as_ref());
            if target.exists() && !force {
                report.skipped.push(target.display().to_string());
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let data = EmbeddedStatic::get(&name)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "embedded asset vanished"))?;
            fs::write(&target, &data.data)?;
            report.written.push(target.display().to_string());
        }

        let config_target = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.yaml"));
        if config_target.exists() && !force {
            report.skipped.push(config_target.display().to_string());
        } else if let Some(data) = EmbeddedConfig::get("config.yaml") {
            if let Some(parent) = config_target.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&config_target, &data.data)?;
            report.written.push(config_target.display().to_string());
        }

        Ok(report)
    }
}
