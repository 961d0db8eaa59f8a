use crate::assets::AssetLoader;
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Maximum accepted upload size in megabytes
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,

    /// Filename proposed to the browser for the generated PDF
    #[serde(default = "default_download_filename")]
    pub download_filename: String,
}

fn default_max_upload_mb() -> usize {
    25
}

fn default_download_filename() -> String {
    "documento_escaneado.pdf".to_string()
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        max_upload_mb = config.max_upload_mb,
                        download_filename = %config.download_filename,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Upload limit in bytes, for the request body layer.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_upload_mb: default_max_upload_mb(),
            download_filename: default_download_filename(),
        }
    }
}
