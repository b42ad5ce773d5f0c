use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/actas/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActasConfig {
    /// Tally endpoint, queried once per mesa with a JSON POST.
    pub api_url: String,
    /// Results export with `Descripcion` and `CodigoMesa` columns.
    pub csv_path: PathBuf,
    /// Directory that receives the `<codigo>.jpg` files.
    pub output_dir: PathBuf,
    /// Only rows whose `Descripcion` equals this office are downloaded.
    pub office: String,
    /// Maximum mesas in flight at once.
    pub max_concurrent: usize,
    /// Pause each worker holds after finishing a mesa, in milliseconds.
    pub pace_ms: u64,
    /// Connect timeout for the endpoint, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// User-Agent sent with every request. The endpoint rejects unknown agents.
    pub user_agent: String,
}

impl Default for ActasConfig {
    fn default() -> Self {
        Self {
            api_url: "https://computo.oep.org.bo/api/v1/resultados/mesa".to_string(),
            csv_path: PathBuf::from("resultados.csv"),
            output_dir: PathBuf::from("actas"),
            office: "PRESIDENTE".to_string(),
            max_concurrent: 10,
            pace_ms: 500,
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("actas")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ActasConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ActasConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ActasConfig = toml::from_str(&data)?;
    Ok(cfg)
}
