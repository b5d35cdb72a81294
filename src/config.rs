use crate::error::{CropwiseError, Result};
use crate::models::Season;
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SERVER_URL_ENV: &str = "CROPWISE_SERVER_URL";
pub const DATA_DIR_ENV: &str = "CROPWISE_DATA_DIR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub farm: FarmDefaults,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Startup health check only; kept short so the UI is not held up.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".into()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_health_timeout_secs() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

/// Pre-filled values for the farm details form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FarmDefaults {
    pub location: Option<String>,
    pub season: Option<String>,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub humidity: Option<f64>,
}

impl FarmDefaults {
    pub fn season(&self) -> Option<Season> {
        self.season.as_deref().and_then(Season::from_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

fn default_notification_secs() -> u64 {
    3
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_secs: default_notification_secs(),
        }
    }
}

impl Config {
    /// Load config from an explicit path or the standard locations.
    /// Falls back to defaults when no file exists and no path was given.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropwiseError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    let mut config = Config::default();
                    config.apply_env_overrides();
                    return Ok(config);
                }
            },
        };

        let mut config = Self::from_file(&config_path)?;
        config.apply_env_overrides();
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| CropwiseError::Config(format!("Failed to read config: {}", e)))?;
        Self::parse(&config_str)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| CropwiseError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in `./config/` then the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|d| d.join("cropwise").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/cropwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropwiseError::Config("Cannot determine config directory".into()))?
            .join("cropwise");
        Ok(config_dir.join("config.yaml"))
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                self.server.base_url = url.trim().to_string();
            }
        }
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Cropwise!");
        println!();

        println!("Analysis server");
        let base_url: String = Input::new()
            .with_prompt("  Base URL")
            .default(ServerConfig::default().base_url)
            .interact_text()
            .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

        let timeout_secs: u64 = Input::new()
            .with_prompt("  Request timeout (seconds)")
            .default(default_timeout_secs())
            .interact_text()
            .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Farm defaults (leave blank to skip)");
        let location: String = Input::new()
            .with_prompt("  Location")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

        let season_labels: Vec<&str> = Season::all().iter().map(|s| s.as_str()).collect();
        let season_index = Select::new()
            .with_prompt("  Season")
            .items(&season_labels)
            .default(0)
            .interact()
            .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Reports");
        let default_report_dir = Self::default_report_dir()?;
        let output_dir: String = Input::new()
            .with_prompt("  Output directory")
            .default(default_report_dir.display().to_string())
            .interact_text()
            .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            server: ServerConfig {
                base_url,
                timeout_secs,
                health_timeout_secs: default_health_timeout_secs(),
            },
            farm: FarmDefaults {
                location: (!location.is_empty()).then_some(location),
                season: Season::all()
                    .get(season_index)
                    .map(|s| s.wire_value().to_string()),
                ..FarmDefaults::default()
            },
            report: ReportConfig {
                output_dir: Some(PathBuf::from(output_dir)),
            },
            ui: UiConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CropwiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Cropwise Configuration\n# Generated by `cropwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropwiseError::Config("Cannot determine data directory".into()))?
            .join("cropwise");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("cropwise.log"))
    }

    fn default_report_dir() -> Result<PathBuf> {
        match dirs::document_dir() {
            Some(docs) => Ok(docs.join("cropwise-reports")),
            None => Ok(Self::data_dir()?.join("reports")),
        }
    }

    /// Directory reports are written to; created on first write.
    pub fn report_dir(&self) -> Result<PathBuf> {
        match self.report.output_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => Self::default_report_dir(),
        }
    }
}
