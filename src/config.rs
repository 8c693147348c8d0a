use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::validation::DEFAULT_MAX_FILE_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub filter: String,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_secs: 120,
            },
            upload: UploadConfig {
                max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            },
            polling: PollingConfig { interval_ms: 3000 },
            logging: LoggingConfig {
                directory: default_log_dir(),
                filter: "docqa=info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let max_file_size_mb: u64 = env::var("DOCQA_MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| "10".to_string())
            .parse()?;

        let config = Self {
            api: ApiConfig {
                base_url: env::var("DOCQA_API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
                request_timeout_secs: env::var("DOCQA_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()?,
            },
            upload: UploadConfig {
                max_file_size_bytes: mb_to_bytes(max_file_size_mb)?,
            },
            polling: PollingConfig {
                interval_ms: env::var("DOCQA_POLL_INTERVAL_MS")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            logging: LoggingConfig {
                directory: env::var("DOCQA_LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_log_dir()),
                filter: env::var("RUST_LOG").unwrap_or_else(|_| "docqa=info".to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the environment
    pub fn with_overrides(mut self, base_url: Option<String>, poll_interval_ms: Option<u64>) -> Result<Self> {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        if let Some(ms) = poll_interval_ms {
            self.polling.interval_ms = ms;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL {:?}: {}", self.api.base_url, e))?;
        if self.polling.interval_ms == 0 {
            anyhow::bail!("Poll interval must be greater than zero");
        }
        if self.upload.max_file_size_bytes == 0 {
            anyhow::bail!("Maximum file size must be greater than zero");
        }
        Ok(())
    }
}

fn mb_to_bytes(mb: u64) -> Result<u64> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("DOCQA_MAX_FILE_SIZE_MB is too large: {}", mb))
}

fn default_log_dir() -> PathBuf {
    env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::state_dir)
        .map(|d| d.join("docqa"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
