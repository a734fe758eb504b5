//! Process-wide configuration
//!
//! Loaded once at startup from an optional `config.json` in the user's
//! config directory, then overridden by `FABRIC_*` environment variables.

use crate::state::is_valid_email;
use crate::wizard::DEFAULT_AUTOSAVE_DELAY;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_millis(1000);

/// Variables that must be present when running in production
const PRODUCTION_REQUIRED: [&str; 4] = [
    "FABRIC_APP_URL",
    "FABRIC_COMPANY_PHONE",
    "FABRIC_COMPANY_EMAIL",
    "FABRIC_WHATSAPP_NUMBER",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("Missing required environment variables for production: {}", .0.join(", "))]
    MissingForProduction(Vec<&'static str>),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(()),
        }
    }
}

/// Optional settings from the user's config file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub environment: Option<Environment>,
    pub app_url: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub autosave_debounce_ms: Option<u64>,
    pub submit_timeout_secs: Option<u64>,
    pub submit_latency_ms: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl FileConfig {
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "fabricsupplier", "fabric-inquiry")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, defaulting when there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved configuration for the lifetime of the process
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_url: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub autosave_delay: Duration,
    pub submit_timeout: Duration,
    pub submit_latency: Duration,
    /// Where drafts are stored; `None` means the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = FileConfig::load()?;
        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    /// Merge file settings with variables from `env`; variables win
    pub fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let text = |name: &'static str, fallback: Option<String>| {
            env(name)
                .or(fallback)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = match env("FABRIC_ENV") {
            Some(value) => parse_environment(value)?,
            None => file.environment.unwrap_or_default(),
        };

        let app_url = text("FABRIC_APP_URL", file.app_url);
        if let Some(url) = &app_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    name: "FABRIC_APP_URL",
                    value: url.clone(),
                    reason: "expected an http or https URL",
                });
            }
        }

        let company_email = text("FABRIC_COMPANY_EMAIL", file.company_email);
        if let Some(email) = &company_email {
            if !is_valid_email(email) {
                return Err(ConfigError::Invalid {
                    name: "FABRIC_COMPANY_EMAIL",
                    value: email.clone(),
                    reason: "expected an email address",
                });
            }
        }

        let config = Self {
            environment,
            app_url,
            company_phone: text("FABRIC_COMPANY_PHONE", file.company_phone),
            company_email,
            whatsapp_number: text("FABRIC_WHATSAPP_NUMBER", file.whatsapp_number),
            autosave_delay: millis(
                &env,
                "FABRIC_AUTOSAVE_DEBOUNCE_MS",
                file.autosave_debounce_ms,
                DEFAULT_AUTOSAVE_DELAY,
            )?,
            submit_timeout: secs(
                &env,
                "FABRIC_SUBMIT_TIMEOUT_SECS",
                file.submit_timeout_secs,
                DEFAULT_SUBMIT_TIMEOUT,
            )?,
            submit_latency: millis(
                &env,
                "FABRIC_SUBMIT_DELAY_MS",
                file.submit_latency_ms,
                DEFAULT_SUBMIT_LATENCY,
            )?,
            data_dir: env("FABRIC_DATA_DIR").map(PathBuf::from).or(file.data_dir),
        };

        config.validate_production()?;
        Ok(config)
    }

    fn validate_production(&self) -> Result<(), ConfigError> {
        if self.environment != Environment::Production {
            return Ok(());
        }
        let present = [
            self.app_url.is_some(),
            self.company_phone.is_some(),
            self.company_email.is_some(),
            self.whatsapp_number.is_some(),
        ];
        let missing: Vec<&'static str> = PRODUCTION_REQUIRED
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingForProduction(missing))
        }
    }

    /// Root for drafts and logs: the override, else the platform data dir
    fn data_root(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(|| {
            ProjectDirs::from("com", "fabricsupplier", "fabric-inquiry")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
    }

    pub fn drafts_dir(&self) -> Option<PathBuf> {
        self.data_root().map(|root| root.join("drafts"))
    }

    pub fn logs_dir(&self) -> Option<PathBuf> {
        self.data_root().map(|root| root.join("logs"))
    }

    /// Sales contact shown in the status bar
    pub fn contact_line(&self) -> Option<String> {
        let labelled = |label: &str, value: &Option<String>| {
            value.as_ref().map(|v| format!("{label} {v}"))
        };
        let parts: Vec<String> = [
            labelled("☎", &self.company_phone),
            labelled("✉", &self.company_email),
            labelled("WhatsApp", &self.whatsapp_number),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("  "))
        }
    }

    /// Number to put on the clipboard: WhatsApp first, then phone
    pub fn quick_contact(&self) -> Option<&str> {
        match &self.whatsapp_number {
            Some(number) => Some(number.as_str()),
            None => self.company_phone.as_deref(),
        }
    }
}

fn parse_environment(value: String) -> Result<Environment, ConfigError> {
    value.parse().map_err(|()| ConfigError::Invalid {
        name: "FABRIC_ENV",
        value,
        reason: "expected development, production or test",
    })
}

fn number(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    fallback: Option<u64>,
) -> Result<Option<u64>, ConfigError> {
    match env(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                value,
                reason: "expected a whole number",
            }),
        None => Ok(fallback),
    }
}

fn millis(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    fallback: Option<u64>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    Ok(number(env, name, fallback)?
        .map(Duration::from_millis)
        .unwrap_or(default))
}

fn secs(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    fallback: Option<u64>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    Ok(number(env, name, fallback)?
        .map(Duration::from_secs)
        .unwrap_or(default))
}
