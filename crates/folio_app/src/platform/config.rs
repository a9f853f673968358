use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use folio_core::{FormField, QuickReplies};
use folio_engine::ApiSettings;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "folio", author, version, about = "Portfolio contact form and chat client")]
pub struct Cli {
    /// RON configuration file
    #[arg(short, long, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Origin of the portfolio API, e.g. https://example.com
    #[arg(long, env = "FOLIO_BASE_URL")]
    pub base_url: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit the contact form once and report the outcome
    Contact(ContactArgs),
    /// Chat with the portfolio assistant on stdin
    Chat,
}

/// Contact form fields. Required-ness is checked by the form itself, not here.
#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long, default_value = "")]
    pub project_type: String,
    #[arg(long, default_value = "")]
    pub budget: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

impl ContactArgs {
    /// Field edits in form order. The honeypot is never filled from the CLI.
    pub fn field_values(&self) -> Vec<(FormField, &str)> {
        vec![
            (FormField::Name, self.name.as_str()),
            (FormField::Email, self.email.as_str()),
            (FormField::Phone, self.phone.as_str()),
            (FormField::Company, self.company.as_str()),
            (FormField::ProjectType, self.project_type.as_str()),
            (FormField::Budget, self.budget.as_str()),
            (FormField::Subject, self.subject.as_str()),
            (FormField::Message, self.message.as_str()),
        ]
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuickReplyEntry {
    pub label: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub contact_timeout_secs: u64,
    pub chat_timeout_secs: u64,
    pub max_reply_bytes: u64,
    pub log_level: String,
    /// Replaces the built-in quick replies when non-empty.
    pub quick_replies: Vec<QuickReplyEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            contact_timeout_secs: api.contact_timeout.as_secs(),
            chat_timeout_secs: api.chat_timeout.as_secs(),
            max_reply_bytes: api.max_reply_bytes,
            log_level: "info".to_string(),
            quick_replies: Vec::new(),
        }
    }
}

impl AppConfig {
    /// File values first, then command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            contact_timeout: Duration::from_secs(self.contact_timeout_secs),
            chat_timeout: Duration::from_secs(self.chat_timeout_secs),
            max_reply_bytes: self.max_reply_bytes,
        }
    }

    pub fn quick_replies(&self) -> QuickReplies {
        if self.quick_replies.is_empty() {
            return QuickReplies::default();
        }
        QuickReplies::from_pairs(
            self.quick_replies
                .iter()
                .map(|entry| (entry.label.clone(), entry.question.clone())),
        )
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
