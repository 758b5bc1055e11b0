use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransportKind {
    Smtp,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    Starttls,
    Tls,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub transport: MailTransportKind,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_security: SmtpSecurity,
    /// Falls back to `sender` when empty.
    pub username: String,
    pub password: Secret,
    pub sender: String,
    pub owner_address: String,
    pub team_name: String,
    pub response_days: u32,
    pub send_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    pub enabled: bool,
    pub dir: PathBuf,
    pub index: String,
}

/// A credential that never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(<empty>)")
        } else {
            f.write_str("Secret(<redacted>)")
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            request_timeout_seconds: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransportKind::Smtp,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_security: SmtpSecurity::Starttls,
            username: String::new(),
            password: Secret::default(),
            sender: "portfolio@example.com".to_string(),
            owner_address: "portfolio@example.com".to_string(),
            team_name: "ASZOTHIAM".to_string(),
            response_days: 3,
            send_timeout_seconds: 10,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("./dist"),
            index: "index.html".to_string(),
        }
    }
}

impl MailConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_seconds)
    }

    pub fn login(&self) -> &str {
        if self.username.is_empty() {
            &self.sender
        } else {
            &self.username
        }
    }
}

impl StaticFilesConfig {
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        let app_config = app_config.with_legacy_overrides(
            std::env::var("PORT").ok(),
            std::env::var("GMAIL_APP_PASSWORD").ok(),
        )?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Applies the bare `PORT` and `GMAIL_APP_PASSWORD` variables older
    /// deployments set. An explicit `APP_MAIL__PASSWORD` wins over the latter.
    pub fn with_legacy_overrides(
        mut self,
        port: Option<String>,
        gmail_password: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {}", port)))?;
        }

        if self.mail.password.is_empty() {
            if let Some(password) = gmail_password.filter(|p| !p.is_empty()) {
                self.mail.password = Secret::new(password);
            }
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.mail.sender.trim().is_empty() {
            return Err(ConfigError::Message("Mail sender cannot be empty".to_string()));
        }

        if self.mail.owner_address.trim().is_empty() {
            return Err(ConfigError::Message(
                "Mail owner address cannot be empty".to_string(),
            ));
        }

        if self.mail.send_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Mail send timeout must be greater than 0".to_string(),
            ));
        }

        if self.mail.transport == MailTransportKind::Smtp {
            if self.mail.smtp_host.trim().is_empty() {
                return Err(ConfigError::Message("SMTP host cannot be empty".to_string()));
            }
            if self.mail.password.is_empty() {
                return Err(ConfigError::Message(
                    "SMTP transport requires a password (APP_MAIL__PASSWORD or GMAIL_APP_PASSWORD)"
                        .to_string(),
                ));
            }
        }

        if self.mail.sender == "portfolio@example.com" {
            tracing::warn!("Using default mail sender - set APP_MAIL__SENDER in production!");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
