//! Layered application configuration

pub mod settings;

pub use settings::{
    AppConfig, CorsConfig, MailConfig, MailTransportKind, Secret, ServerConfig, SmtpSecurity,
    StaticFilesConfig,
};
