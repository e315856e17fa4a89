use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_acquire_timeout: Duration,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub validation: ValidationPolicy,
    pub log_level: String,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
    pub user: String,
    pub pass: String,
    /// Operator mailbox every notification is delivered to.
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TlsMode {
    StartTls,
    Tls,
    Plain,
}

/// How strictly an incoming contact form is checked before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ValidationPolicy {
    /// Accept whatever arrives; absent fields are stored as absent.
    #[default]
    Permissive,
    /// Every field must be present and non-empty, and the email must look like an address.
    Strict,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let db_acquire_timeout: u64 = env_or("DB_ACQUIRE_TIMEOUT_SECS", "5")
            .parse()
            .map_err(|e| format!("Invalid DB_ACQUIRE_TIMEOUT_SECS: {e}"))?;
        let user = env_required("EMAIL_USER")?;
        let pass = env_required("EMAIL_PASS")?;
        let to = env_or("EMAIL_TO", &user);

        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let max_body_size: usize = env_or("MAX_BODY_SIZE", "102400")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let validation = ValidationPolicy::parse(&env_or("VALIDATION", "permissive"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        let smtp_port: u16 = env_or("SMTP_PORT", "587")
            .parse()
            .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?;

        let smtp = SmtpConfig {
            host: env_or("SMTP_HOST", "smtp.gmail.com"),
            port: smtp_port,
            tls: TlsMode::parse(&env_or("SMTP_TLS", "starttls"))?,
            user,
            pass,
            to,
        };

        Ok(Config {
            database_url,
            db_acquire_timeout: Duration::from_secs(db_acquire_timeout),
            host,
            port,
            max_body_size,
            validation,
            log_level,
            smtp,
        })
    }
}

impl ValidationPolicy {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "permissive" => Ok(ValidationPolicy::Permissive),
            "strict" => Ok(ValidationPolicy::Strict),
            other => Err(format!("Invalid VALIDATION '{other}': expected permissive or strict")),
        }
    }
}

impl TlsMode {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "starttls" => Ok(TlsMode::StartTls),
            "tls" => Ok(TlsMode::Tls),
            "none" => Ok(TlsMode::Plain),
            other => Err(format!("Invalid SMTP_TLS '{other}': expected starttls, tls or none")),
        }
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
