use anyhow::Result;
use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Invalid log format: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub route_prefix: String,
    pub messages_path: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_seconds: u64,
    pub auto_create_schema: bool,
    pub strict_mutations: bool,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts()),
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            route_prefix: normalize_prefix(
                &env::var("ROUTE_PREFIX").unwrap_or_else(|_| "/api/students".to_string()),
            ),
            messages_path: env::var("MESSAGES_PATH")
                .unwrap_or_else(|_| "./messages.json".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            db_acquire_timeout_seconds: parse_or("DB_ACQUIRE_TIMEOUT_SECONDS", 30),
            auto_create_schema: parse_bool_or("AUTO_CREATE_SCHEMA", true),
            strict_mutations: parse_bool_or("STRICT_MUTATIONS", false),
            log_format: parse_or("LOG_FORMAT", LogFormat::Pretty),
        })
    }
}

/// Assemble a connection URL from the individual `DB_*` variables.
fn database_url_from_parts() -> String {
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port: u16 = parse_or("DB_PORT", 5432);
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let name = env::var("DB_NAME").unwrap_or_else(|_| "gestion_estudiantes".to_string());

    if password.is_empty() {
        format!("postgresql://{}@{}:{}/{}", urlencoding::encode(&user), host, port, name)
    } else {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            urlencoding::encode(&user),
            urlencoding::encode(&password),
            host,
            port,
            name
        )
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value '{}' for {}, using {:?}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_bool_or(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!("Ignoring invalid value '{}' for {}, using {}", raw, key, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// `""` and `"/"` mean "mount at the root"; everything else gets a single
/// leading slash and no trailing one.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
