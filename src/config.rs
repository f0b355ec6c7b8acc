use anyhow::{anyhow, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: MongoDbConfig,
    pub cors: CorsConfig,
    pub session: SessionConfig,
    pub uploads: UploadConfig,
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_json_limit")]
    pub json_limit_bytes: usize,
}

fn default_json_limit() -> usize {
    256 * 1024
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MongoDbConfig {
    pub uri: String,
    pub database: String,
    pub connection_timeout_ms: u64,
    pub max_pool_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub supports_credentials: bool,
}

/// Guest cookie settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_max_age_days: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    pub dir: String,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub public_base_url: String,
}

/// SMTP relay used for quote and form notifications
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub notify_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                api_key: None,
                json_limit_bytes: default_json_limit(),
            },
            database: MongoDbConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "jewel_store".to_string(),
                connection_timeout_ms: 5000,
                max_pool_size: Some(10),
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
                allowed_methods: vec![
                    "GET".to_string(),
                    "POST".to_string(),
                    "PUT".to_string(),
                    "DELETE".to_string(),
                ],
                allowed_headers: vec![
                    "Authorization".to_string(),
                    "X-API-Key".to_string(),
                    "X-Guest-Id".to_string(),
                    "Accept".to_string(),
                    "Content-Type".to_string(),
                ],
                supports_credentials: true,
            },
            session: SessionConfig {
                cookie_name: "guest_id".to_string(),
                cookie_max_age_days: 365,
                cookie_secure: false,
            },
            uploads: UploadConfig {
                dir: "uploads".to_string(),
                max_file_size_bytes: 10 * 1024 * 1024,
                allowed_extensions: ["jpg", "jpeg", "png", "webp", "gif", "svg", "mp4", "pdf"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                public_base_url: "/api/v1/uploads".to_string(),
            },
            mail: None,
        }
    }
}

impl MongoDbConfig {
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(anyhow!("database.uri is empty"));
        }
        if self.database.trim().is_empty() {
            return Err(anyhow!("database.database is empty"));
        }
        Ok(())
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(anyhow!("Upload directory not configured"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow!("Upload size limit must be greater than zero"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow!("No upload extensions allowed"));
        }

        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str) -> Option<bool> {
    env_var(key).map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
}

impl Config {
    /// Read `path`, or fall back to the environment over defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                error!("Could not read {}: {}", path.display(), e);
                info!("Using environment variables over built-in defaults");
                Ok(Self::from_env())
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn from_env() -> Self {
        let mut config = Config::default();
        let server = &mut config.server;

        if let Some(host) = env_var("SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = env_var("SERVER_PORT").and_then(|p| p.parse().ok()) {
            server.port = port;
        }
        if let Some(level) = env_var("RUST_LOG") {
            server.log_level = level;
        }
        server.api_key = env_var("API_KEY").or(server.api_key.take());

        if let Some(uri) = env_var("MONGODB_URI") {
            config.database.uri = uri;
        }
        if let Some(name) = env_var("MONGODB_DATABASE") {
            config.database.database = name;
        }

        if let Some(origins) = env_var("CORS_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        if let Some(dir) = env_var("UPLOAD_DIR") {
            config.uploads.dir = dir;
        }
        if let Some(secure) = env_flag("SESSION_COOKIE_SECURE") {
            config.session.cookie_secure = secure;
        }

        // Mail stays off unless a relay host is given
        config.mail = env_var("SMTP_HOST").map(|smtp_host| MailConfig {
            smtp_host,
            smtp_port: env_var("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: env_var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env_var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: env_var("MAIL_FROM").unwrap_or_default(),
            notify_address: env_var("MAIL_NOTIFY").unwrap_or_default(),
        });

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_services() {
        let defaults = Config::default();
        assert_eq!(defaults.server.port, 8080);
        assert_eq!(defaults.database.database, "jewel_store");
        assert_eq!(defaults.session.cookie_name, "guest_id");
        assert!(defaults.server.api_key.is_none());
        assert!(defaults.mail.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("SERVER_PORT", "9191");
        std::env::set_var("MONGODB_DATABASE", "store_test");
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::set_var("MAIL_NOTIFY", "sales@example.com");
        std::env::set_var("SESSION_COOKIE_SECURE", "yes");

        let config = Config::from_env();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.database.database, "store_test");
        assert!(config.session.cookie_secure);
        let mail = config.mail.expect("mail section from SMTP_HOST");
        assert_eq!(mail.smtp_port, 587);
        assert_eq!(mail.notify_address, "sales@example.com");

        for key in [
            "SERVER_PORT",
            "MONGODB_DATABASE",
            "SMTP_HOST",
            "MAIL_NOTIFY",
            "SESSION_COOKIE_SECURE",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults_survive_toml_round_trip() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.uploads.allowed_extensions, Config::default().uploads.allowed_extensions);
        assert_eq!(parsed.cors.allowed_headers.len(), 5);
    }

    #[test]
    fn test_config_parses_without_optional_sections() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 8000
            log_level = "debug"

            [database]
            uri = "mongodb://db:27017"
            database = "store"
            connection_timeout_ms = 1000

            [cors]
            allowed_origins = ["https://shop.example.com"]
            allowed_methods = ["GET"]
            allowed_headers = ["Content-Type"]
            supports_credentials = false

            [session]
            cookie_name = "gid"
            cookie_max_age_days = 30
            cookie_secure = true

            [uploads]
            dir = "/var/lib/store/uploads"
            max_file_size_bytes = 1024
            allowed_extensions = ["png"]
            public_base_url = "https://cdn.example.com/uploads"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.json_limit_bytes, 256 * 1024);
        assert!(config.server.api_key.is_none());
        assert!(config.mail.is_none());
        assert!(config.database.max_pool_size.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = Config::default();
        assert!(config.database.validate().is_ok());
        assert!(config.uploads.validate().is_ok());

        config.database.database.clear();
        assert!(config.database.validate().is_err());

        config.uploads.allowed_extensions.clear();
        assert!(config.uploads.validate().is_err());
    }
}
