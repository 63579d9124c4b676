use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub max_idle_time_secs: u64,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
    /// Accept invalid TLS certificates (managed clusters with self-signed chains).
    pub tls_insecure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Root folder for uploads that don't name their own.
    pub directory: String,
    pub api_base: String,
    pub signature_algorithm: SignatureAlgorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    Sha1,
    Sha256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub request_timeout_secs: u64,
    pub upload_timeout_secs: u64,
    pub default_limit: i64,
    pub max_limit: i64,
    pub max_request_size_bytes: usize,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: Option<String>,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub site_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.api.upload_timeout_secs)
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("FOLLOOOW_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("MONGO_URI") {
            self.database.uri = v;
        }
        if let Ok(v) = env::var("MONGO_DB") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("MONGO_MAX_POOL_SIZE") {
            self.database.max_pool_size = v.parse().unwrap_or(self.database.max_pool_size);
        }
        if let Ok(v) = env::var("MONGO_MIN_POOL_SIZE") {
            self.database.min_pool_size = v.parse().unwrap_or(self.database.min_pool_size);
        }
        if let Ok(v) = env::var("MONGO_TLS_INSECURE") {
            self.database.tls_insecure = v.parse().unwrap_or(self.database.tls_insecure);
        }

        // Media overrides
        if let Ok(v) = env::var("CLOUDINARY_CLOUD_NAME") {
            self.media.cloud_name = v;
        }
        if let Ok(v) = env::var("CLOUDINARY_API_KEY") {
            self.media.api_key = v;
        }
        if let Ok(v) = env::var("CLOUDINARY_API_SECRET") {
            self.media.api_secret = v;
        }
        if let Ok(v) = env::var("CLOUDINARY_DIR") {
            self.media.directory = v;
        }
        if let Ok(v) = env::var("CLOUDINARY_API_BASE") {
            self.media.api_base = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("CLOUDINARY_SIGNATURE_ALGORITHM") {
            self.media.signature_algorithm = match v.to_ascii_lowercase().as_str() {
                "sha256" => SignatureAlgorithm::Sha256,
                _ => SignatureAlgorithm::Sha1,
            };
        }

        // API overrides
        if let Ok(v) = env::var("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("API_UPLOAD_TIMEOUT_SECS") {
            self.api.upload_timeout_secs = v.parse().unwrap_or(self.api.upload_timeout_secs);
        }
        if let Ok(v) = env::var("API_MAX_LIMIT") {
            self.api.max_limit = v.parse().unwrap_or(self.api.max_limit);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Ok(v) = env::var("API_CORS_ORIGINS") {
            self.api.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        // Notification overrides
        if let Ok(v) = env::var("TELEGRAM_BOT_TOKEN") {
            self.notify.telegram_bot_token = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("TELEGRAM_CHAT_ID") {
            self.notify.telegram_chat_id = Some(v).filter(|s| !s.is_empty());
        }
        if let Ok(v) = env::var("SITE_URL") {
            self.notify.site_url = v.trim_end_matches('/').to_string();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 20223,
            },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                name: "follooow".to_string(),
                max_pool_size: 100,
                min_pool_size: 5,
                max_idle_time_secs: 30 * 60,
                connect_timeout_secs: 30,
                server_selection_timeout_secs: 30,
                tls_insecure: false,
            },
            media: MediaConfig::default(),
            api: ApiConfig {
                request_timeout_secs: 10,
                upload_timeout_secs: 30,
                default_limit: 6,
                max_limit: 1000,
                max_request_size_bytes: 32 * 1024 * 1024, // 32MB
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            security: SecurityConfig::default(),
            notify: NotifyConfig::default(),
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.api.max_limit = 500;
        config.api.max_request_size_bytes = 16 * 1024 * 1024; // 16MB
        config.api.cors_origins = vec!["https://staging.follooow.com".to_string()];
        config.security.jwt_expiry_hours = 24;
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.api.max_limit = 100;
        config.api.max_request_size_bytes = 16 * 1024 * 1024; // 16MB
        config.api.cors_origins = vec!["https://follooow.com".to_string()];
        config.security.jwt_expiry_hours = 24;
        config
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            directory: "follooow".to_string(),
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
            signature_algorithm: SignatureAlgorithm::Sha1,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiry_hours: 24 * 7, // 1 week
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            telegram_chat_id: None,
            site_url: "https://follooow.com".to_string(),
        }
    }
}
