//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.
//!
//! The config is built once at startup and passed explicitly into the router
//! and middleware. Nothing reads ambient environment state at request time.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `PORT` (optional): HTTP server port, defaults to 5000
/// - `JWT_SECRET` (required): HS256 signing secret for bearer tokens.
///   Required with no fallback: startup fails if it is unset rather than
///   signing tokens with a known constant.
/// - `FRONTEND_ORIGINS` (optional): comma-separated extra CORS origins
/// - `ADMIN_USERNAME` (required): operator login for `/auth/login`
/// - `ADMIN_PASSWORD_SHA256` (required): SHA-256 hex digest of the operator
///   password, so the plaintext never sits in the environment
/// - `TOKEN_TTL_SECS` (optional): issued-token lifetime, defaults to 86400
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub jwt_secret: String,

    #[serde(default)]
    pub frontend_origins: String,

    pub admin_username: String,

    pub admin_password_sha256: String,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

/// Default bearer-token lifetime: 24 hours.
fn default_token_ttl() -> u64 {
    86_400
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Operator-supplied CORS origins from `FRONTEND_ORIGINS`.
    ///
    /// The raw value is a comma-separated list; entries are trimmed and
    /// empty entries (trailing commas, double commas) are dropped.
    pub fn extra_origins(&self) -> Vec<String> {
        self.frontend_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(raw: &str) -> Config {
        Config {
            database_url: "postgres://localhost/tailors".to_string(),
            port: default_port(),
            jwt_secret: "test-secret".to_string(),
            frontend_origins: raw.to_string(),
            admin_username: "admin".to_string(),
            admin_password_sha256: String::new(),
            token_ttl_secs: default_token_ttl(),
        }
    }

    #[test]
    fn extra_origins_splits_and_trims() {
        let config = config_with_origins(" https://shop.example , https://admin.example ");
        assert_eq!(
            config.extra_origins(),
            vec!["https://shop.example", "https://admin.example"]
        );
    }

    #[test]
    fn extra_origins_drops_empty_entries() {
        let config = config_with_origins("https://shop.example,, ,");
        assert_eq!(config.extra_origins(), vec!["https://shop.example"]);
    }

    #[test]
    fn extra_origins_empty_when_unset() {
        let config = config_with_origins("");
        assert!(config.extra_origins().is_empty());
    }
}
