use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Storage
    pub upload_dir: PathBuf,
    pub media_dir: PathBuf,
    pub max_upload_bytes: usize,

    // Signed media URLs
    pub public_base_url: String,
    pub media_signing_key: String,
    pub media_url_ttl: u64,

    // Messaging relay
    pub whatsapp_api_url: String,
    pub whatsapp_token: String,
    pub default_country_code: String,

    // Rate limiting
    pub rate_api_per_min: u32,
    pub rate_upload_per_min: u32,
    pub rate_notify_per_min: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var_or("API_PREFIX", ""),

            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "uploads")),
            media_dir: PathBuf::from(var_or("MEDIA_DIR", "media")),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),

            public_base_url: var_or("PUBLIC_BASE_URL", "http://127.0.0.1:8080"),
            media_signing_key: env::var("MEDIA_SIGNING_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .context("MEDIA_SIGNING_KEY must be set")?,
            media_url_ttl: parse_or("MEDIA_URL_TTL", 3600), // default 1 hour

            whatsapp_api_url: var_or("WHATSAPP_API_URL", ""),
            whatsapp_token: var_or("WHATSAPP_TOKEN", ""),
            default_country_code: var_or("DEFAULT_COUNTRY_CODE", "91"),

            rate_api_per_min: parse_or("RATE_API_PER_MIN", 600),
            rate_upload_per_min: parse_or("RATE_UPLOAD_PER_MIN", 30),
            rate_notify_per_min: parse_or("RATE_NOTIFY_PER_MIN", 10),
        })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}

/// Directory for the rolling log file; read before the rest of the config so
/// configuration warnings already reach the log.
pub fn log_dir() -> PathBuf {
    PathBuf::from(var_or("LOG_DIR", "logs"))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "Invalid number in environment, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests(root: &std::path::Path) -> Self {
        Self {
            server_addr: "127.0.0.1:0".into(),
            api_prefix: String::new(),
            upload_dir: root.join("uploads"),
            media_dir: root.join("media"),
            max_upload_bytes: 1024 * 1024,
            public_base_url: "http://viewer.test/".into(),
            media_signing_key: "test-signing-key".into(),
            media_url_ttl: 600,
            whatsapp_api_url: String::new(),
            whatsapp_token: String::new(),
            default_country_code: "91".into(),
            rate_api_per_min: 10_000,
            rate_upload_per_min: 10_000,
            rate_notify_per_min: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = Config::for_tests(std::path::Path::new("/tmp"));
        assert_eq!(config.base_url(), "http://viewer.test");
    }

    #[test]
    fn unparsable_number_falls_back_to_default() {
        // SAFETY: the key is unique to this test.
        unsafe { env::set_var("ATTENDANCE_TEST_BAD_NUMBER", "ten") };
        assert_eq!(parse_or::<u32>("ATTENDANCE_TEST_BAD_NUMBER", 10), 10);
        assert_eq!(parse_or::<u32>("ATTENDANCE_TEST_UNSET_NUMBER", 7), 7);
    }
}
