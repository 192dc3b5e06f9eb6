use anyhow::{Context, Result};
use didit_client::DiditCredentials;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// Callback used when the caller does not supply one
pub const DEFAULT_CALLBACK_URL: &str = "https://caresync.app/verify-callback";

/// Server configuration, read once at start-up
#[derive(Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Platform backend base URL (auth and REST APIs)
    pub platform_url: Url,

    /// Platform anonymous API key
    pub platform_anon_key: String,

    /// Provider credentials; absent credentials fail each request with a
    /// configuration error rather than preventing start-up
    pub didit_credentials: Option<DiditCredentials>,

    /// Provider base URL
    pub didit_base_url: Url,

    /// Callback URL handed to the provider by default
    pub default_callback_url: String,

    /// Whether audit records are written to the platform
    pub audit_log_enabled: bool,

    /// Connect timeout for outbound calls; transport default when unset
    pub connect_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("platform_url", &self.platform_url.as_str())
            .field("platform_anon_key", &"<redacted>")
            .field("didit_credentials", &self.didit_credentials)
            .field("didit_base_url", &self.didit_base_url.as_str())
            .field("default_callback_url", &self.default_callback_url)
            .field("audit_log_enabled", &self.audit_log_enabled)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_address: SocketAddr = var("BIND_ADDRESS")
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
            .parse()
            .context("BIND_ADDRESS must be a socket address")?;

        let platform_url = var("PLATFORM_URL")
            .or_else(|| var("SUPABASE_URL"))
            .context("PLATFORM_URL environment variable required")?;
        let platform_url = Url::parse(&platform_url).context("PLATFORM_URL must be a URL")?;

        let platform_anon_key = var("PLATFORM_ANON_KEY")
            .or_else(|| var("SUPABASE_ANON_KEY"))
            .context("PLATFORM_ANON_KEY environment variable required")?;

        let didit_credentials = match (var("DIDIT_APP_ID"), var("DIDIT_API_KEY")) {
            (Some(app_id), Some(api_key)) => Some(DiditCredentials { app_id, api_key }),
            _ => None,
        };

        let didit_base_url = var("DIDIT_BASE_URL")
            .unwrap_or_else(|| didit_client::DEFAULT_BASE_URL.to_string());
        let didit_base_url =
            Url::parse(&didit_base_url).context("DIDIT_BASE_URL must be a URL")?;

        let default_callback_url =
            var("KYC_CALLBACK_URL").unwrap_or_else(|| DEFAULT_CALLBACK_URL.to_string());
        Url::parse(&default_callback_url).context("KYC_CALLBACK_URL must be a URL")?;

        let audit_log_enabled = match var("AUDIT_LOG_ENABLED") {
            Some(value) => value
                .parse::<bool>()
                .context("AUDIT_LOG_ENABLED must be true or false")?,
            None => true,
        };

        let connect_timeout = var("HTTP_CONNECT_TIMEOUT_SECONDS")
            .map(|secs| secs.parse().map(Duration::from_secs))
            .transpose()
            .context("HTTP_CONNECT_TIMEOUT_SECONDS must be a whole number of seconds")?;

        Ok(Config {
            bind_address,
            platform_url,
            platform_anon_key,
            didit_credentials,
            didit_base_url,
            default_callback_url,
            audit_log_enabled,
            connect_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const PLATFORM: [(&str, &str); 2] = [
        ("PLATFORM_URL", "https://project.example.co"),
        ("PLATFORM_ANON_KEY", "anon"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&PLATFORM).unwrap();

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert!(config.didit_credentials.is_none());
        assert_eq!(config.didit_base_url.as_str(), "https://verification.didit.me/");
        assert_eq!(config.default_callback_url, DEFAULT_CALLBACK_URL);
        assert!(config.audit_log_enabled);
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_provider_credentials_need_both_values() {
        let mut vars = PLATFORM.to_vec();
        vars.push(("DIDIT_APP_ID", "app"));
        assert!(load(&vars).unwrap().didit_credentials.is_none());

        vars.push(("DIDIT_API_KEY", ""));
        assert!(load(&vars).unwrap().didit_credentials.is_none());

        vars.pop();
        vars.push(("DIDIT_API_KEY", "key"));
        let credentials = load(&vars).unwrap().didit_credentials.unwrap();
        assert_eq!(credentials.app_id, "app");
        assert_eq!(credentials.api_key, "key");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = load(&[
            ("PLATFORM_URL", "https://project.example.co"),
            ("PLATFORM_ANON_KEY", "anon-SECRET-123"),
            ("DIDIT_APP_ID", "app"),
            ("DIDIT_API_KEY", "didit-SECRET-456"),
        ])
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("https://project.example.co"));
        assert!(!rendered.contains("anon-SECRET-123"));
        assert!(!rendered.contains("didit-SECRET-456"));
    }

    #[test]
    fn test_supabase_aliases() {
        let config = load(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();

        assert_eq!(config.platform_url.as_str(), "https://project.supabase.co/");
        assert_eq!(config.platform_anon_key, "anon");
    }

    #[test]
    fn test_missing_platform_url_fails() {
        assert!(load(&[("PLATFORM_ANON_KEY", "anon")]).is_err());
    }

    #[test]
    fn test_invalid_values_fail() {
        let mut vars = PLATFORM.to_vec();
        vars.push(("AUDIT_LOG_ENABLED", "maybe"));
        assert!(load(&vars).is_err());

        let mut vars = PLATFORM.to_vec();
        vars.push(("KYC_CALLBACK_URL", "not a url"));
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_optional_settings() {
        let mut vars = PLATFORM.to_vec();
        vars.push(("AUDIT_LOG_ENABLED", "false"));
        vars.push(("HTTP_CONNECT_TIMEOUT_SECONDS", "5"));
        vars.push(("BIND_ADDRESS", "0.0.0.0:9000"));

        let config = load(&vars).unwrap();
        assert!(!config.audit_log_enabled);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.bind_address.port(), 9000);
    }
}
