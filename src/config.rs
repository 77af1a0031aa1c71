use anyhow::Result;
use serde::Deserialize;
use std::fmt;

/// Default path of the token endpoint, relative to the page origin.
pub const DEFAULT_ENDPOINT: &str = "/api/connection-details";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub livekit: LiveKitConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// LiveKit credentials. All three values are optional at load time; the
/// token endpoint refuses to mint while any of them is missing.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LiveKitConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Lifetime of minted participant tokens. Default: 900 (15 minutes).
    pub token_ttl_secs: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            api_secret: None,
            token_ttl_secs: 15 * 60,
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field(
                "api_secret",
                &self.api_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: Some(url.into()),
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Token endpoint, absolute or relative to `origin`
    pub endpoint: String,
    /// Origin the endpoint is resolved against
    pub origin: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            origin: "http://localhost:3000".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file plus the process environment.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load configuration, resolving the well-known LiveKit variables through
    /// `lookup`.
    ///
    /// Precedence (lowest first): file at `path` (optional), `VOXGATE__*`
    /// environment variables, then `LIVEKIT_URL` / `LIVEKIT_API_KEY` /
    /// `LIVEKIT_API_SECRET` / `CONN_DETAILS_ENDPOINT`. The `NEXT_PUBLIC_`
    /// spellings of the URL and endpoint are accepted as fallbacks.
    pub fn load_with<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("LIVEKIT_URL").or_else(|| lookup("NEXT_PUBLIC_LIVEKIT_URL"));
        let endpoint = lookup("CONN_DETAILS_ENDPOINT")
            .or_else(|| lookup("NEXT_PUBLIC_CONN_DETAILS_ENDPOINT"));

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("VOXGATE").separator("__"))
            .set_override_option("livekit.url", url)?
            .set_override_option("livekit.api_key", lookup("LIVEKIT_API_KEY"))?
            .set_override_option("livekit.api_secret", lookup("LIVEKIT_API_SECRET"))?
            .set_override_option("client.endpoint", endpoint)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
