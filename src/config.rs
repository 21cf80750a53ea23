//! Client configuration and the OAuth endpoint templates.

use std::{fmt, sync::Arc, time::Duration};

use http::HeaderValue;
use serde::Deserialize;
use url::Url;

use crate::{ConfigurationError, DebugLogger, TracingLogger};

const DEFAULT_HOST: &str = "https://api.twitter.com/1.1/";
const DEFAULT_FORMAT: &str = "json";
const DEFAULT_USER_AGENT: &str = concat!("oauth1-rest-client/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// The three handshake endpoints plus the lighter sign-in variant of the authorize page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub request_token: String,
    pub authorize: String,
    pub authenticate: String,
    pub access_token: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            request_token: "https://api.twitter.com/oauth/request_token".to_string(),
            authorize: "https://api.twitter.com/oauth/authorize".to_string(),
            authenticate: "https://api.twitter.com/oauth/authenticate".to_string(),
            access_token: "https://api.twitter.com/oauth/access_token".to_string(),
        }
    }
}

impl Endpoints {
    /// All four endpoints below one root, e.g. `https://api.example.com/oauth/`.
    pub fn with_root(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Endpoints {
            request_token: format!("{}/request_token", root),
            authorize: format!("{}/authorize", root),
            authenticate: format!("{}/authenticate", root),
            access_token: format!("{}/access_token", root),
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        for endpoint in [
            &self.request_token,
            &self.authorize,
            &self.authenticate,
            &self.access_token,
        ] {
            Url::parse(endpoint)
                .map_err(|e| ConfigurationError::InvalidUrl(endpoint.clone(), e))?;
        }
        Ok(())
    }
}

/// Everything that shapes how a client talks to the API.
///
/// Deserializable so a configuration loader can supply it; the debug logger is the one
/// field that has to be set in code.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root that bare resource paths are appended to.
    pub host: String,
    /// Extension appended to bare resource paths; also selects JSON decoding when `json`.
    pub format: String,
    pub decode_json: bool,
    pub user_agent: String,
    /// Retry resource calls that fail at the transport level.
    pub retry: bool,
    /// Retries after the first attempt; a call makes at most `retry_attempts + 1` requests.
    pub retry_attempts: u32,
    /// Pause between attempts. Zero retries immediately.
    pub retry_backoff: Duration,
    /// Verify TLS certificates. `false` only takes effect with a TLS backend feature enabled
    /// and on clients built from this config; otherwise a warning is logged.
    pub ssl_verify: bool,
    /// Whole-request timeout. Not applied to a wrapped `reqwest::Client`.
    pub timeout: Option<Duration>,
    pub debug_enabled: bool,
    #[serde(skip, default = "default_debug_logger")]
    pub debug_logger: Arc<dyn DebugLogger>,
    pub endpoints: Endpoints,
}

fn default_debug_logger() -> Arc<dyn DebugLogger> {
    Arc::new(TracingLogger)
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            decode_json: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: true,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_backoff: Duration::ZERO,
            ssl_verify: true,
            timeout: None,
            debug_enabled: false,
            debug_logger: default_debug_logger(),
            endpoints: Endpoints::default(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("format", &self.format)
            .field("decode_json", &self.decode_json)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_backoff", &self.retry_backoff)
            .field("ssl_verify", &self.ssl_verify)
            .field("timeout", &self.timeout)
            .field("debug_enabled", &self.debug_enabled)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn host<T: Into<String>>(self, host: T) -> Self {
        ClientConfig {
            host: host.into(),
            ..self
        }
    }

    pub fn format<T: Into<String>>(self, format: T) -> Self {
        ClientConfig {
            format: format.into(),
            ..self
        }
    }

    pub fn decode_json(self, decode_json: bool) -> Self {
        ClientConfig {
            decode_json,
            ..self
        }
    }

    pub fn user_agent<T: Into<String>>(self, user_agent: T) -> Self {
        ClientConfig {
            user_agent: user_agent.into(),
            ..self
        }
    }

    pub fn retry(self, retry: bool) -> Self {
        ClientConfig { retry, ..self }
    }

    pub fn retry_attempts(self, retry_attempts: u32) -> Self {
        ClientConfig {
            retry_attempts,
            ..self
        }
    }

    pub fn retry_backoff(self, retry_backoff: Duration) -> Self {
        ClientConfig {
            retry_backoff,
            ..self
        }
    }

    /// Verify TLS certificates. Turning this off only affects clients built from this
    /// config with the `rustls-tls` or `native-tls` feature, not a wrapped
    /// `reqwest::Client`.
    pub fn ssl_verify(self, ssl_verify: bool) -> Self {
        ClientConfig { ssl_verify, ..self }
    }

    /// Not applied to a wrapped `reqwest::Client`.
    pub fn timeout(self, timeout: Duration) -> Self {
        ClientConfig {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn debug(self, debug_enabled: bool) -> Self {
        ClientConfig {
            debug_enabled,
            ..self
        }
    }

    pub fn debug_logger<T>(self, logger: T) -> Self
    where
        T: DebugLogger + 'static,
    {
        ClientConfig {
            debug_logger: Arc::new(logger),
            ..self
        }
    }

    pub fn endpoints(self, endpoints: Endpoints) -> Self {
        ClientConfig { endpoints, ..self }
    }

    /// Whether response bodies are decoded as JSON.
    pub fn decodes_json(&self) -> bool {
        self.decode_json && self.format == DEFAULT_FORMAT
    }

    /// Adds the host and the format extension to bare resource paths.
    ///
    /// `statuses/home_timeline` becomes `{host}statuses/home_timeline.{format}`; anything
    /// starting with `http://` or `https://` is returned unchanged.
    pub fn normalize_url(&self, url: &str) -> String {
        if url.starts_with("https://") || url.starts_with("http://") {
            url.to_string()
        } else {
            format!("{}{}.{}", self.host, url, self.format)
        }
    }

    pub(crate) fn user_agent_header(&self) -> Result<HeaderValue, ConfigurationError> {
        HeaderValue::from_str(&self.user_agent)
            .map_err(|_| ConfigurationError::InvalidHeader("user-agent"))
    }

    /// Checks the settings that would otherwise only fail at the first request.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        Url::parse(&self.host).map_err(|e| ConfigurationError::InvalidUrl(self.host.clone(), e))?;
        self.endpoints.validate()?;
        self.user_agent_header()?;
        Ok(())
    }
}
