//! One network round trip per call. Retrying is the caller's business.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::warn;

use crate::{ClientConfig, ConfigurationError, SignedRequest, TransportError, TransportResult};

/// Raw outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Final URL of the response.
    pub url: String,
    /// Header pairs in the order received; repeated headers appear once per value.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turns a response the server marked unsuccessful into a [`TransportError`], keeping
    /// its body since error payloads are often meaningful.
    pub fn error_for_status(self) -> TransportResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Unsuccessful {
                status: self.status,
                body: self.text(),
            })
        }
    }
}

/// Executes signed requests.
///
/// Implementations perform exactly one network call per [`Transport::send`] and report
/// connection, TLS and timeout failures as [`TransportError`]. Any response that reached the
/// server, successful or not, is returned as a [`RawResponse`] so its headers can be
/// inspected; the client decides what counts as failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SignedRequest) -> TransportResult<RawResponse>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: &SignedRequest) -> TransportResult<RawResponse> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: ReqwestClient,
}

impl ReqwestTransport {
    /// Builds a `reqwest` client honoring the user agent, TLS verification and timeout
    /// settings of `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigurationError> {
        warn_unapplied(config, false);
        let mut builder = ReqwestClient::builder().user_agent(config.user_agent.as_str());
        #[cfg(any(feature = "rustls-tls", feature = "native-tls"))]
        {
            builder = builder.danger_accept_invalid_certs(!config.ssl_verify);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(ConfigurationError::HttpClientBuild)?;
        Ok(ReqwestTransport { inner })
    }

    /// Wraps an existing `reqwest::Client` as is.
    pub fn with_client(client: ReqwestClient) -> Self {
        ReqwestTransport { inner: client }
    }
}

/// Settings of `config` a `reqwest` client cannot honor. A wrapped client was built
/// elsewhere, so neither certificate checks nor the timeout can be changed; a client built
/// here needs a TLS backend to skip certificate checks.
pub(crate) fn unapplied_settings(config: &ClientConfig, wrapped: bool) -> Vec<&'static str> {
    let tls_backend = cfg!(any(feature = "rustls-tls", feature = "native-tls"));
    let mut unapplied = Vec::new();
    if !config.ssl_verify && (wrapped || !tls_backend) {
        unapplied.push("ssl_verify");
    }
    if wrapped && config.timeout.is_some() {
        unapplied.push("timeout");
    }
    unapplied
}

pub(crate) fn warn_unapplied(config: &ClientConfig, wrapped: bool) {
    for setting in unapplied_settings(config, wrapped) {
        warn!(setting, wrapped, "setting is not applied to the reqwest client");
    }
}

impl From<ReqwestClient> for ReqwestTransport {
    fn from(client: ReqwestClient) -> Self {
        ReqwestTransport::with_client(client)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &SignedRequest) -> TransportResult<RawResponse> {
        let builder = self
            .inner
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        let builder = if request.has_form_body() {
            builder.form(&request.parameters)
        } else {
            builder.query(&request.parameters)
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            url,
            headers,
            body,
        })
    }
}
