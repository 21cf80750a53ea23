use http::{header::USER_AGENT, Method};
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    signer::percent_encode,
    token_reader::read_oauth_token,
    AccessToken, AsOAuthToken, ClientConfig, DebugInfo, OAuthParameters, RawResponse, RequestBuilder,
    RequestToken, ReqwestTransport, ResponseInfo, RetryDecision, RetryPolicy, Secrets,
    SignedRequest, TokenResponse, Transport, TransportResult,
};

/// Turns a `reqwest::Client` into an OAuth 1.0a client.
///
/// The wrapped client keeps its own TLS and timeout settings; `ssl_verify` and `timeout` of
/// the given [`ClientConfig`] are not applied and a warning is logged when they are set.
pub trait OAuthClientProvider {
    fn oauth1(self, secrets: Secrets) -> Result<Client<ReqwestTransport>>
    where
        Self: Sized,
    {
        self.oauth1_with_config(secrets, ClientConfig::default())
    }

    fn oauth1_with_config(
        self,
        secrets: Secrets,
        config: ClientConfig,
    ) -> Result<Client<ReqwestTransport>>
    where
        Self: Sized;
}

impl OAuthClientProvider for ReqwestClient {
    fn oauth1_with_config(
        self,
        secrets: Secrets,
        config: ClientConfig,
    ) -> Result<Client<ReqwestTransport>> {
        crate::transport::warn_unapplied(&config, true);
        Client::with_transport(secrets, config, ReqwestTransport::with_client(self))
    }
}

/// Decoded body of a resource call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Raw(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Raw(text) => Some(text),
        }
    }
}

/// OAuth 1.0a client: runs the three-legged handshake and signs resource calls.
///
/// A client owns its credentials and its retry counter, so operations that touch either
/// take `&mut self`. Share one between tasks behind a mutex.
#[derive(Debug)]
pub struct Client<T = ReqwestTransport> {
    transport: T,
    secrets: Secrets,
    config: ClientConfig,
    retry: RetryPolicy,
    last_response: Option<ResponseInfo>,
    debug_info: Option<DebugInfo>,
}

impl Client<ReqwestTransport> {
    /// Constructs a new `Client` with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails when the consumer key or secret is empty, before any network activity.
    pub fn new(secrets: Secrets) -> Result<Self> {
        Client::with_config(secrets, ClientConfig::default())
    }

    /// Constructs a new `Client` whose `reqwest` client is built from `config`.
    pub fn with_config(secrets: Secrets, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Client::with_transport(secrets, config, transport)
    }
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Constructs a new `Client` on top of any [`Transport`].
    pub fn with_transport(secrets: Secrets, config: ClientConfig, transport: T) -> Result<Self> {
        secrets.validate()?;
        config.validate()?;
        Ok(Client {
            transport,
            retry: RetryPolicy::from_config(&config),
            secrets,
            config,
            last_response: None,
            debug_info: None,
        })
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Installs a token pair obtained elsewhere, e.g. restored from a session.
    pub fn set_token<TKey, TSecret>(&mut self, token: TKey, token_secret: TSecret)
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        self.secrets.set_token(token, token_secret);
    }

    pub fn clear_token(&mut self) {
        self.secrets.clear_token();
    }

    /// Turns on debug output for the following calls: trace lines go to the configured
    /// [`DebugLogger`](crate::DebugLogger) and [`Client::debug_info`] is recorded.
    pub fn enable_debug(&mut self) {
        self.config.debug_enabled = true;
    }

    /// Base string, headers and raw body of the last call made while debugging was enabled.
    pub fn debug_info(&self) -> Option<&DebugInfo> {
        self.debug_info.as_ref()
    }

    /// Retries spent on the call in progress; zero between calls.
    pub fn current_retries(&self) -> u32 {
        self.retry.current_retries()
    }

    /// See [`ClientConfig::normalize_url`].
    pub fn normalize_url(&self, url: &str) -> String {
        self.config.normalize_url(url)
    }

    /// Metadata of the most recent response, or an empty [`ResponseInfo`] before the first
    /// call.
    pub fn last_response_info(&self) -> ResponseInfo {
        self.last_response.clone().unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Three-legged handshake

    /// Step 1: obtains temporary credentials from the request-token endpoint.
    ///
    /// The call is signed with the consumer credentials only and never retried. On success
    /// the returned pair becomes the client's token, so [`Client::access_token`] is signed
    /// with it.
    pub async fn request_token(&mut self, callback: Option<&str>) -> Result<RequestToken> {
        let endpoint = self.config.endpoints.request_token.clone();
        let mut oauth = OAuthParameters::new();
        if let Some(callback) = callback {
            oauth = oauth.callback(callback);
        }
        let secrets = self.secrets.consumer_only();

        let token = self.handshake(&endpoint, &secrets, oauth).await?;
        self.secrets
            .set_token(token.oauth_token.as_str(), token.oauth_token_secret.as_str());
        Ok(token)
    }

    /// Step 2: the URL the user is sent to.
    ///
    /// `use_authenticate` selects the sign-in variant, which skips the approval page for
    /// users who already authorized the application. No network call is made.
    pub fn authorize_url<K>(&self, token: &K, use_authenticate: bool) -> String
    where
        K: AsOAuthToken + ?Sized,
    {
        let endpoint = if use_authenticate {
            &self.config.endpoints.authenticate
        } else {
            &self.config.endpoints.authorize
        };
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}oauth_token={}",
            endpoint,
            separator,
            percent_encode(token.as_oauth_token())
        )
    }

    /// Step 3: exchanges the verifier for token credentials.
    ///
    /// The credentials are replaced only after the response has been parsed completely; a
    /// failed exchange leaves the request token in place.
    pub async fn access_token(&mut self, verifier: Option<&str>) -> Result<AccessToken> {
        let endpoint = self.config.endpoints.access_token.clone();
        let mut oauth = OAuthParameters::new();
        if let Some(verifier) = verifier {
            oauth = oauth.verifier(verifier);
        }
        let secrets = self.secrets.clone();

        let token = self.handshake(&endpoint, &secrets, oauth).await?;
        self.secrets
            .set_token(token.oauth_token.as_str(), token.oauth_token_secret.as_str());
        Ok(token)
    }

    async fn handshake(
        &mut self,
        endpoint: &str,
        secrets: &Secrets,
        oauth: OAuthParameters,
    ) -> Result<TokenResponse> {
        let signed = self
            .request_builder(Method::POST, endpoint)?
            .sign(secrets, oauth)?;
        debug!(url = %endpoint, "requesting token");

        let response = self
            .dispatch(&signed)
            .await
            .map_err(|e| Error::transport(endpoint, e))?;
        read_oauth_token(&response.body).map_err(|e| Error::protocol(endpoint, e))
    }

    // ------------------------------------------------------------------------
    // Resource calls

    /// Convenience method to make a `GET` request.
    ///
    /// `url` is either absolute or a resource path such as `statuses/home_timeline`, see
    /// [`ClientConfig::normalize_url`].
    pub async fn get<P>(&mut self, url: &str, parameters: &P) -> Result<Payload>
    where
        P: Serialize + ?Sized,
    {
        self.request(Method::GET, url, parameters).await
    }

    /// Convenience method to make a `POST` request.
    pub async fn post<P>(&mut self, url: &str, parameters: &P) -> Result<Payload>
    where
        P: Serialize + ?Sized,
    {
        self.request(Method::POST, url, parameters).await
    }

    /// Convenience method to make a `DELETE` request.
    pub async fn delete<P>(&mut self, url: &str, parameters: &P) -> Result<Payload>
    where
        P: Serialize + ?Sized,
    {
        self.request(Method::DELETE, url, parameters).await
    }

    /// Signs and sends a resource call, retrying transport failures as configured.
    ///
    /// Every attempt is signed again, so each carries its own nonce and timestamp.
    ///
    /// # Errors
    ///
    /// The last [`TransportError`](crate::TransportError) once retries are exhausted, wrapped with the target URL;
    /// [`Error::Decode`] when JSON decoding is enabled and the body is not JSON.
    pub async fn request<P>(
        &mut self,
        method: Method,
        url: &str,
        parameters: &P,
    ) -> Result<Payload>
    where
        P: Serialize + ?Sized,
    {
        self.retry.reset();
        let url = self.normalize_url(url);
        let builder = self.request_builder(method, &url)?.parameters(parameters)?;

        loop {
            let signed = builder.sign(&self.secrets, OAuthParameters::new())?;
            if self.config.debug_enabled {
                self.config.debug_logger.log(&format!(
                    "response for {} {}, with params {} = ",
                    signed.method,
                    url,
                    signed.encoded_parameters()
                ));
            }
            debug!(
                method = %signed.method,
                url = %url,
                attempt = self.retry.current_retries() + 1,
                "sending signed request"
            );

            match self.dispatch(&signed).await {
                Ok(response) => {
                    self.retry.on_success();
                    return self.decode(&url, response);
                }
                Err(err) => {
                    if self.config.debug_enabled {
                        self.config.debug_logger.log(&format!("\t - {}", err));
                        self.config
                            .debug_logger
                            .log(&format!("{:#?}", self.last_response_info()));
                    }
                    match self.retry.on_failure() {
                        RetryDecision::Retry(delay) => {
                            warn!(
                                url = %url,
                                attempt = self.retry.current_retries(),
                                error = %err,
                                "request failed, retrying"
                            );
                            if !delay.is_zero() {
                                tokio::time::sleep(delay).await;
                            }
                        }
                        RetryDecision::GiveUp => {
                            warn!(url = %url, error = %err, "request failed, giving up");
                            return Err(Error::transport(url, err));
                        }
                    }
                }
            }
        }
    }

    fn request_builder(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let user_agent = self.config.user_agent_header()?;
        Ok(RequestBuilder::parse(method, url)?.header(USER_AGENT, user_agent))
    }

    /// One transport call; records the response metadata whatever the outcome.
    async fn dispatch(&mut self, request: &SignedRequest) -> TransportResult<RawResponse> {
        let result = self.transport.send(request).await;
        let now = OffsetDateTime::now_utc();
        if self.config.debug_enabled {
            self.debug_info = Some(DebugInfo {
                base_string: request.base_string.clone(),
                headers_sent: request
                    .headers
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.as_str().to_string(),
                            String::from_utf8_lossy(value.as_bytes()).into_owned(),
                        )
                    })
                    .collect(),
                response_body: result.as_ref().ok().map(RawResponse::text),
            });
        }
        match result {
            Ok(response) => {
                self.last_response = Some(ResponseInfo::from_response(&response, now));
                response.error_for_status()
            }
            Err(err) => {
                self.last_response = Some(ResponseInfo {
                    url: Some(request.url.to_string()),
                    http_status: err.status(),
                    ..ResponseInfo::default()
                });
                Err(err)
            }
        }
    }

    fn decode(&self, url: &str, response: RawResponse) -> Result<Payload> {
        if !self.config.decodes_json() {
            return Ok(Payload::Raw(response.text()));
        }
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload::Json(Value::Null));
        }
        let value = serde_json::from_slice::<Value>(&response.body).map_err(|e| Error::Decode {
            url: url.to_string(),
            source: e,
        })?;
        if self.config.debug_enabled {
            self.config.debug_logger.log(&format!("\t{:#}\n", value));
        }
        Ok(Payload::Json(value))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;

    use super::*;
    use crate::{ConfigurationError, Endpoints, ProtocolError, SecretsProvider, TransportError};

    /// Replays canned outcomes and keeps every request it was given.
    #[derive(Debug, Default)]
    struct StubTransport {
        outcomes: Mutex<VecDeque<TransportResult<RawResponse>>>,
        requests: Mutex<Vec<SignedRequest>>,
    }

    impl StubTransport {
        fn new(outcomes: Vec<TransportResult<RawResponse>>) -> Arc<Self> {
            Arc::new(StubTransport {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn authorizations(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.authorization().unwrap().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, request: &SignedRequest) -> TransportResult<RawResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportError::RequestFailed))
        }
    }

    fn ok(body: &str) -> TransportResult<RawResponse> {
        Ok(RawResponse {
            status: 200,
            url: "https://api.example.com/".to_string(),
            headers: vec![("x-rate-limit-remaining".to_string(), "14".to_string())],
            body: body.as_bytes().to_vec(),
        })
    }

    fn failed() -> TransportResult<RawResponse> {
        Err(TransportError::RequestFailed)
    }

    fn client(
        outcomes: Vec<TransportResult<RawResponse>>,
        config: ClientConfig,
    ) -> (Client<Arc<StubTransport>>, Arc<StubTransport>) {
        let stub = StubTransport::new(outcomes);
        let client = Client::with_transport(
            Secrets::new("consumer-key", "consumer-secret").token("AT", "ATS"),
            config,
            stub.clone(),
        )
        .unwrap();
        (client, stub)
    }

    #[tokio::test]
    async fn retries_until_success() {
        let (mut client, stub) = client(
            vec![failed(), failed(), ok("{\"id\":1}")],
            ClientConfig::default(),
        );

        let payload = client
            .get("statuses/show/1", &[("trim_user", "true")])
            .await
            .unwrap();

        assert_eq!(payload.as_json().unwrap()["id"], 1);
        assert_eq!(stub.calls(), 3);
        assert_eq!(client.current_retries(), 0);

        // a new signature for every attempt
        let auths = stub.authorizations();
        assert_ne!(auths[0], auths[1]);
        assert_ne!(auths[1], auths[2]);
    }

    #[tokio::test]
    async fn gives_up_after_retry_attempts_plus_one() {
        let (mut client, stub) = client(vec![], ClientConfig::default().retry_attempts(2));

        let err = client
            .post("statuses/update", &[("status", "hello")])
            .await
            .unwrap_err();

        assert_eq!(stub.calls(), 3);
        assert_eq!(client.current_retries(), 0);
        assert_eq!(
            err.url(),
            Some("https://api.twitter.com/1.1/statuses/update.json")
        );
        assert!(matches!(
            err,
            Error::Transport {
                source: TransportError::RequestFailed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn abandoned_call_leaves_full_budget_for_next() {
        let (mut client, stub) = client(
            vec![],
            ClientConfig::default().retry_backoff(Duration::from_millis(100)),
        );

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), client.get("help/test", &())).await;
        assert!(abandoned.is_err());
        assert_eq!(stub.calls(), 1);
        assert_eq!(client.current_retries(), 1);

        assert!(client.get("help/test", &()).await.is_err());
        assert_eq!(stub.calls(), 1 + 4);
        assert_eq!(client.current_retries(), 0);
    }

    #[tokio::test]
    async fn retry_disabled_sends_once() {
        let (mut client, stub) = client(
            vec![failed(), ok("{}")],
            ClientConfig::default().retry(false),
        );

        assert!(client
            .delete("https://api.example.com/items/1.json", &())
            .await
            .is_err());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn unsuccessful_status_records_headers() {
        let unavailable = Ok(RawResponse {
            status: 503,
            url: "https://api.example.com/".to_string(),
            headers: vec![("Retry-After".to_string(), "30".to_string())],
            body: b"{\"errors\":\"over capacity\"}".to_vec(),
        });
        let (mut client, stub) = client(
            vec![unavailable],
            ClientConfig::default().retry_attempts(0),
        );

        let err = client.get("statuses/home_timeline", &()).await.unwrap_err();

        assert_eq!(stub.calls(), 1);
        match err {
            Error::Transport {
                source: TransportError::Unsuccessful { status, body },
                ..
            } => {
                assert_eq!(status, 503);
                assert!(body.contains("over capacity"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let info = client.last_response_info();
        assert_eq!(info.http_status, Some(503));
        assert_eq!(info.rate_limit_remaining, Some(0));
    }

    #[tokio::test]
    async fn raw_payload_when_decoding_disabled() {
        let (mut client, _stub) = client(
            vec![ok("not json")],
            ClientConfig::default().decode_json(false),
        );

        let payload = client.get("help/test", &()).await.unwrap();

        assert_eq!(payload.as_raw(), Some("not json"));
        assert_eq!(client.last_response_info().rate_limit_remaining, Some(14));
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let (mut client, stub) = client(vec![ok("<html>")], ClientConfig::default());

        let err = client.get("help/test", &()).await.unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn empty_body_decodes_to_null() {
        let (mut client, _stub) = client(vec![ok("")], ClientConfig::default());
        let payload = client.delete("favorites/destroy/1", &()).await.unwrap();
        assert_eq!(payload, Payload::Json(Value::Null));
    }

    #[tokio::test]
    async fn debug_lines_reach_injected_logger() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let config = ClientConfig::default()
            .debug(true)
            .retry_attempts(1)
            .debug_logger(move |line: &str| sink.lock().unwrap().push(line.to_string()));
        let (mut client, _stub) = client(vec![failed(), ok("{\"ok\":true}")], config);

        client.get("help/test", &[("a", "b")]).await.unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(
            lines[0],
            "response for GET https://api.twitter.com/1.1/help/test.json, with params a=b = "
        );
        assert!(lines.iter().any(|l| l.contains("request failed")));
        assert!(lines.last().unwrap().contains("\"ok\": true"));
    }

    #[tokio::test]
    async fn enable_debug_records_wire_details() {
        let (mut client, stub) = client(
            vec![ok("{\"ok\":true}"), ok("{\"ok\":false}")],
            ClientConfig::default().retry(false),
        );

        client.get("help/test", &()).await.unwrap();
        assert!(client.debug_info().is_none());

        client.enable_debug();
        assert!(client.config().debug_enabled);
        client.get("help/test", &[("a", "b")]).await.unwrap();

        let info = client.debug_info().unwrap();
        assert!(info
            .base_string
            .starts_with("GET&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fhelp%2Ftest.json&a%3Db%26"));
        let authorization = info
            .headers_sent
            .iter()
            .find(|(name, _)| name == "authorization")
            .map(|(_, value)| value.clone());
        assert_eq!(authorization, Some(stub.authorizations()[1].clone()));
        assert!(info.headers_sent.iter().any(|(name, _)| name == "user-agent"));
        assert_eq!(info.response_body.as_deref(), Some("{\"ok\":false}"));

        // no response at all
        assert!(client.get("help/test", &()).await.is_err());
        assert_eq!(client.debug_info().unwrap().response_body, None);
    }

    #[tokio::test]
    async fn request_token_installs_pending_credentials() {
        let stub = StubTransport::new(vec![ok(
            "oauth_token=RT&oauth_token_secret=RTS&oauth_callback_confirmed=true",
        )]);
        let mut client = Client::with_transport(
            Secrets::new("consumer-key", "consumer-secret"),
            ClientConfig::default(),
            stub.clone(),
        )
        .unwrap();

        let token = client.request_token(Some("http://cb")).await.unwrap();

        assert!(token.callback_confirmed());
        assert_eq!(client.secrets().get_token_pair_option(), Some(("RT", "RTS")));
        let auth = &stub.authorizations()[0];
        assert!(auth.contains("oauth_callback=\"http%3A%2F%2Fcb\""));
        assert!(!auth.contains("oauth_token="));
        assert!(client.authorize_url(&token, true).contains("oauth_token=RT"));
    }

    #[tokio::test]
    async fn handshake_is_not_retried() {
        let (mut client, stub) = client(
            vec![failed(), ok("oauth_token=X&oauth_token_secret=Y")],
            ClientConfig::default(),
        );

        let err = client.access_token(Some("verifier123")).await.unwrap_err();

        assert_eq!(stub.calls(), 1);
        assert_eq!(err.url(), Some("https://api.twitter.com/oauth/access_token"));
        assert_eq!(client.secrets().get_token_pair_option(), Some(("AT", "ATS")));
    }

    #[tokio::test]
    async fn malformed_access_token_leaves_credentials() {
        let (mut client, stub) = client(vec![ok("oauth_token=only")], ClientConfig::default());

        let err = client.access_token(Some("verifier123")).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol {
                source: ProtocolError::TokenKeyNotFound("oauth_token_secret", _),
                ..
            }
        ));
        assert_eq!(stub.calls(), 1);
        assert_eq!(client.secrets().get_token_pair_option(), Some(("AT", "ATS")));
    }

    #[tokio::test]
    async fn access_token_signs_with_request_token_and_verifier() {
        let (mut client, stub) = client(
            vec![ok("oauth_token=AT2&oauth_token_secret=ATS2&user_id=42&screen_name=bob")],
            ClientConfig::default(),
        );

        let token = client.access_token(Some("verifier123")).await.unwrap();

        let auth = &stub.authorizations()[0];
        assert!(auth.contains("oauth_token=\"AT\""));
        assert!(auth.contains("oauth_verifier=\"verifier123\""));
        assert_eq!(token.get("user_id"), Some("42"));
        assert_eq!(client.secrets().get_token_pair_option(), Some(("AT2", "ATS2")));
    }

    #[test]
    fn authorize_url_variants() {
        let (client, _stub) = client(vec![], ClientConfig::default());
        let token = read_oauth_token(b"oauth_token=abc&oauth_token_secret=s").unwrap();

        assert_eq!(
            client.authorize_url(&token, true),
            "https://api.twitter.com/oauth/authenticate?oauth_token=abc"
        );
        assert_eq!(
            client.authorize_url("abc", false),
            "https://api.twitter.com/oauth/authorize?oauth_token=abc"
        );

        let (client, _stub) = self::client(
            vec![],
            ClientConfig::default().endpoints(Endpoints {
                authorize: "https://example.com/authorize?force_login=true".to_string(),
                ..Endpoints::default()
            }),
        );
        assert_eq!(
            client.authorize_url("a b", false),
            "https://example.com/authorize?force_login=true&oauth_token=a%20b"
        );
    }

    #[test]
    fn construction_fails_fast() {
        let stub = StubTransport::new(vec![]);
        let err = Client::with_transport(
            Secrets::new("", "secret"),
            ClientConfig::default(),
            stub.clone(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::MissingConsumerKey)
        ));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn last_response_info_before_any_call() {
        let (client, _stub) = client(vec![], ClientConfig::default());
        assert_eq!(client.last_response_info(), ResponseInfo::default());
    }

    #[test]
    fn reqwest_client_provider() {
        let client = ReqwestClient::new()
            .oauth1(Secrets::new("consumer-key", "consumer-secret"))
            .unwrap();
        assert!(!client.secrets().has_token());
        assert!(ReqwestClient::new().oauth1(Secrets::new("key", "")).is_err());
    }
}
