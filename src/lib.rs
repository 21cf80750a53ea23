/*!
oauth1-rest-client: an OAuth 1.0a REST client on top of [reqwest](https://crates.io/crates/reqwest).

# Overview

This library signs requests with HMAC-SHA1 as described in
[RFC 5849](https://tools.ietf.org/html/rfc5849), runs the three-legged token handshake, and
makes `GET`, `POST` and `DELETE` calls against a REST API with bounded retries. Rate-limit
headers of the last response are exposed as [`ResponseInfo`].

The defaults target the Twitter 1.1 API; any OAuth 1.0a provider can be used by changing
[`ClientConfig::host`] and [`ClientConfig::endpoints`].

# How to use

## Basic usecase 1 - sending the tweet

```no_run
use oauth1_rest_client::{Client, Secrets};

# async fn run() -> oauth1_rest_client::Result<()> {
// prepare authorization info
let consumer_key = "[CONSUMER_KEY]";
let consumer_secret = "[CONSUMER_SECRET]";
let access_token = "[ACCESS_TOKEN]";
let token_secret = "[TOKEN_SECRET]";

let secrets = Secrets::new(consumer_key, consumer_secret).token(access_token, token_secret);

let mut client = Client::new(secrets)?;
// "statuses/update" expands to https://api.twitter.com/1.1/statuses/update.json
let tweet = client
    .post("statuses/update", &[("status", "Hello, Twitter!")])
    .await?;
println!("{:?}", tweet);

let info = client.last_response_info();
println!("{:?} calls left until {:?}", info.rate_limit_remaining, info.reset_at());
# Ok(())
# }
```

## Basic usecase 2 - Acquiring OAuth token & secret

```no_run
use std::io;
use oauth1_rest_client::{Client, Secrets};

# async fn run() -> Result<(), Box<dyn std::error::Error>> {
let secrets = Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let mut client = Client::new(secrets)?;

// step 1: acquire request token & token secret
let request_token = client.request_token(Some("oob")).await?;

// step 2. acquire user pin
println!("please access to: {}", client.authorize_url(&request_token, false));

println!("input pin: ");
let mut user_input = String::new();
io::stdin().read_line(&mut user_input)?;
let pin = user_input.trim();

// step 3. acquire access token
let access_token = client.access_token(Some(pin)).await?;
println!(
    "your token and secret is: \n token: {}\n secret: {}",
    access_token.oauth_token, access_token.oauth_token_secret
);
println!("other attributes: {:#?}", access_token.extra);
# Ok(())
# }
```

## Wrapping an existing reqwest client

```no_run
use oauth1_rest_client::{OAuthClientProvider, Secrets};

# fn run() -> oauth1_rest_client::Result<()> {
let client = reqwest::Client::new()
    .oauth1(Secrets::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]"))?;
# Ok(())
# }
```
*/
mod client;
mod config;
mod error;
mod logger;
mod request;
mod response_info;
mod retry;
mod secrets;
mod signer;
mod token_reader;
pub mod transport;

// exposed to external program
pub use client::{Client, OAuthClientProvider, Payload};
pub use config::{ClientConfig, Endpoints};
pub use error::{
    ConfigurationError, Error, ProtocolError, ProtocolResult, Result, TransportError,
    TransportResult,
};
pub use logger::{DebugInfo, DebugLogger, TracingLogger};
pub use request::{RequestBuilder, SignedRequest};
pub use response_info::ResponseInfo;
pub use retry::{RetryDecision, RetryPolicy};
pub use secrets::{Secrets, SecretsProvider};
pub use signer::{
    percent_encode, signature_base_string, signing_key, OAuthParameters, SignedContent, Signer,
};
pub use token_reader::{read_oauth_token, AccessToken, AsOAuthToken, RequestToken, TokenResponse};
pub use transport::{RawResponse, ReqwestTransport, Transport};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";

// crate-private constant variables
pub(crate) const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub(crate) const OAUTH_TOKEN_KEY: &str = "oauth_token";
