use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distr::Alphanumeric, Rng};
use sha1::Sha1;
use time::OffsetDateTime;
use url::Url;

use crate::{
    SecretsProvider, OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY,
    OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY,
    OAUTH_VERIFIER_KEY, OAUTH_VERSION_KEY, REALM_KEY,
};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LENGTH: usize = 32;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Signs requests with HMAC-SHA1 on behalf of a [`SecretsProvider`].
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters,
}

/// Everything produced while signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedContent {
    /// Value for the `Authorization` header.
    pub authorization: String,
    /// The base64 HMAC-SHA1 signature, not percent-encoded.
    pub signature: String,
    pub base_string: String,
    pub nonce: String,
    pub timestamp: u64,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters) -> Self {
        Signer {
            secrets,
            parameters,
        }
    }

    /// Signs `method url` carrying `payload` (form body or query parameters).
    ///
    /// Parameters already present in the query string of `url` are signed as well, and the
    /// base string uses `url` stripped of its query and fragment. Unless pinned through
    /// [`OAuthParameters`], every call draws a fresh nonce and timestamp.
    pub fn generate_signature(
        &self,
        method: &Method,
        url: &Url,
        payload: &[(String, String)],
    ) -> SignedContent {
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (token, token_secret) = self.secrets.get_token_option_pair();
        let nonce = self
            .parameters
            .nonce
            .clone()
            .unwrap_or_else(generate_nonce);
        let timestamp = self.parameters.timestamp.unwrap_or_else(current_timestamp);

        // Step 1. protocol parameters
        let protocol = self
            .parameters
            .protocol_parameters(consumer_key, token, &nonce, timestamp);

        // Step 2. encode everything and sort by encoded key, then encoded value
        let mut encoded = url
            .query_pairs()
            .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
            .chain(
                payload
                    .iter()
                    .map(|(k, v)| (percent_encode(k), percent_encode(v))),
            )
            .chain(
                protocol
                    .iter()
                    .map(|(k, v)| (percent_encode(k), percent_encode(v))),
            )
            .collect::<Vec<(String, String)>>();
        encoded.sort();

        // Step 3. sign
        let base_string = signature_base_string(method, &base_url(url), &encoded);
        let key = signing_key(consumer_secret, token_secret);
        let signature = hmac_sha1(&key, &base_string);

        // Step 4. Authorization header
        let authorization =
            authorization_header(self.parameters.realm.as_deref(), protocol, &signature);

        SignedContent {
            authorization,
            signature,
            base_string,
            nonce,
            timestamp,
        }
    }
}

/// Per-request protocol options. Nonce and timestamp are normally left unset so each
/// signature gets fresh values; tests pin them to reproduce known vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParameters {
    callback: Option<String>,
    nonce: Option<String>,
    realm: Option<String>,
    timestamp: Option<u64>,
    verifier: Option<String>,
    version: bool,
}

impl Default for OAuthParameters {
    fn default() -> Self {
        OAuthParameters {
            callback: None,
            nonce: None,
            realm: None,
            timestamp: None,
            verifier: None,
            version: true,
        }
    }
}

impl OAuthParameters {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_callback value
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<String>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<String>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the realm value
    pub fn realm<T>(self, realm: T) -> Self
    where
        T: Into<String>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// set the oauth_verifier value
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<String>,
    {
        OAuthParameters {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    /// set the oauth_version value (boolean)
    ///
    /// # Note
    /// `oauth_version=1.0` is sent by default. Passing `false` omits it, which some
    /// providers and the RFC 5849 examples expect.
    pub fn version<T>(self, version: T) -> Self
    where
        T: Into<bool>,
    {
        OAuthParameters {
            version: version.into(),
            ..self
        }
    }

    fn protocol_parameters(
        &self,
        consumer_key: &str,
        token: Option<&str>,
        nonce: &str,
        timestamp: u64,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (OAUTH_CONSUMER_KEY, consumer_key.to_string()),
            (OAUTH_NONCE_KEY, nonce.to_string()),
            (OAUTH_SIGNATURE_METHOD_KEY, SIGNATURE_METHOD.to_string()),
            (OAUTH_TIMESTAMP_KEY, timestamp.to_string()),
        ];
        if let Some(ref callback) = self.callback {
            params.push((OAUTH_CALLBACK_KEY, callback.clone()));
        }
        if let Some(token) = token {
            params.push((OAUTH_TOKEN_KEY, token.to_string()));
        }
        if let Some(ref verifier) = self.verifier {
            params.push((OAUTH_VERIFIER_KEY, verifier.clone()));
        }
        if self.version {
            params.push((OAUTH_VERSION_KEY, OAUTH_VERSION.to_string()));
        }
        params
    }
}

/// Percent-encodes `input` as RFC 5849 requires: everything but unreserved characters.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Builds `METHOD&enc(base_url)&enc(k=v&k=v...)` from already encoded and sorted pairs.
pub fn signature_base_string(
    method: &Method,
    base_url: &str,
    encoded_params: &[(String, String)],
) -> String {
    let params = encoded_params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        percent_encode(base_url),
        percent_encode(&params)
    )
}

pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or(""))
    )
}

fn hmac_sha1(key: &str, base_string: &str) -> String {
    // NOTE: HMAC takes keys of any length, so this never fails.
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

fn authorization_header(
    realm: Option<&str>,
    mut protocol: Vec<(&'static str, String)>,
    signature: &str,
) -> String {
    protocol.push((OAUTH_SIGNATURE_KEY, signature.to_string()));
    protocol.sort();

    let mut fields = Vec::with_capacity(protocol.len() + 1);
    if let Some(realm) = realm {
        fields.push(format!("{}=\"{}\"", REALM_KEY, percent_encode(realm)));
    }
    fields.extend(
        protocol
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v))),
    );
    format!("OAuth {}", fields.join(","))
}

fn base_url(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.to_string()
}

fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

fn current_timestamp() -> u64 {
    u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or_default()
}
