use http::{
    header::{HeaderName, AUTHORIZATION},
    HeaderMap, HeaderValue, Method,
};
use serde::Serialize;
use url::Url;

use crate::{ConfigurationError, OAuthParameters, SecretsProvider, Signer};

/// Collects the parts of a request that stay fixed across retry attempts.
///
/// Signing happens in [`RequestBuilder::sign`], which borrows the builder so the same
/// inputs can be signed again, with a new nonce and timestamp, for every attempt.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    parameters: Vec<(String, String)>,
    headers: HeaderMap,
}

/// A request carrying its `Authorization` header, ready for the transport.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    /// Target URL. Parameters in [`SignedRequest::parameters`] are not part of it yet.
    pub url: Url,
    pub parameters: Vec<(String, String)>,
    pub headers: HeaderMap,
    /// Signature base string the `Authorization` header was computed from.
    pub base_string: String,
}

impl RequestBuilder {
    pub fn new(method: Method, url: Url) -> Self {
        RequestBuilder {
            method,
            url,
            parameters: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Parses `url` and starts a builder for it.
    pub fn parse(method: Method, url: &str) -> Result<Self, ConfigurationError> {
        Url::parse(url)
            .map(|parsed| RequestBuilder::new(method, parsed))
            .map_err(|e| ConfigurationError::InvalidUrl(url.to_string(), e))
    }

    /// Appends request parameters.
    ///
    /// Anything `serde_urlencoded` can serialize is accepted: a slice of pairs, a map or a
    /// flat struct. The parameters travel in the query string for `GET` and `DELETE` and as a
    /// form body otherwise; they are signed either way. Calling this twice with the same key
    /// sends the key twice.
    ///
    /// # Errors
    /// This method will fail if the object you provide cannot be serialized
    /// into a query string.
    pub fn parameters<T: Serialize + ?Sized>(
        mut self,
        parameters: &T,
    ) -> Result<Self, serde_urlencoded::ser::Error> {
        let encoded = serde_urlencoded::to_string(parameters)?;
        self.parameters
            .extend(url::form_urlencoded::parse(encoded.as_bytes()).into_owned());
        Ok(self)
    }

    /// Add a `Header` to this Request.
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn parameter_pairs(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Generates an OAuth signature and returns the signed request.
    pub fn sign<T>(
        &self,
        secrets: &T,
        oauth: OAuthParameters,
    ) -> Result<SignedRequest, ConfigurationError>
    where
        T: SecretsProvider,
    {
        let signed = Signer::new(secrets, oauth).generate_signature(
            &self.method,
            &self.url,
            &self.parameters,
        );
        let authorization = HeaderValue::from_str(&signed.authorization)
            .map_err(|_| ConfigurationError::InvalidHeader("authorization"))?;

        let mut headers = self.headers.clone();
        headers.insert(AUTHORIZATION, authorization);

        Ok(SignedRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            parameters: self.parameters.clone(),
            headers,
            base_string: signed.base_string,
        })
    }
}

impl SignedRequest {
    /// Whether parameters belong in a form body rather than in the query string.
    pub fn has_form_body(&self) -> bool {
        !matches!(self.method, Method::GET | Method::DELETE | Method::HEAD)
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parameters rendered as `k=v&k=v`, for log lines.
    pub fn encoded_parameters(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.parameters.iter())
            .finish()
    }
}
