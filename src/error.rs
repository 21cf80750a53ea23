use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type TransportResult<T> = std::result::Result<T, TransportError>;
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} failed : {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("token acquisition from {url} failed : {source}")]
    Protocol {
        url: String,
        #[source]
        source: ProtocolError,
    },
    #[error("invalid configuration : {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("request parameters could not be encoded : {0}")]
    Parameters(#[from] serde_urlencoded::ser::Error),
    #[error("response from {url} is not valid JSON : {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn transport(url: impl Into<String>, source: TransportError) -> Self {
        Error::Transport {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn protocol(url: impl Into<String>, source: ProtocolError) -> Self {
        Error::Protocol {
            url: url.into(),
            source,
        }
    }

    /// Returns the URL the failing call was addressed to, if the error is tied to one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Transport { url, .. }
            | Error::Protocol { url, .. }
            | Error::Decode { url, .. } => Some(url),
            Error::Configuration(_) | Error::Parameters(_) => None,
        }
    }
}

/// Failures of a single network round trip. These are the only errors the retry loop absorbs.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("network failure : {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with unsuccessful status {status} : {body}")]
    Unsuccessful { status: u16, body: String },
    #[error("request failed")]
    RequestFailed,
}

impl TransportError {
    /// HTTP status of an unsuccessful response, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            TransportError::Unsuccessful { status, .. } => Some(*status),
            TransportError::RequestFailed => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
    #[error("response body is not valid UTF-8")]
    NonUtf8Body,
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("consumer key must not be empty")]
    MissingConsumerKey,
    #[error("consumer secret must not be empty")]
    MissingConsumerSecret,
    #[error("invalid url {0} : {1}")]
    InvalidUrl(String, #[source] url::ParseError),
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    #[error("HTTP client could not be constructed : {0}")]
    HttpClientBuild(#[source] reqwest::Error),
}
