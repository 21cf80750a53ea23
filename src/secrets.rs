use std::fmt;

use crate::ConfigurationError;

/// Read access to the credentials a request is signed with.
pub trait SecretsProvider {
    fn get_consumer_key_pair(&self) -> (&str, &str);

    fn get_token_pair_option(&self) -> Option<(&str, &str)>;

    fn get_token_option_pair(&self) -> (Option<&str>, Option<&str>) {
        self.get_token_pair_option()
            .map(|s| (Some(s.0), Some(s.1)))
            .unwrap_or((None, None))
    }
}

/// Consumer credentials plus the token pair currently installed by the handshake.
///
/// The consumer key and secret never change once constructed. The token pair is replaced
/// wholesale with [`Secrets::set_token`] or removed with [`Secrets::clear_token`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    consumer_key: String,
    consumer_secret: String,
    token: Option<TokenPair>,
}

#[derive(Clone, PartialEq, Eq)]
struct TokenPair {
    token: String,
    token_secret: String,
}

impl Secrets {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
        }
    }

    /// Builder form of [`Secrets::set_token`].
    pub fn token<TKey, TSecret>(mut self, token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        self.set_token(token, token_secret);
        self
    }

    pub fn set_token<TKey, TSecret>(&mut self, token: TKey, token_secret: TSecret)
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        self.token = Some(TokenPair {
            token: token.into(),
            token_secret: token_secret.into(),
        });
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Copy of these credentials without the token pair, as used for the request-token step.
    pub fn consumer_only(&self) -> Self {
        Secrets {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            token: None,
        }
    }

    /// Checks that the consumer credentials are usable at all.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.consumer_key.is_empty() {
            return Err(ConfigurationError::MissingConsumerKey);
        }
        if self.consumer_secret.is_empty() {
            return Err(ConfigurationError::MissingConsumerSecret);
        }
        Ok(())
    }
}

impl SecretsProvider for Secrets {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option(&self) -> Option<(&str, &str)> {
        self.token
            .as_ref()
            .map(|pair| (pair.token.as_str(), pair.token_secret.as_str()))
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field(
                "token",
                &self.token.as_ref().map(|pair| pair.token.as_str()),
            )
            .field(
                "token_secret",
                &self.token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
