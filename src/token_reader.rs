use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, ProtocolResult, OAUTH_TOKEN_KEY};

const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";

/// Represents response of token acquisition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Provider specific fields such as `user_id`, `screen_name` or
    /// `oauth_callback_confirmed`.
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

/// Temporary credentials returned by the request-token step.
pub type RequestToken = TokenResponse;
/// Token credentials returned by the access-token step.
pub type AccessToken = TokenResponse;

impl TokenResponse {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// `oauth_callback_confirmed=true` as sent by the request-token endpoint.
    pub fn callback_confirmed(&self) -> bool {
        self.get("oauth_callback_confirmed") == Some("true")
    }
}

/// Anything an authorize URL can be built from: the raw token string or a parsed token.
pub trait AsOAuthToken {
    fn as_oauth_token(&self) -> &str;
}

impl AsOAuthToken for str {
    fn as_oauth_token(&self) -> &str {
        self
    }
}

impl AsOAuthToken for String {
    fn as_oauth_token(&self) -> &str {
        self
    }
}

impl AsOAuthToken for TokenResponse {
    fn as_oauth_token(&self) -> &str {
        &self.oauth_token
    }
}

impl<T: AsOAuthToken + ?Sized> AsOAuthToken for &T {
    fn as_oauth_token(&self) -> &str {
        (**self).as_oauth_token()
    }
}

/// Parses a URL-encoded handshake body.
pub fn read_oauth_token(body: &[u8]) -> ProtocolResult<TokenResponse> {
    let text = std::str::from_utf8(body).map_err(|_| ProtocolError::NonUtf8Body)?;
    let mut destructured = url::form_urlencoded::parse(text.trim().as_bytes())
        .into_owned()
        .collect::<HashMap<String, String>>();
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            extra: destructured,
        }),
        (None, _) => Err(ProtocolError::TokenKeyNotFound(
            OAUTH_TOKEN_KEY,
            text.to_string(),
        )),
        (_, _) => Err(ProtocolError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text.to_string(),
        )),
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn parse_response_typical() {
        let resp_str_sample = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik&oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM&oauth_callback_confirmed=true";
        for parsed in &[
            read_oauth_token(resp_str_sample.as_bytes()).unwrap(),
            serde_urlencoded::from_str::<TokenResponse>(resp_str_sample).unwrap(),
        ] {
            assert_eq!(
                parsed.oauth_token,
                "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik"
            );
            assert_eq!(
                parsed.oauth_token_secret,
                "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
            );
            assert_eq!(parsed.extra.len(), 1);
            assert!(parsed.callback_confirmed());
        }
    }

    #[test]
    fn parse_access_token_extras() {
        let parsed = read_oauth_token(
            b"oauth_token=AT&oauth_token_secret=ATS&user_id=42&screen_name=bob",
        )
        .unwrap();
        assert_eq!(parsed.oauth_token, "AT");
        assert_eq!(parsed.oauth_token_secret, "ATS");
        assert_eq!(parsed.get("user_id"), Some("42"));
        assert_eq!(parsed.get("screen_name"), Some("bob"));
        assert!(!parsed.callback_confirmed());
    }

    #[test]
    fn parse_decodes_and_trims() {
        let parsed =
            read_oauth_token(b"oauth_token=a%2Fb&oauth_token_secret=c+d&screen_name=%E5%B0%91\n")
                .unwrap();
        assert_eq!(parsed.oauth_token, "a/b");
        assert_eq!(parsed.oauth_token_secret, "c d");
        assert_eq!(parsed.get("screen_name"), Some("少"));
    }

    #[test]
    fn parse_minimal() {
        let parsed = read_oauth_token(b"oauth_token&oauth_token_secret").unwrap();
        assert_eq!(parsed.oauth_token, "");
        assert_eq!(parsed.oauth_token_secret, "");
        assert_eq!(parsed.extra.len(), 0);
    }

    #[test]
    fn parse_token_notfound() {
        let resp_str_sample = "oauth_token_secret=";
        let parsed = read_oauth_token(resp_str_sample.as_bytes());
        assert_eq!(
            parsed,
            Err(ProtocolError::TokenKeyNotFound(
                OAUTH_TOKEN_KEY,
                resp_str_sample.to_string()
            ))
        );
    }

    #[test]
    fn parse_token_secret_notfound() {
        let resp_str_sample = "oauth_token=";
        let parsed = read_oauth_token(resp_str_sample.as_bytes());
        assert_eq!(
            parsed,
            Err(ProtocolError::TokenKeyNotFound(
                OAUTH_TOKEN_SECRET_KEY,
                resp_str_sample.to_string()
            ))
        );
    }

    #[test]
    fn parse_error_page() {
        let parsed = read_oauth_token(b"<html>Sorry, that page does not exist</html>");
        assert!(matches!(
            parsed,
            Err(ProtocolError::TokenKeyNotFound(OAUTH_TOKEN_KEY, _))
        ));
        assert_eq!(
            read_oauth_token(&[0xff, 0xfe]),
            Err(ProtocolError::NonUtf8Body)
        );
    }

    #[test]
    fn as_oauth_token_accepts_both_forms() {
        let token = read_oauth_token(b"oauth_token=abc&oauth_token_secret=s").unwrap();
        assert_eq!(token.as_oauth_token(), "abc");
        assert_eq!("abc".as_oauth_token(), "abc");
        assert_eq!(String::from("abc").as_oauth_token(), "abc");
    }
}
