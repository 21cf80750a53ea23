//! Rate-limit and status metadata carried in response headers.
//!
//! `Retry-After` wins over the `X-Rate-Limit-*` trio: when the server asks the client to back
//! off, the remaining budget is reported as zero and the reset moment is derived from the
//! retry hint, whatever the other headers say.

use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::transport::RawResponse;

const STATUS: &str = "status";
const RETRY_AFTER: &str = "retry-after";
const RATE_LIMIT_LIMIT: &str = "x-rate-limit-limit";
const RATE_LIMIT_REMAINING: &str = "x-rate-limit-remaining";
const RATE_LIMIT_RESET: &str = "x-rate-limit-reset";
const ACCESS_LEVEL: &str = "x-access-level";

/// Read-only view over the headers of the last response.
///
/// Every field is optional; a default value means "no meaningful data", which is what
/// callers see before the first request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseInfo {
    /// Status line of the HTTP response itself.
    pub http_status: Option<u16>,
    /// URL the response answered.
    pub url: Option<String>,
    /// Code from the `Status` header.
    pub status_code: Option<u16>,
    /// Reason phrase from the `Status` header.
    pub status_message: Option<String>,
    pub rate_limit_limit: Option<u64>,
    pub rate_limit_remaining: Option<u64>,
    /// Unix time at which the rate limit window resets.
    pub rate_limit_reset: Option<i64>,
    /// Permission level of the access token, e.g. `read-write`.
    pub access_level: Option<String>,
}

impl ResponseInfo {
    /// Extracts metadata from header pairs; names are compared case-insensitively and the
    /// first occurrence of a header wins.
    pub fn from_headers<I, K, V>(headers: I, now: OffsetDateTime) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_ascii_lowercase(), v.as_ref().trim().to_string()))
            .collect::<Vec<(String, String)>>();
        let find = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        let mut info = ResponseInfo::default();

        if let Some(status) = find(STATUS) {
            let (code, message) = status.split_once(' ').unwrap_or((status, ""));
            info.status_code = code.parse().ok();
            info.status_message = Some(message.trim().to_string());
        }

        if let Some(retry_after) = find(RETRY_AFTER) {
            info.rate_limit_remaining = Some(0);
            info.rate_limit_reset = Some(retry_after_reset(retry_after, now));
        } else {
            info.rate_limit_limit = find(RATE_LIMIT_LIMIT).and_then(|v| v.parse().ok());
            info.rate_limit_remaining = find(RATE_LIMIT_REMAINING).and_then(|v| v.parse().ok());
            info.rate_limit_reset = find(RATE_LIMIT_RESET).and_then(|v| v.parse().ok());
        }

        info.access_level = find(ACCESS_LEVEL).map(str::to_string);

        info
    }

    /// Extracts metadata from a raw header block made of `Name: value` lines.
    ///
    /// Lines without a colon (such as an `HTTP/1.1 200 OK` status line) are skipped.
    pub fn from_header_block(block: &str, now: OffsetDateTime) -> Self {
        Self::from_headers(
            block
                .lines()
                .filter_map(|line| line.split_once(':')),
            now,
        )
    }

    /// Metadata of a transport response, including its HTTP status.
    pub fn from_response(response: &RawResponse, now: OffsetDateTime) -> Self {
        let mut info = Self::from_headers(
            response
                .headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
            now,
        );
        info.http_status = Some(response.status);
        info.url = Some(response.url.clone());
        info
    }

    /// Whether the server reported an exhausted budget.
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit_remaining == Some(0)
    }

    pub fn reset_at(&self) -> Option<OffsetDateTime> {
        self.rate_limit_reset
            .and_then(|epoch| OffsetDateTime::from_unix_timestamp(epoch).ok())
    }
}

fn retry_after_reset(raw: &str, now: OffsetDateTime) -> i64 {
    if let Ok(secs) = raw.parse::<i64>() {
        return now.unix_timestamp().saturating_add(secs);
    }
    if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
        return moment.unix_timestamp();
    }

    now.unix_timestamp()
}
