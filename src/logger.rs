//! Sink for the human-readable trace lines written when debugging is enabled.

use std::fmt;

/// Receives one human-readable line per event while `debug_enabled` is set.
///
/// Any `Fn(&str)` closure is a logger, so collecting lines in tests or forwarding them to
/// another logging system needs no extra type.
pub trait DebugLogger: Send + Sync {
    fn log(&self, line: &str);
}

impl<F> DebugLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, line: &str) {
        self(line)
    }
}

/// Default sink: forwards every line to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DebugLogger for TracingLogger {
    fn log(&self, line: &str) {
        tracing::debug!(target: "oauth1_rest_client::debug", "{}", line);
    }
}

/// Wire-level record of the last transport call, kept while debugging is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugInfo {
    /// Signature base string of the request.
    pub base_string: String,
    /// Headers as sent, `Authorization` included.
    pub headers_sent: Vec<(String, String)>,
    /// Raw body received; `None` when no response arrived.
    pub response_body: Option<String>,
}

impl fmt::Debug for dyn DebugLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DebugLogger(..)")
    }
}
