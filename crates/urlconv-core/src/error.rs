//! Error types for URL parsing and record conversion.

use std::fmt;

/// Why a piece of text was rejected as a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlErrorKind {
    /// ASCII control byte (below 0x20 or DEL) anywhere in the input.
    ControlCharacter,
    /// Input starts with `:`.
    MissingScheme,
    /// Scheme-less relative reference whose first segment contains `:`.
    ColonInFirstSegment,
    /// Userinfo contains a character outside the allowed set.
    InvalidUserinfo,
    /// Bracketed IPv6 host without a closing `]`.
    MissingBracket,
    /// Text after the host's last `:` is not all digits.
    InvalidPort(String),
    /// Bare ASCII character in the host that requires escaping.
    InvalidHostCharacter(String),
    /// `%` not followed by two hex digits, or an escape not allowed here.
    InvalidEscape(String),
    /// Input line bytes are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for UrlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlErrorKind::ControlCharacter => write!(f, "invalid control character in URL"),
            UrlErrorKind::MissingScheme => write!(f, "missing protocol scheme"),
            UrlErrorKind::ColonInFirstSegment => {
                write!(f, "first path segment in URL cannot contain colon")
            }
            UrlErrorKind::InvalidUserinfo => write!(f, "invalid userinfo"),
            UrlErrorKind::MissingBracket => write!(f, "missing ']' in host"),
            UrlErrorKind::InvalidPort(port) => write!(f, "invalid port {:?} after host", port),
            UrlErrorKind::InvalidHostCharacter(c) => {
                write!(f, "invalid character {:?} in host name", c)
            }
            UrlErrorKind::InvalidEscape(s) => write!(f, "invalid URL escape {:?}", s),
            UrlErrorKind::InvalidUtf8 => write!(f, "input is not valid UTF-8"),
        }
    }
}

/// Error returned by the conversion layer.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Text does not conform to the generic URL grammar.
    #[error("{op} {input:?}: {reason}")]
    MalformedUrl {
        op: &'static str,
        input: String,
        reason: UrlErrorKind,
    },

    /// Input is not a well-formed JSON record, or a field has the wrong type.
    #[error("bad json url: {0}")]
    MalformedRecord(#[source] serde_json::Error),

    /// A forward-mode input line exceeded the configured limit.
    #[error("input line too long (limit {limit} bytes)")]
    LineTooLong { limit: usize },

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub(crate) fn malformed_url(op: &'static str, input: &str, reason: UrlErrorKind) -> Self {
        ConvertError::MalformedUrl {
            op,
            input: input.to_string(),
            reason,
        }
    }

    /// True for errors caused by the content of an input unit rather than I/O.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ConvertError::MalformedUrl { .. }
                | ConvertError::MalformedRecord(_)
                | ConvertError::LineTooLong { .. }
        )
    }
}
