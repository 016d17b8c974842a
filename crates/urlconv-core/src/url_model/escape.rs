//! Percent-escaping rules per URL component.
//!
//! Each [`Encoding`] has an `AsciiSet` listing the ASCII bytes that must be
//! escaped in that component; non-ASCII bytes are always escaped.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::UrlErrorKind;

/// URL component whose escaping rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Path,
    Host,
    /// IPv6 zone identifier inside a bracketed host (after `%25`).
    Zone,
    UserPassword,
    QueryComponent,
    Fragment,
}

/// Everything except alphanumerics and the unreserved marks.
const UNRESERVED_KEPT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path keeps every reserved character except `?`.
const PATH_SET: &AsciiSet = &UNRESERVED_KEPT
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

const USERINFO_SET: &AsciiSet = &UNRESERVED_KEPT
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Query components escape every reserved character. Space is handled
/// separately (it becomes `+`), so it is left out of the set.
const QUERY_SET: &AsciiSet = &UNRESERVED_KEPT.remove(b' ');

const FRAGMENT_SET: &AsciiSet = &PATH_SET
    .remove(b'?')
    .remove(b'!')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// Hosts keep sub-delims plus `:` for the port, brackets for IPv6 literals,
/// and `<`, `>`, `"` since hosts cannot carry escaped ASCII.
const HOST_SET: &AsciiSet = &UNRESERVED_KEPT
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'[')
    .remove(b']')
    .remove(b'<')
    .remove(b'>')
    .remove(b'"');

impl Encoding {
    fn ascii_set(self) -> &'static AsciiSet {
        match self {
            Encoding::Path => PATH_SET,
            Encoding::Host | Encoding::Zone => HOST_SET,
            Encoding::UserPassword => USERINFO_SET,
            Encoding::QueryComponent => QUERY_SET,
            Encoding::Fragment => FRAGMENT_SET,
        }
    }
}

/// Whether byte `c` must be escaped when it appears in a component of `mode`.
///
/// Mirrors the `AsciiSet` tables; kept as a match so validation can ask
/// about single bytes.
pub(crate) fn should_escape(c: u8, mode: Encoding) -> bool {
    if c.is_ascii_alphanumeric() {
        return false;
    }

    if matches!(mode, Encoding::Host | Encoding::Zone)
        && matches!(
            c,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'['
                | b']'
                | b'<'
                | b'>'
                | b'"'
        )
    {
        return false;
    }

    match c {
        b'-' | b'_' | b'.' | b'~' => return false,
        b'$' | b'&' | b'+' | b',' | b'/' | b':' | b';' | b'=' | b'?' | b'@' => match mode {
            Encoding::Path => return c == b'?',
            Encoding::UserPassword => {
                return c == b'@' || c == b'/' || c == b'?' || c == b':';
            }
            Encoding::QueryComponent => return true,
            Encoding::Fragment => return false,
            Encoding::Host | Encoding::Zone => {}
        },
        _ => {}
    }

    if mode == Encoding::Fragment && matches!(c, b'!' | b'(' | b')' | b'*') {
        return false;
    }

    true
}

/// Escapes `s` for use in a component of `mode`.
pub fn escape(s: &str, mode: Encoding) -> String {
    let escaped = utf8_percent_encode(s, mode.ascii_set()).to_string();
    if mode == Encoding::QueryComponent {
        escaped.replace(' ', "+")
    } else {
        escaped
    }
}

/// Decodes `%XX` escapes in `s`, validating them against `mode`.
///
/// In query components `+` decodes to a space. Hosts only accept `%25` and
/// escapes of non-ASCII bytes, and reject bare ASCII that would need escaping.
/// Octets that are not UTF-8 decode to U+FFFD; callers keep the escaped text
/// when the exact bytes matter.
pub fn unescape(s: &str, mode: Encoding) -> Result<String, UrlErrorKind> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() || !is_hex(bytes[i + 1]) || !is_hex(bytes[i + 2]) {
                    let end = (i + 3).min(bytes.len());
                    return Err(UrlErrorKind::InvalidEscape(
                        String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                    ));
                }
                let triple = &bytes[i..i + 3];
                let high = unhex(bytes[i + 1]);
                let value = high << 4 | unhex(bytes[i + 2]);
                let is_pct25 = triple == b"%25";
                let rejected = match mode {
                    Encoding::Host => high < 8 && !is_pct25,
                    Encoding::Zone => {
                        !is_pct25 && value != b' ' && should_escape(value, Encoding::Host)
                    }
                    _ => false,
                };
                if rejected {
                    return Err(UrlErrorKind::InvalidEscape(
                        String::from_utf8_lossy(triple).into_owned(),
                    ));
                }
                i += 3;
            }
            c => {
                if matches!(mode, Encoding::Host | Encoding::Zone)
                    && c < 0x80
                    && should_escape(c, mode)
                {
                    return Err(UrlErrorKind::InvalidHostCharacter((c as char).to_string()));
                }
                i += 1;
            }
        }
    }

    let spaced;
    let src = if mode == Encoding::QueryComponent && s.contains('+') {
        spaced = s.replace('+', " ");
        spaced.as_str()
    } else {
        s
    };
    Ok(percent_decode_str(src).decode_utf8_lossy().into_owned())
}

/// Whether `s` is an acceptable escaped form for `mode`: every byte that
/// would need escaping is either a `%` escape or a tolerated sub-delim.
pub fn valid_encoded(s: &str, mode: Encoding) -> bool {
    s.bytes().all(|c| match c {
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' | b':'
        | b'@' => true,
        b'[' | b']' => true,
        b'%' => true,
        _ => !should_escape(c, mode),
    })
}

fn is_hex(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

fn unhex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}
