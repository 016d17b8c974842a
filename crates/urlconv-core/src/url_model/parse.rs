//! Text -> UrlRecord.

use super::escape::{escape, unescape, Encoding};
use super::query::{parse_query, QueryOptions};
use crate::error::{ConvertError, UrlErrorKind};
use crate::record::{UrlRecord, Userinfo};

/// Parses `input` into its field decomposition.
///
/// The fragment is split off at the first `#`; the rest follows the generic
/// `scheme:[//authority]path[?query]` grammar. On error no partial record is
/// returned.
pub fn parse_with(input: &str, opts: &QueryOptions) -> Result<UrlRecord, ConvertError> {
    let fail = |reason| ConvertError::malformed_url("parse", input, reason);

    if input.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(fail(UrlErrorKind::ControlCharacter));
    }

    let (reference, fragment) = match input.split_once('#') {
        Some((reference, fragment)) => (reference, fragment),
        None => (input, ""),
    };

    let mut rec = parse_reference(reference, opts).map_err(fail)?;
    if !fragment.is_empty() {
        set_fragment(&mut rec, fragment).map_err(fail)?;
    }
    Ok(rec)
}

fn parse_reference(raw: &str, opts: &QueryOptions) -> Result<UrlRecord, UrlErrorKind> {
    let mut rec = UrlRecord::default();

    if raw == "*" {
        rec.path = "*".to_string();
        return Ok(rec);
    }

    let (scheme, rest) = split_scheme(raw)?;
    rec.scheme = scheme.to_ascii_lowercase();

    let rest = if rest.ends_with('?') && rest.matches('?').count() == 1 {
        rec.force_query = true;
        &rest[..rest.len() - 1]
    } else if let Some((before, query)) = rest.split_once('?') {
        rec.query = parse_query(query, opts)?;
        before
    } else {
        rest
    };

    if !rest.starts_with('/') {
        if !rec.scheme.is_empty() {
            // Rootless text after a scheme is opaque (mailto:, urn:, ...).
            rec.opaque = rest.to_string();
            return Ok(rec);
        }
        let first_segment = rest.split_once('/').map_or(rest, |(seg, _)| seg);
        if first_segment.contains(':') {
            return Err(UrlErrorKind::ColonInFirstSegment);
        }
    }

    let mut path = rest;
    if (!rec.scheme.is_empty() || !rest.starts_with("///")) && rest.starts_with("//") {
        let after = &rest[2..];
        let (authority, tail) = match after.find('/') {
            Some(i) => (&after[..i], &after[i..]),
            None => (after, ""),
        };
        let (user, host) = parse_authority(authority)?;
        rec.user = user;
        rec.host = host;
        path = tail;
    }

    set_path(&mut rec, path)?;
    Ok(rec)
}

/// Splits a leading `[A-Za-z][A-Za-z0-9+.-]*:` scheme from `raw`.
fn split_scheme(raw: &str) -> Result<(&str, &str), UrlErrorKind> {
    for (i, c) in raw.bytes().enumerate() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                if i == 0 {
                    return Ok(("", raw));
                }
            }
            b':' => {
                if i == 0 {
                    return Err(UrlErrorKind::MissingScheme);
                }
                return Ok((&raw[..i], &raw[i + 1..]));
            }
            _ => return Ok(("", raw)),
        }
    }
    Ok(("", raw))
}

fn parse_authority(authority: &str) -> Result<(Option<Userinfo>, String), UrlErrorKind> {
    let (userinfo, host) = match authority.rfind('@') {
        Some(i) => (Some(&authority[..i]), &authority[i + 1..]),
        None => (None, authority),
    };
    let host = parse_host(host)?;

    let Some(userinfo) = userinfo else {
        return Ok((None, host));
    };
    if !valid_userinfo(userinfo) {
        return Err(UrlErrorKind::InvalidUserinfo);
    }
    let user = match userinfo.split_once(':') {
        Some((name, password)) => Userinfo::with_password(
            unescape(name, Encoding::UserPassword)?,
            unescape(password, Encoding::UserPassword)?,
        ),
        None => Userinfo::new(unescape(userinfo, Encoding::UserPassword)?),
    };
    Ok((Some(user), host))
}

fn parse_host(host: &str) -> Result<String, UrlErrorKind> {
    if host.starts_with('[') {
        let close = host.rfind(']').ok_or(UrlErrorKind::MissingBracket)?;
        let colon_port = &host[close + 1..];
        if !valid_optional_port(colon_port) {
            return Err(UrlErrorKind::InvalidPort(colon_port.to_string()));
        }
        // IPv6 zone: [fe80::1%25en0]. The zone has its own escaping rules.
        if let Some(zone) = host[..close].find("%25") {
            let mut decoded = unescape(&host[..zone], Encoding::Host)?;
            decoded.push_str(&unescape(&host[zone..close], Encoding::Zone)?);
            decoded.push_str(&unescape(&host[close..], Encoding::Host)?);
            return Ok(decoded);
        }
    } else if let Some(i) = host.rfind(':') {
        let colon_port = &host[i..];
        if !valid_optional_port(colon_port) {
            return Err(UrlErrorKind::InvalidPort(colon_port.to_string()));
        }
    }
    unescape(host, Encoding::Host)
}

/// Empty, or `:` followed by digits only.
fn valid_optional_port(port: &str) -> bool {
    match port.strip_prefix(':') {
        Some(digits) => digits.bytes().all(|b| b.is_ascii_digit()),
        None => port.is_empty(),
    }
}

fn valid_userinfo(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '-' | '.'
                    | '_'
                    | ':'
                    | '~'
                    | '!'
                    | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | ';'
                    | '='
                    | '%'
                    | '@'
            )
    })
}

fn set_path(rec: &mut UrlRecord, escaped: &str) -> Result<(), UrlErrorKind> {
    let path = unescape(escaped, Encoding::Path)?;
    rec.raw_path = if escape(&path, Encoding::Path) == escaped {
        String::new()
    } else {
        escaped.to_string()
    };
    rec.path = path;
    Ok(())
}

fn set_fragment(rec: &mut UrlRecord, escaped: &str) -> Result<(), UrlErrorKind> {
    let fragment = unescape(escaped, Encoding::Fragment)?;
    rec.raw_fragment = if escape(&fragment, Encoding::Fragment) == escaped {
        String::new()
    } else {
        escaped.to_string()
    };
    rec.fragment = fragment;
    Ok(())
}
