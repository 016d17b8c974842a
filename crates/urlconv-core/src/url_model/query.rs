//! Query string <-> ordered multimap.

use super::escape::{escape, unescape, Encoding};
use crate::error::UrlErrorKind;
use crate::record::QueryMap;

/// Options for splitting and re-encoding query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Treat `;` as a pair separator alongside `&`.
    pub semicolon_separator: bool,
    /// Emit names in byte order instead of first-occurrence order.
    pub sort_keys: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            semicolon_separator: true,
            sort_keys: false,
        }
    }
}

/// Splits a raw query (without `?`) into name/value pairs and collects them.
///
/// Empty pairs (`a=1&&b=2`) are skipped; a pair without `=` has an empty value.
pub fn parse_query(raw: &str, opts: &QueryOptions) -> Result<QueryMap, UrlErrorKind> {
    let mut map = QueryMap::new();
    let pairs = raw.split(|c: char| c == '&' || (opts.semicolon_separator && c == ';'));
    for pair in pairs {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = unescape(name, Encoding::QueryComponent)?;
        let value = unescape(value, Encoding::QueryComponent)?;
        map.append(name, value);
    }
    Ok(map)
}

/// Encodes the map as `name=value` pairs joined by `&`.
pub fn encode_query(query: &QueryMap, opts: &QueryOptions) -> String {
    let mut entries: Vec<(&str, &[String])> = query.iter().collect();
    if opts.sort_keys {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    let mut out = String::new();
    for (name, values) in entries {
        let name = escape(name, Encoding::QueryComponent);
        for value in values {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&name);
            out.push('=');
            out.push_str(&escape(value, Encoding::QueryComponent));
        }
    }
    out
}
