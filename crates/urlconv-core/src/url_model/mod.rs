//! URL modeling: text <-> [`UrlRecord`].
//!
//! Parsing follows the generic `scheme:[//[user@]host]path[?query][#fragment]`
//! grammar. Path and fragment are stored decoded, with the original escaped
//! form kept alongside only when re-escaping would not reproduce it (for
//! example a literal `%2F` inside a segment). The raw query string is not
//! kept: serialization always re-derives it from the query map.

mod escape;
mod parse;
mod query;
mod serialize;

pub use escape::{escape, unescape, valid_encoded, Encoding};
pub use parse::parse_with;
pub use query::{encode_query, parse_query, QueryOptions};
pub use serialize::serialize_with;

use crate::error::ConvertError;
use crate::record::UrlRecord;

/// Parses `input` with default query options.
///
/// # Examples
///
/// - `parse("http://h/p?a=1&a=2")` → query `{a: ["1", "2"]}`
/// - `parse("http://[invalid")` → `MalformedUrl` (missing `]`)
pub fn parse(input: &str) -> Result<UrlRecord, ConvertError> {
    parse_with(input, &QueryOptions::default())
}

/// Serializes `rec` with default query options.
pub fn serialize(rec: &UrlRecord) -> String {
    serialize_with(rec, &QueryOptions::default())
}

#[cfg(test)]
mod tests;
