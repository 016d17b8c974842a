//! Conversion drivers: one input unit in, one output line out.
//!
//! Forward mode turns URLs into compact JSON records; reverse mode turns JSON
//! records back into URLs. Processing stops at the first failing unit; every
//! line produced before it has already been written and the writer is flushed
//! on both the success and the error path.

use std::io::{BufRead, Read, Write};

use crate::config::UrlconvConfig;
use crate::error::{ConvertError, UrlErrorKind};
use crate::record::UrlRecord;
use crate::url_model::{self, QueryOptions};

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// URL text -> JSON record.
    #[default]
    Forward,
    /// JSON record -> URL text.
    Reverse,
}

/// Converter configured from [`UrlconvConfig`].
#[derive(Debug, Clone)]
pub struct Converter {
    opts: QueryOptions,
    max_line_bytes: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(&UrlconvConfig::default())
    }
}

impl Converter {
    pub fn new(cfg: &UrlconvConfig) -> Self {
        Self {
            opts: cfg.query_options(),
            max_line_bytes: cfg.max_line_bytes,
        }
    }

    /// Parses one URL and encodes the record as a single-line JSON object.
    pub fn url_to_json(&self, text: &str) -> Result<String, ConvertError> {
        let rec = url_model::parse_with(text, &self.opts)?;
        serde_json::to_string(&rec).map_err(record_error)
    }

    /// Decodes exactly one JSON record and serializes it as a URL.
    pub fn json_to_url(&self, json: &str) -> Result<String, ConvertError> {
        let rec: UrlRecord = serde_json::from_str(json).map_err(record_error)?;
        Ok(url_model::serialize_with(&rec, &self.opts))
    }

    /// Converts each argument as one input unit.
    pub fn convert_args<'a, I, W>(
        &self,
        direction: Direction,
        inputs: I,
        mut writer: W,
    ) -> Result<usize, ConvertError>
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
    {
        let result = self.write_args(direction, inputs, &mut writer);
        finish(result, &mut writer)
    }

    /// Converts a whole input stream: newline-delimited URLs in forward mode,
    /// a sequence of whitespace-separated JSON objects in reverse mode.
    pub fn convert_stream<R, W>(
        &self,
        direction: Direction,
        reader: R,
        writer: W,
    ) -> Result<usize, ConvertError>
    where
        R: BufRead,
        W: Write,
    {
        match direction {
            Direction::Forward => self.urls_to_records(reader, writer),
            Direction::Reverse => self.records_to_urls(reader, writer),
        }
    }

    /// Reads one URL per line (`\n` or `\r\n` terminated) and writes one JSON
    /// record per line.
    pub fn urls_to_records<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<usize, ConvertError> {
        let result = self.write_records(&mut reader, &mut writer);
        finish(result, &mut writer)
    }

    /// Reads a stream of JSON records until end of input and writes one URL
    /// per line.
    pub fn records_to_urls<R: Read, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> Result<usize, ConvertError> {
        let result = self.write_urls(reader, &mut writer);
        finish(result, &mut writer)
    }

    fn write_args<'a, I, W>(
        &self,
        direction: Direction,
        inputs: I,
        writer: &mut W,
    ) -> Result<usize, ConvertError>
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
    {
        let mut count = 0;
        for input in inputs {
            let line = match direction {
                Direction::Forward => self.url_to_json(input)?,
                Direction::Reverse => self.json_to_url(input)?,
            };
            writeln!(writer, "{}", line)?;
            count += 1;
        }
        Ok(count)
    }

    fn write_records<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<usize, ConvertError> {
        let mut count = 0;
        let mut buf = Vec::new();
        while let Some(line) = self.next_line(reader, &mut buf)? {
            let json = self.url_to_json(line)?;
            writeln!(writer, "{}", json)?;
            count += 1;
            tracing::trace!(line = count, "converted url");
        }
        Ok(count)
    }

    fn write_urls<R: Read, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<usize, ConvertError> {
        let mut count = 0;
        let records = serde_json::Deserializer::from_reader(reader).into_iter::<UrlRecord>();
        for rec in records {
            let rec = rec.map_err(record_error)?;
            writeln!(writer, "{}", url_model::serialize_with(&rec, &self.opts))?;
            count += 1;
            tracing::trace!(record = count, "converted record");
        }
        Ok(count)
    }

    /// Reads the next line into `buf`, stripping the terminator. Lines longer
    /// than `max_line_bytes` are rejected without reading them fully.
    fn next_line<'b, R: BufRead>(
        &self,
        reader: &mut R,
        buf: &'b mut Vec<u8>,
    ) -> Result<Option<&'b str>, ConvertError> {
        buf.clear();
        let limit = self.max_line_bytes;
        let n = reader
            .by_ref()
            .take(limit as u64 + 1)
            .read_until(b'\n', buf)?;
        if n == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if n > limit {
            return Err(ConvertError::LineTooLong { limit });
        }

        let buf: &'b [u8] = buf;
        match std::str::from_utf8(buf) {
            Ok(line) => Ok(Some(line)),
            Err(_) => Err(ConvertError::malformed_url(
                "parse",
                &String::from_utf8_lossy(buf),
                UrlErrorKind::InvalidUtf8,
            )),
        }
    }
}

/// Flushes `writer` regardless of outcome; the conversion error wins over a
/// flush error.
fn finish<W: Write>(
    result: Result<usize, ConvertError>,
    writer: &mut W,
) -> Result<usize, ConvertError> {
    let flushed = writer.flush();
    let count = result?;
    flushed?;
    tracing::debug!(count, "conversion finished");
    Ok(count)
}

/// I/O failures surfaced through serde_json stay I/O errors; everything else
/// is a malformed record.
fn record_error(e: serde_json::Error) -> ConvertError {
    if e.is_io() {
        ConvertError::Io(e.into())
    } else {
        ConvertError::MalformedRecord(e)
    }
}
