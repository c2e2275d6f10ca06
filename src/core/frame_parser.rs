//! IEPG frame parser.
//!
//! Splits a byte stream into a MIME-style header block and a body, then
//! transcodes both from SHIFT-JIS. A header value that fails to decode is
//! kept as-is; a body that fails to decode aborts the parse.

use std::io::{BufRead, BufReader, Read};

use tracing::{debug, debug_span, trace};

use super::header_map::HeaderMap;
use super::record::Record;
use crate::config::ParserConfig;
use crate::error::{FramingError, ParseError, Result};
use crate::utils::encoding;

/// Header field as read from the stream, before transcoding.
struct RawField {
    name: String,
    value: Vec<u8>,
}

/// IEPG parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one IEPG message from `reader`.
    ///
    /// The reader is consumed to its end but never closed; pass `&mut reader`
    /// to keep using it afterwards.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Record> {
        let mut reader = BufReader::new(reader);

        let raw_fields = self.read_header(&mut reader)?;
        debug!(fields = raw_fields.len(), "read IEPG header");

        let mut header = HeaderMap::new();
        for field in raw_fields {
            let _span = debug_span!("header_field", name = %field.name).entered();
            header.append(&field.name, encoding::decode_header_value(&field.value));
        }

        let mut raw_body = Vec::new();
        reader
            .read_to_end(&mut raw_body)
            .map_err(FramingError::from)?;
        let body = encoding::decode_shift_jis_strict(&raw_body)
            .map_err(|offset| ParseError::BodyDecode { offset })?;
        debug!(bytes = raw_body.len(), "decoded IEPG body");

        let record = Record::new(header, body);
        if self.config.strict_times {
            record.validate()?;
        }

        Ok(record)
    }

    /// Read header lines up to and including the blank separator line.
    fn read_header<B: BufRead>(&self, reader: &mut B) -> std::result::Result<Vec<RawField>, FramingError> {
        let limit = self.config.max_header_bytes;
        let mut fields: Vec<RawField> = Vec::new();
        let mut line = Vec::new();
        let mut consumed = 0usize;
        let mut line_no = 0usize;

        loop {
            line.clear();
            // Allow one byte past the limit so an oversized header is detected
            let allowance = ((limit - consumed) as u64).saturating_add(1);
            let n = reader.by_ref().take(allowance).read_until(b'\n', &mut line)?;
            if n == 0 {
                return Err(FramingError::UnexpectedEof);
            }

            consumed = consumed.saturating_add(n);
            if consumed > limit {
                return Err(FramingError::HeaderTooLarge { limit });
            }
            if line.last() != Some(&b'\n') {
                return Err(FramingError::UnexpectedEof);
            }

            line_no += 1;
            let content = trim_line_ending(&line);
            trace!(line = line_no, bytes = content.len(), "header line");

            if content.is_empty() {
                return Ok(fields);
            }

            if is_blank(content[0]) {
                let field = fields
                    .last_mut()
                    .ok_or(FramingError::OrphanContinuation { line: line_no })?;
                let folded = trim_blank(content);
                if !folded.is_empty() {
                    if !field.value.is_empty() {
                        field.value.push(b' ');
                    }
                    field.value.extend_from_slice(folded);
                }
                continue;
            }

            let malformed = || FramingError::MalformedLine {
                line: line_no,
                content: encoding::decode_shift_jis_lossy(content),
            };
            let colon = content.iter().position(|&b| b == b':').ok_or_else(malformed)?;
            let name = &content[..colon];
            if name.is_empty() || name.iter().any(|b| b.is_ascii_whitespace()) {
                return Err(malformed());
            }

            fields.push(RawField {
                name: String::from_utf8_lossy(name).into_owned(),
                value: trim_blank(&content[colon + 1..]).to_vec(),
            });
        }
    }
}

/// Parse one IEPG message with the default configuration.
pub fn parse<R: Read>(reader: R) -> Result<Record> {
    Parser::new().parse(reader)
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn trim_blank(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_blank(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| !is_blank(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}
