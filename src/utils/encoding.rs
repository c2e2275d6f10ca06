//! Encoding utilities for converting SHIFT-JIS to UTF-8.
//!
//! Header values are decoded leniently (raw bytes kept on failure), the body
//! strictly. Both go through encoding_rs.

use encoding_rs::{DecoderResult, SHIFT_JIS};
use tracing::debug;

/// Decode SHIFT-JIS bytes, failing on the first malformed sequence.
///
/// The error is the byte offset at which the malformed sequence starts.
pub fn decode_shift_jis_strict(data: &[u8]) -> Result<String, usize> {
    let mut decoder = SHIFT_JIS.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(data.len())
        .unwrap_or(data.len() * 3);
    let mut decoded = String::with_capacity(capacity);
    let mut total_read = 0;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&data[total_read..], &mut decoded, true);
        total_read += read;

        match result {
            DecoderResult::InputEmpty => return Ok(decoded),
            DecoderResult::OutputFull => {
                let remaining = data.len() - total_read;
                let more = decoder
                    .max_utf8_buffer_length_without_replacement(remaining)
                    .unwrap_or(remaining * 3);
                decoded.reserve(more.max(4));
            }
            DecoderResult::Malformed(bad_len, consumed_after) => {
                let offset = total_read
                    .saturating_sub(consumed_after as usize)
                    .saturating_sub(bad_len as usize);
                return Err(offset);
            }
        }
    }
}

/// Convert SHIFT-JIS encoded bytes to UTF-8, replacing malformed sequences.
pub fn decode_shift_jis_lossy(data: &[u8]) -> String {
    let (decoded, _) = SHIFT_JIS.decode_without_bom_handling(data);
    decoded.into_owned()
}

/// Decode a header value, keeping the raw bytes when they are not valid SHIFT-JIS.
///
/// Raw bytes that are not UTF-8 either are converted lossily.
pub fn decode_header_value(data: &[u8]) -> String {
    match decode_shift_jis_strict(data) {
        Ok(decoded) => decoded,
        Err(offset) => {
            debug!(offset, len = data.len(), "header value is not valid SHIFT-JIS, keeping raw bytes");
            String::from_utf8_lossy(data).into_owned()
        }
    }
}
