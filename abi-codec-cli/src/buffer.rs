//! Raw buffer input: base64 (query responses) and hex.

use abi_codec_core::error::{CodecError, CodecResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Transport encoding of a buffer given on the command line or over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BufferEncoding {
    #[default]
    Base64,
    Hex,
}

/// Decode one buffer. An empty string is an empty buffer.
pub fn parse_buffer(input: &str, encoding: BufferEncoding) -> CodecResult<Vec<u8>> {
    match encoding {
        BufferEncoding::Base64 => decode_base64(input),
        BufferEncoding::Hex => decode_hex(input),
    }
}

/// Decode a list of buffers, e.g. the `returnData` of a contract query.
pub fn parse_buffers<S: AsRef<str>>(inputs: &[S], encoding: BufferEncoding) -> CodecResult<Vec<Vec<u8>>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            parse_buffer(s.as_ref(), encoding)
                .map_err(|e| CodecError::invalid_input(format!("buffer [{}]: {}", i, e)))
        })
        .collect()
}

pub fn decode_base64(input: &str) -> CodecResult<Vec<u8>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    STANDARD
        .decode(trimmed)
        .map_err(|e| CodecError::invalid_input(format!("invalid base64 '{}': {}", trimmed, e)))
}

pub fn decode_hex(input: &str) -> CodecResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| CodecError::invalid_input(format!("invalid hex '{}': {}", trimmed, e)))
}
