//! UTF-8 / base64 payload convention shared by file download and upload.
//!
//! Textual content crosses the tool boundary as UTF-8 strings; binary content
//! crosses as standard base64 text together with an explicit binary flag.
//! Honoring the convention in both directions keeps upload-then-download
//! round trips byte exact.

use base64::{engine::general_purpose::STANDARD as BASE64, DecodeError, Engine};

/// File content as it crosses the tool boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub content: String,
    pub is_binary: bool,
}

/// Encode downloaded bytes: UTF-8 text when the bytes decode cleanly,
/// otherwise base64 with the binary flag set.
pub fn encode_payload(bytes: Vec<u8>) -> EncodedPayload {
    match String::from_utf8(bytes) {
        Ok(text) => EncodedPayload {
            content: text,
            is_binary: false,
        },
        Err(err) => EncodedPayload {
            content: BASE64.encode(err.into_bytes()),
            is_binary: true,
        },
    }
}

/// Decode uploaded content back into raw bytes per the binary flag.
pub fn decode_payload(content: &str, is_binary: bool) -> Result<Vec<u8>, DecodeError> {
    if is_binary {
        BASE64.decode(content)
    } else {
        Ok(content.as_bytes().to_vec())
    }
}
