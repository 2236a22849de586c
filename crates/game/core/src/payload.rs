//! Codec for the opaque payload fields embedded in game records.
//!
//! The backend ships `gameData` / `errorData` as strings rather than nested
//! JSON. Depending on the backend revision the string holds one of:
//!
//! 1. plain JSON text
//! 2. base64-encoded JSON text
//! 3. base64-encoded gzip stream of JSON text
//!
//! [`decode`] accepts all three and reports an absent payload
//! ([`PayloadError::Missing`]) separately from a malformed one.

use std::io::{Read, Write};

use base64::{Engine, engine::general_purpose::STANDARD};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use serde::{Serialize, de::DeserializeOwned};

/// First two bytes of every gzip member (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Wire encodings understood by the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// JSON text, as-is.
    Json,
    /// Base64 of the JSON text.
    Base64Json,
    /// Base64 of a gzip stream whose content is the JSON text.
    Base64GzipJson,
}

/// Failures while decoding (or encoding) a payload field.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The field was absent or the empty string.
    #[error("payload is absent")]
    Missing,

    #[error("payload is neither JSON nor valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("gzip stream is corrupt: {0}")]
    Gzip(#[source] std::io::Error),

    #[error("decoded payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes an opaque payload field into `T`.
///
/// Text whose first non-whitespace character opens a JSON object or array is
/// parsed directly; anything else is treated as base64. After base64 decoding
/// the bytes are gunzipped when they start with the gzip magic number.
pub fn decode<T: DeserializeOwned>(field: Option<&str>) -> Result<T, PayloadError> {
    let text = field.filter(|s| !s.is_empty()).ok_or(PayloadError::Missing)?;

    // '{' and '[' are outside the base64 alphabet, so this cannot shadow an
    // encoded payload.
    if looks_like_json(text) {
        return Ok(serde_json::from_str(text)?);
    }

    let bytes = STANDARD.decode(text.trim())?;
    let json = if bytes.starts_with(&GZIP_MAGIC) {
        gunzip(&bytes)?
    } else {
        String::from_utf8(bytes)?
    };

    Ok(serde_json::from_str(&json)?)
}

/// Encodes `value` with the requested wire encoding.
pub fn encode<T: Serialize>(value: &T, encoding: Encoding) -> Result<String, PayloadError> {
    let json = serde_json::to_string(value)?;

    match encoding {
        Encoding::Json => Ok(json),
        Encoding::Base64Json => Ok(STANDARD.encode(json.as_bytes())),
        Encoding::Base64GzipJson => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(json.as_bytes())
                .map_err(PayloadError::Gzip)?;
            let compressed = encoder.finish().map_err(PayloadError::Gzip)?;
            Ok(STANDARD.encode(compressed))
        }
    }
}

fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('{') | Some('['))
}

fn gunzip(bytes: &[u8]) -> Result<String, PayloadError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw).map_err(PayloadError::Gzip)?;
    Ok(String::from_utf8(raw)?)
}
