//! Base64url segment codec (RFC 7515 §2)
//!
//! Every token segment uses the URL-safe alphabet. The encoder never emits
//! padding; the decoder tolerates it so tokens from lenient producers still
//! parse.

use ::base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

const SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as an unpadded base64url segment.
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    SEGMENT.encode(input)
}

/// Append the unpadded base64url encoding of `input` to `out`.
#[inline]
pub(crate) fn encode_into(input: &[u8], out: &mut String) {
    SEGMENT.encode_string(input, out);
}

/// Decode a base64url segment, with or without padding.
#[inline]
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, ::base64::DecodeError> {
    SEGMENT.decode(input)
}
