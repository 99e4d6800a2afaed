//! Compact serialization: `header.payload.signature`
//!
//! [`UnverifiedToken`] borrows the three segments of an incoming token
//! without copying or decoding them. The assembly helpers build the
//! signing input and append the signature on the way out.

use crate::encoding;
use crate::error::{JwtError, JwtResult};

const SEPARATOR: u8 = b'.';

/// The three raw segments of a wire token, split but not yet checked.
///
/// Nothing in here is trusted: the signature has not been verified and the
/// header and payload have not been decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnverifiedToken<'a> {
    signing_input: &'a [u8],
    header: &'a [u8],
    payload: &'a [u8],
    signature: &'a [u8],
}

impl<'a> UnverifiedToken<'a> {
    /// Split a token into exactly three non-empty segments.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::MalformedToken`] for any other shape.
    pub fn parse(token: &'a [u8]) -> JwtResult<Self> {
        let mut parts = token.splitn(4, |&b| b == SEPARATOR);
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(JwtError::malformed("token must have exactly three segments"));
        };
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(JwtError::malformed("token segments must not be empty"));
        }
        Ok(Self {
            signing_input: &token[..header.len() + 1 + payload.len()],
            header,
            payload,
            signature,
        })
    }

    /// `header "." payload`, the bytes the signature covers.
    #[must_use]
    pub fn signing_input(&self) -> &'a [u8] {
        self.signing_input
    }

    /// Base64url header segment.
    #[must_use]
    pub fn header(&self) -> &'a [u8] {
        self.header
    }

    /// Base64url payload segment.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Base64url signature segment.
    #[must_use]
    pub fn signature(&self) -> &'a [u8] {
        self.signature
    }
}

/// Build `b64(header) "." b64(payload)`.
pub(crate) fn signing_input(header_json: &[u8], payload_json: &[u8]) -> String {
    // 4 output chars per 3 input bytes, plus separators and the signature
    // appended later.
    let mut out = String::with_capacity((header_json.len() + payload_json.len()) * 4 / 3 + 128);
    encoding::encode_into(header_json, &mut out);
    out.push(char::from(SEPARATOR));
    encoding::encode_into(payload_json, &mut out);
    out
}

/// Turn a signing input into a full token by appending `"." b64(signature)`.
pub(crate) fn append_signature(mut signing_input: String, signature: &[u8]) -> String {
    signing_input.push(char::from(SEPARATOR));
    encoding::encode_into(signature, &mut signing_input);
    signing_input
}
