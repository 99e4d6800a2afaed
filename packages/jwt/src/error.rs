//! JWT error types

use thiserror::Error;

use crate::algorithms::Algorithm;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Failures surfaced by encoding, decoding and key loading.
///
/// Decode failures are ordered by the stage that produced them: a token that
/// does not split is `MalformedToken`, a token whose signature does not check
/// is `InvalidSignature`, and only a verified token can produce
/// `InvalidAlgorithm` or a header/payload `MalformedToken`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Wrong segment count, or a header/payload that is not base64url JSON.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The signature did not verify. Also covers an undecodable signature
    /// segment.
    #[error("invalid signature")]
    InvalidSignature,

    /// The verified header names a different algorithm than the signer.
    #[error("invalid algorithm: expected {expected}, found {found}")]
    InvalidAlgorithm {
        /// Algorithm of the signer performing the decode.
        expected: Algorithm,
        /// Algorithm named by the token header.
        found: Algorithm,
    },

    /// Unknown wire name, or a key that cannot back the requested algorithm.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key material is malformed or does not fit the algorithm.
    #[error("key error: {0}")]
    Key(String),

    /// A header or payload value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Key material could not be read.
    #[error("i/o error: {0}")]
    Io(String),

    /// `exp` is in the past (caller-invoked validation only).
    #[error("token has expired")]
    Expired,

    /// `nbf` is in the future (caller-invoked validation only).
    #[error("token is not yet valid")]
    NotYetValid,
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(reason: &str) -> Self {
        JwtError::MalformedToken(reason.to_string())
    }

    /// Create a key error
    #[inline]
    #[must_use]
    pub fn key(msg: impl Into<String>) -> Self {
        JwtError::Key(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(err: &serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}
