//! Header and token types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::algorithms::Algorithm;
use crate::claims::Claims;

/// Token type marker written by [`Header::new`].
pub const TOKEN_TYPE: &str = "JWT";

/// JOSE header.
///
/// Fields other than `alg`, `typ` and `kid` are kept in `extra` so they
/// survive a decode/encode cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm.
    pub alg: Algorithm,
    /// Token type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Key ID hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Any other header parameters.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// Header for `alg` with `typ` set to `"JWT"`.
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: Some(TOKEN_TYPE.to_string()),
            kid: None,
            extra: Map::new(),
        }
    }

    /// Set the key ID.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Add a header parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(Algorithm::HS256)
    }
}

/// Header, payload and signature of one token.
///
/// Encoding a `Token` signs its header verbatim instead of the signer's
/// default header; decoding into one fills all three parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<P = Claims> {
    /// JOSE header.
    pub header: Header,
    /// Claims or any other payload type.
    pub payload: P,
    /// Raw signature bytes. Empty until decoded.
    pub signature: Vec<u8>,
}

impl<P> Token<P> {
    /// Unsigned token with the given header and payload.
    #[must_use]
    pub fn new(header: Header, payload: P) -> Self {
        Self {
            header,
            payload,
            signature: Vec::new(),
        }
    }
}

impl<P: Default> Default for Token<P> {
    fn default() -> Self {
        Self::new(Header::default(), P::default())
    }
}
