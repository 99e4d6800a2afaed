//! Binding contracts between tokens and caller types
//!
//! [`Encodable`] describes what gets signed; [`DecodeTarget`] describes
//! where the verified parts of a decoded token go. Both are resolved at
//! compile time, so a target that cannot hold a part simply does not
//! implement the method for it.
//!
//! A plain payload type opts in with the [`Payload`] marker and is then
//! both encodable (under the signer's default header) and decodable (the
//! whole target is the payload). [`Token`] carries its own header, and a
//! custom struct can take any mix of header, payload and signature by
//! implementing [`DecodeTarget`] by hand:
//!
//! ```
//! use signed_jwt::{Claims, DecodeTarget, Header};
//!
//! #[derive(Default)]
//! struct Session {
//!     key_id: Option<String>,
//!     claims: Claims,
//! }
//!
//! impl DecodeTarget for Session {
//!     type Payload = Claims;
//!
//!     fn accept_header(&mut self, header: Header) {
//!         self.key_id = header.kid;
//!     }
//!
//!     fn accept_payload(&mut self, payload: Claims) {
//!         self.claims = payload;
//!     }
//! }
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::algorithms::Algorithm;
use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::types::{Header, Token};

/// Marker for types that are a token payload on their own.
///
/// Implement it for a claims struct to encode it with the signer's default
/// header and decode tokens straight into it.
pub trait Payload {}

impl Payload for Claims {}
impl Payload for Value {}
impl Payload for Map<String, Value> {}

/// A value that can be signed into a token.
pub trait Encodable {
    /// JSON for the header, given the signer's algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Serialization`] when the header does not
    /// serialize.
    fn header_json(&self, algorithm: Algorithm) -> JwtResult<Vec<u8>>;

    /// JSON for the payload.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Serialization`] when the payload does not
    /// serialize.
    fn payload_json(&self) -> JwtResult<Vec<u8>>;
}

impl<T: Payload + Serialize> Encodable for T {
    fn header_json(&self, algorithm: Algorithm) -> JwtResult<Vec<u8>> {
        to_json(&algorithm.header())
    }

    fn payload_json(&self) -> JwtResult<Vec<u8>> {
        to_json(self)
    }
}

/// The token's header is signed verbatim, including `kid` and any extra
/// parameters.
impl<P: Serialize> Encodable for Token<P> {
    fn header_json(&self, algorithm: Algorithm) -> JwtResult<Vec<u8>> {
        if self.header.alg != algorithm {
            // Verifiers with the same key will reject this with
            // InvalidAlgorithm.
            tracing::warn!(
                header_alg = %self.header.alg,
                signer_alg = %algorithm,
                "signing a header that names a different algorithm"
            );
        }
        to_json(&self.header)
    }

    fn payload_json(&self) -> JwtResult<Vec<u8>> {
        to_json(&self.payload)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> JwtResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| JwtError::serialization(&e))
}

/// Receiver for the verified parts of a decoded token.
///
/// Decode calls these only after the signature and algorithm checks pass
/// and both header and payload have decoded, in the order header, payload,
/// signature. A failed decode calls none of them.
pub trait DecodeTarget {
    /// Type the payload JSON decodes into.
    type Payload: DeserializeOwned;

    /// Receive the decoded header. Ignored by default.
    fn accept_header(&mut self, header: Header) {
        let _ = header;
    }

    /// Receive the decoded payload.
    fn accept_payload(&mut self, payload: Self::Payload);

    /// Receive the raw signature bytes. Ignored by default.
    fn accept_signature(&mut self, signature: Vec<u8>) {
        let _ = signature;
    }
}

impl<T: Payload + DeserializeOwned> DecodeTarget for T {
    type Payload = T;

    fn accept_payload(&mut self, payload: T) {
        *self = payload;
    }
}

impl<P: DeserializeOwned> DecodeTarget for Token<P> {
    type Payload = P;

    fn accept_header(&mut self, header: Header) {
        self.header = header;
    }

    fn accept_payload(&mut self, payload: P) {
        self.payload = payload;
    }

    fn accept_signature(&mut self, signature: Vec<u8>) {
        self.signature = signature;
    }
}
