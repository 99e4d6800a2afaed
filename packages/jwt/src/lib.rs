//! Compact signed JSON Web Tokens (JWS/JWT)
//!
//! This crate provides:
//! - HS256/384/512, RS256/384/512, PS256/384/512 and ES256/384/512
//! - a strict decode pipeline: split, verify, check `alg`, then bind
//! - registered claims with a builder, plus caller-defined payload types
//! - PEM and in-memory key sources
//!
//! ```
//! use signed_jwt::{Algorithm, Claims, JwtResult, Signer};
//!
//! # fn main() -> JwtResult<()> {
//! let signer = Algorithm::HS256.new("secret")?;
//!
//! let claims = Claims::builder().issuer("user@example.com").build();
//! let token = signer.encode(&claims)?;
//!
//! let decoded: Claims = signer.decode_into(&token)?;
//! assert_eq!(decoded.iss.as_deref(), Some("user@example.com"));
//! # Ok(())
//! # }
//! ```
//!
//! A [`Signer`] holds no mutable state. Build one per algorithm and key and
//! share it (for example behind an `Arc`) across threads.

mod algorithms;
mod binding;
mod claims;
mod codec;
pub mod encoding;
mod error;
mod keys;
mod operations;
mod pem;
mod signer;
mod types;
mod validation;

pub use algorithms::{Algorithm, EcdsaSigner, HashWidth, HmacSigner, KeyKind, RsaSigner};
pub use binding::{DecodeTarget, Encodable, Payload};
pub use claims::{Audience, Claims, ClaimsBuilder, NumericDate};
pub use codec::UnverifiedToken;
pub use error::{JwtError, JwtResult};
pub use keys::{KeyMaterial, KeySource};
pub use self::pem::Pem;
pub use signer::Signer;
pub use types::{Header, TOKEN_TYPE, Token};
pub use validation::Validation;
