//! Algorithm registry
//!
//! The closed set of JWS signing algorithms (RFC 7518 §3.1) this crate
//! implements. Each variant knows its wire name and builds a concrete
//! [`Signer`] from key material. Dispatch is an exhaustive `match`, so a new
//! variant does not compile until every family handles it.

mod ecdsa;
mod hmac;
mod rsa;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{JwtError, JwtResult};
use crate::keys::{KeyMaterial, KeySource};
use crate::signer::Signer;
use crate::types::Header;

pub use self::ecdsa::EcdsaSigner;
pub use self::hmac::HmacSigner;
pub use self::rsa::RsaSigner;

/// A signing algorithm, identified on the wire by its `alg` name.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    PS256,
    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    PS384,
    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    PS512,
    /// ECDSA using P-256 and SHA-256
    ES256,
    /// ECDSA using P-384 and SHA-384
    ES384,
    /// ECDSA using P-521 and SHA-512
    ES512,
}

/// Digest used by an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashWidth {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashWidth {
    /// Digest size in bits.
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            HashWidth::Sha256 => 256,
            HashWidth::Sha384 => 384,
            HashWidth::Sha512 => 512,
        }
    }

    /// Digest size in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }
}

/// Whether an algorithm is keyed by a shared secret or a key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Shared secret (HMAC).
    Symmetric,
    /// Private/public key pair (RSA, RSA-PSS, ECDSA).
    Asymmetric,
}

/// Signature scheme family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Hmac,
    RsaPkcs1,
    RsaPss,
    Ecdsa,
}

impl Algorithm {
    /// Every supported algorithm, in registry order.
    pub const ALL: [Algorithm; 12] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::PS256,
        Algorithm::PS384,
        Algorithm::PS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    /// Wire name used in the `alg` header field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::PS256 => "PS256",
            Algorithm::PS384 => "PS384",
            Algorithm::PS512 => "PS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    /// Digest the algorithm signs over.
    #[must_use]
    pub const fn hash(self) -> HashWidth {
        match self {
            Algorithm::HS256 | Algorithm::RS256 | Algorithm::PS256 | Algorithm::ES256 => {
                HashWidth::Sha256
            }
            Algorithm::HS384 | Algorithm::RS384 | Algorithm::PS384 | Algorithm::ES384 => {
                HashWidth::Sha384
            }
            Algorithm::HS512 | Algorithm::RS512 | Algorithm::PS512 | Algorithm::ES512 => {
                HashWidth::Sha512
            }
        }
    }

    /// Digest size in bits.
    #[must_use]
    pub const fn hash_width(self) -> usize {
        self.hash().bits()
    }

    /// Key class the algorithm needs.
    #[must_use]
    pub const fn key_kind(self) -> KeyKind {
        match self.family() {
            Family::Hmac => KeyKind::Symmetric,
            Family::RsaPkcs1 | Family::RsaPss | Family::Ecdsa => KeyKind::Asymmetric,
        }
    }

    /// Whether signing the same input twice yields identical bytes.
    ///
    /// HMAC and RSASSA-PKCS1-v1_5 are deterministic. RSASSA-PSS draws a
    /// fresh salt and ECDSA a hedged nonce on every call, so their signatures
    /// differ between calls and must only be compared by verifying them.
    #[must_use]
    pub const fn is_deterministic(self) -> bool {
        matches!(self.family(), Family::Hmac | Family::RsaPkcs1)
    }

    pub(crate) const fn family(self) -> Family {
        match self {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Family::Hmac,
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => Family::RsaPkcs1,
            Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => Family::RsaPss,
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => Family::Ecdsa,
        }
    }

    /// Canonical header for tokens signed with this algorithm.
    #[must_use]
    pub fn header(self) -> Header {
        Header::new(self)
    }

    /// Build a [`Signer`] bound to this algorithm and the given key.
    ///
    /// A key of the wrong class (a shared secret for RSA, an RSA key for
    /// ECDSA, ...) is [`JwtError::UnsupportedAlgorithm`]; a key of the right
    /// class that cannot back this variant (wrong curve, RSA modulus under
    /// 2048 bits) is [`JwtError::Key`].
    ///
    /// # Errors
    ///
    /// Returns an error when the key source fails to load or the key does not
    /// fit the algorithm.
    pub fn new(self, key: impl KeySource) -> JwtResult<Box<dyn Signer>> {
        let material = key.load(self)?;
        let signer: Box<dyn Signer> = match (self.family(), material) {
            (Family::Hmac, KeyMaterial::Secret(secret)) => {
                Box::new(HmacSigner::new(self, secret)?)
            }
            (Family::RsaPkcs1 | Family::RsaPss, KeyMaterial::Rsa { private, public }) => {
                Box::new(RsaSigner::new(self, private, public)?)
            }
            (Family::Ecdsa, material @ (KeyMaterial::P256 { .. }
                | KeyMaterial::P384 { .. }
                | KeyMaterial::P521 { .. })) => Box::new(EcdsaSigner::new(self, material)?),
            (_, material) => {
                return Err(JwtError::UnsupportedAlgorithm(format!(
                    "{self} cannot be used with {} key material",
                    material.kind()
                )));
            }
        };
        Ok(signer)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| JwtError::unsupported_algorithm(s))
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.name().parse::<Algorithm>(), Ok(alg));
            assert_eq!(alg.to_string(), alg.name());
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["none", "hs256", "HS257", "EdDSA", ""] {
            assert_eq!(
                name.parse::<Algorithm>(),
                Err(JwtError::UnsupportedAlgorithm(name.to_string()))
            );
        }
    }

    #[test]
    fn metadata_matches_family() {
        assert_eq!(Algorithm::HS384.hash_width(), 384);
        assert_eq!(Algorithm::ES512.hash(), HashWidth::Sha512);
        assert_eq!(Algorithm::HS512.key_kind(), KeyKind::Symmetric);
        assert_eq!(Algorithm::PS256.key_kind(), KeyKind::Asymmetric);
        assert!(Algorithm::RS256.is_deterministic());
        assert!(!Algorithm::PS384.is_deterministic());
        assert!(!Algorithm::ES256.is_deterministic());
    }

    #[test]
    fn serde_uses_wire_name() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Algorithm::PS512)?, "\"PS512\"");
        assert_eq!(serde_json::from_str::<Algorithm>("\"ES384\"")?, Algorithm::ES384);
        assert!(serde_json::from_str::<Algorithm>("\"none\"").is_err());
        Ok(())
    }
}
