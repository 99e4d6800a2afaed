//! Key material handed to [`Algorithm::new`](crate::Algorithm::new)
//!
//! Parsing key formats is the job of a [`KeySource`]. The crate ships sources
//! for raw secrets, already-parsed keys ([`KeyMaterial`] itself) and PEM
//! files ([`Pem`](crate::Pem)).

use std::fmt;

use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::algorithms::Algorithm;
use crate::error::JwtResult;

/// Parsed key material, ready to bind to an algorithm.
///
/// Asymmetric variants carry an optional private half: without it the
/// resulting signer verifies but cannot sign.
pub enum KeyMaterial {
    /// Shared HMAC secret.
    Secret(Zeroizing<Vec<u8>>),
    /// RSA key for RS* and PS* algorithms.
    Rsa {
        /// Private key, if signing is needed.
        private: Option<RsaPrivateKey>,
        /// Public key.
        public: RsaPublicKey,
    },
    /// NIST P-256 key for ES256.
    P256 {
        /// Signing key, if signing is needed.
        signing: Option<p256::ecdsa::SigningKey>,
        /// Verifying key.
        verifying: p256::ecdsa::VerifyingKey,
    },
    /// NIST P-384 key for ES384.
    P384 {
        /// Signing key, if signing is needed.
        signing: Option<p384::ecdsa::SigningKey>,
        /// Verifying key.
        verifying: p384::ecdsa::VerifyingKey,
    },
    /// NIST P-521 key for ES512.
    P521 {
        /// Signing key, if signing is needed.
        signing: Option<p521::ecdsa::SigningKey>,
        /// Verifying key.
        verifying: p521::ecdsa::VerifyingKey,
    },
}

impl KeyMaterial {
    /// Wrap a shared secret.
    #[must_use]
    pub fn secret(bytes: impl Into<Vec<u8>>) -> Self {
        KeyMaterial::Secret(Zeroizing::new(bytes.into()))
    }

    /// Short description of the key type, safe to log.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            KeyMaterial::Secret(_) => "shared secret",
            KeyMaterial::Rsa { .. } => "RSA",
            KeyMaterial::P256 { .. } => "P-256",
            KeyMaterial::P384 { .. } => "P-384",
            KeyMaterial::P521 { .. } => "P-521",
        }
    }

    /// Whether the material can produce signatures.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        match self {
            KeyMaterial::Secret(_) => true,
            KeyMaterial::Rsa { private, .. } => private.is_some(),
            KeyMaterial::P256 { signing, .. } => signing.is_some(),
            KeyMaterial::P384 { signing, .. } => signing.is_some(),
            KeyMaterial::P521 { signing, .. } => signing.is_some(),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("kind", &self.kind())
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}

impl From<RsaPrivateKey> for KeyMaterial {
    fn from(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        KeyMaterial::Rsa {
            private: Some(private),
            public,
        }
    }
}

impl From<RsaPublicKey> for KeyMaterial {
    fn from(public: RsaPublicKey) -> Self {
        KeyMaterial::Rsa {
            private: None,
            public,
        }
    }
}

impl From<p256::ecdsa::SigningKey> for KeyMaterial {
    fn from(signing: p256::ecdsa::SigningKey) -> Self {
        let verifying = p256::ecdsa::VerifyingKey::from(&signing);
        KeyMaterial::P256 {
            signing: Some(signing),
            verifying,
        }
    }
}

impl From<p256::ecdsa::VerifyingKey> for KeyMaterial {
    fn from(verifying: p256::ecdsa::VerifyingKey) -> Self {
        KeyMaterial::P256 {
            signing: None,
            verifying,
        }
    }
}

impl From<p384::ecdsa::SigningKey> for KeyMaterial {
    fn from(signing: p384::ecdsa::SigningKey) -> Self {
        let verifying = p384::ecdsa::VerifyingKey::from(&signing);
        KeyMaterial::P384 {
            signing: Some(signing),
            verifying,
        }
    }
}

impl From<p384::ecdsa::VerifyingKey> for KeyMaterial {
    fn from(verifying: p384::ecdsa::VerifyingKey) -> Self {
        KeyMaterial::P384 {
            signing: None,
            verifying,
        }
    }
}

impl From<p521::ecdsa::SigningKey> for KeyMaterial {
    fn from(signing: p521::ecdsa::SigningKey) -> Self {
        let verifying = p521::ecdsa::VerifyingKey::from(&signing);
        KeyMaterial::P521 {
            signing: Some(signing),
            verifying,
        }
    }
}

impl From<p521::ecdsa::VerifyingKey> for KeyMaterial {
    fn from(verifying: p521::ecdsa::VerifyingKey) -> Self {
        KeyMaterial::P521 {
            signing: None,
            verifying,
        }
    }
}

/// Something that can produce key material for a given algorithm.
///
/// The algorithm is passed so a source holding several formats (a PEM bundle,
/// a keystore entry) can pick the right one.
pub trait KeySource {
    /// Load key material for `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns an error when the key cannot be read or parsed.
    fn load(self, algorithm: Algorithm) -> JwtResult<KeyMaterial>;
}

impl KeySource for KeyMaterial {
    fn load(self, _algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        Ok(self)
    }
}

impl KeySource for &[u8] {
    fn load(self, _algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        Ok(KeyMaterial::secret(self))
    }
}

impl<const N: usize> KeySource for &[u8; N] {
    fn load(self, _algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        Ok(KeyMaterial::secret(self.as_slice()))
    }
}

impl KeySource for Vec<u8> {
    fn load(self, _algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        Ok(KeyMaterial::secret(self))
    }
}

impl KeySource for &str {
    fn load(self, _algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        Ok(KeyMaterial::secret(self.as_bytes()))
    }
}

impl KeySource for String {
    fn load(self, _algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        Ok(KeyMaterial::secret(self.into_bytes()))
    }
}
