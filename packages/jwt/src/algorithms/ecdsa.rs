//! ECDSA signers (ES256, ES384, ES512)
//!
//! Signatures use the JWS fixed-width `r || s` form (RFC 7518 §3.4), not
//! DER: 64 bytes for P-256, 96 for P-384 and 132 for P-521.

use p256::ecdsa::signature::{RandomizedSigner, Verifier};
use p256::elliptic_curve::rand_core::OsRng;

use super::{Algorithm, Family};
use crate::error::{JwtError, JwtResult};
use crate::keys::KeyMaterial;
use crate::signer::Signer;

enum CurveKey {
    P256 {
        signing: Option<p256::ecdsa::SigningKey>,
        verifying: p256::ecdsa::VerifyingKey,
    },
    P384 {
        signing: Option<p384::ecdsa::SigningKey>,
        verifying: p384::ecdsa::VerifyingKey,
    },
    P521 {
        signing: Option<p521::ecdsa::SigningKey>,
        verifying: p521::ecdsa::VerifyingKey,
    },
}

/// Signer backed by an elliptic-curve key pair, or a public key only.
pub struct EcdsaSigner {
    algorithm: Algorithm,
    key: CurveKey,
}

impl EcdsaSigner {
    /// Bind an EC key to an ES* algorithm. The curve must match the
    /// algorithm: P-256 for ES256, P-384 for ES384, P-521 for ES512.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::UnsupportedAlgorithm`] for a non-ECDSA algorithm or
    /// non-EC key material, and [`JwtError::Key`] for a key on the wrong
    /// curve.
    pub fn new(algorithm: Algorithm, material: KeyMaterial) -> JwtResult<Self> {
        if algorithm.family() != Family::Ecdsa {
            return Err(JwtError::UnsupportedAlgorithm(format!(
                "{algorithm} is not an ECDSA algorithm"
            )));
        }
        let key = match (algorithm, material) {
            (Algorithm::ES256, KeyMaterial::P256 { signing, verifying }) => {
                CurveKey::P256 { signing, verifying }
            }
            (Algorithm::ES384, KeyMaterial::P384 { signing, verifying }) => {
                CurveKey::P384 { signing, verifying }
            }
            (Algorithm::ES512, KeyMaterial::P521 { signing, verifying }) => {
                CurveKey::P521 { signing, verifying }
            }
            (_, material @ (KeyMaterial::P256 { .. }
                | KeyMaterial::P384 { .. }
                | KeyMaterial::P521 { .. })) => {
                return Err(JwtError::key(format!(
                    "{algorithm} cannot use a {} key",
                    material.kind()
                )));
            }
            (_, material) => {
                return Err(JwtError::UnsupportedAlgorithm(format!(
                    "{algorithm} cannot be used with {} key material",
                    material.kind()
                )));
            }
        };
        Ok(Self { algorithm, key })
    }

    fn missing_private_key(&self) -> JwtError {
        JwtError::key(format!("{} signer holds no private key", self.algorithm))
    }
}

impl Signer for EcdsaSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Each call draws fresh randomness for the nonce, so signatures over
    /// the same input differ.
    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        match &self.key {
            CurveKey::P256 { signing, .. } => {
                let key = signing.as_ref().ok_or_else(|| self.missing_private_key())?;
                let signature: p256::ecdsa::Signature = key.sign_with_rng(&mut OsRng, data);
                Ok(signature.to_bytes().to_vec())
            }
            CurveKey::P384 { signing, .. } => {
                let key = signing.as_ref().ok_or_else(|| self.missing_private_key())?;
                let signature: p384::ecdsa::Signature = key.sign_with_rng(&mut OsRng, data);
                Ok(signature.to_bytes().to_vec())
            }
            CurveKey::P521 { signing, .. } => {
                let key = signing.as_ref().ok_or_else(|| self.missing_private_key())?;
                let signature: p521::ecdsa::Signature = key.sign_with_rng(&mut OsRng, data);
                Ok(signature.to_bytes().to_vec())
            }
        }
    }

    fn verify_signature(&self, data: &[u8], signature: &[u8]) -> JwtResult<()> {
        let verified = match &self.key {
            CurveKey::P256 { verifying, .. } => p256::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| verifying.verify(data, &sig)),
            CurveKey::P384 { verifying, .. } => p384::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| verifying.verify(data, &sig)),
            CurveKey::P521 { verifying, .. } => p521::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| verifying.verify(data, &sig)),
        };
        verified.map_err(|_| JwtError::InvalidSignature)
    }
}
