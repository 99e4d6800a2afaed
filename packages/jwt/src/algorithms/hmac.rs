//! HMAC-SHA signers (HS256, HS384, HS512)

use ::hmac::{digest::KeyInit, Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{Algorithm, Family, HashWidth};
use crate::error::{JwtError, JwtResult};
use crate::signer::Signer;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Signer backed by a shared secret.
pub struct HmacSigner {
    algorithm: Algorithm,
    secret: Zeroizing<Vec<u8>>,
}

impl HmacSigner {
    /// Bind `secret` to an HMAC algorithm.
    ///
    /// Secrets shorter than the digest are accepted but logged; RFC 7518
    /// §3.2 asks for at least the hash width.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::UnsupportedAlgorithm`] for a non-HMAC algorithm and
    /// [`JwtError::Key`] for an empty secret.
    pub fn new(algorithm: Algorithm, secret: Zeroizing<Vec<u8>>) -> JwtResult<Self> {
        if algorithm.family() != Family::Hmac {
            return Err(JwtError::UnsupportedAlgorithm(format!(
                "{algorithm} is not an HMAC algorithm"
            )));
        }
        if secret.is_empty() {
            return Err(JwtError::key("HMAC secret must not be empty"));
        }
        let min = algorithm.hash().bytes();
        if secret.len() < min {
            tracing::warn!(
                %algorithm,
                len = secret.len(),
                min,
                "HMAC secret is shorter than the digest size"
            );
        }
        Ok(Self { algorithm, secret })
    }

    fn mac(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        match self.algorithm.hash() {
            HashWidth::Sha256 => compute::<HmacSha256>(&self.secret, data),
            HashWidth::Sha384 => compute::<HmacSha384>(&self.secret, data),
            HashWidth::Sha512 => compute::<HmacSha512>(&self.secret, data),
        }
    }
}

fn compute<M: Mac + KeyInit>(secret: &[u8], data: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| JwtError::key("invalid HMAC key"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl Signer for HmacSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        self.mac(data)
    }

    fn verify_signature(&self, data: &[u8], signature: &[u8]) -> JwtResult<()> {
        let expected = self.mac(data)?;
        if bool::from(expected.as_slice().ct_eq(signature)) {
            Ok(())
        } else {
            Err(JwtError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(algorithm: Algorithm, secret: &[u8]) -> JwtResult<HmacSigner> {
        HmacSigner::new(algorithm, Zeroizing::new(secret.to_vec()))
    }

    #[test]
    fn digest_sizes_follow_algorithm() -> JwtResult<()> {
        for (alg, len) in [
            (Algorithm::HS256, 32),
            (Algorithm::HS384, 48),
            (Algorithm::HS512, 64),
        ] {
            assert_eq!(signer(alg, b"secret")?.sign(b"data")?.len(), len);
        }
        Ok(())
    }

    #[test]
    fn rejects_truncated_and_altered_tags() -> JwtResult<()> {
        let s = signer(Algorithm::HS256, b"secret")?;
        let mut tag = s.sign(b"data")?;
        assert!(s.verify_signature(b"data", &tag).is_ok());
        assert_eq!(
            s.verify_signature(b"data", &tag[..31]),
            Err(JwtError::InvalidSignature)
        );
        tag[0] ^= 1;
        assert_eq!(
            s.verify_signature(b"data", &tag),
            Err(JwtError::InvalidSignature)
        );
        Ok(())
    }

    #[test]
    fn empty_secret_is_a_key_error() {
        assert!(matches!(signer(Algorithm::HS256, b""), Err(JwtError::Key(_))));
    }

    #[test]
    fn non_hmac_algorithm_is_rejected() {
        assert!(matches!(
            signer(Algorithm::RS256, b"secret"),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
    }
}
