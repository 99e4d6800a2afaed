//! RSA signers: RSASSA-PKCS1-v1_5 (RS256/384/512) and RSASSA-PSS
//! (PS256/384/512)

use ::rsa::rand_core::OsRng;
use ::rsa::traits::PublicKeyParts;
use ::rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{Algorithm, Family, HashWidth};
use crate::error::{JwtError, JwtResult};
use crate::signer::Signer;

/// RFC 7518 §3.3: keys of 2048 bits or larger MUST be used.
const MIN_MODULUS_BITS: usize = 2048;

/// Signer backed by an RSA key pair, or a public key only.
pub struct RsaSigner {
    algorithm: Algorithm,
    private: Option<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl RsaSigner {
    /// Bind an RSA key to an RS* or PS* algorithm.
    ///
    /// Without a private key the signer can only verify.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::UnsupportedAlgorithm`] for a non-RSA algorithm and
    /// [`JwtError::Key`] for a modulus under 2048 bits.
    pub fn new(
        algorithm: Algorithm,
        private: Option<RsaPrivateKey>,
        public: RsaPublicKey,
    ) -> JwtResult<Self> {
        if !matches!(algorithm.family(), Family::RsaPkcs1 | Family::RsaPss) {
            return Err(JwtError::UnsupportedAlgorithm(format!(
                "{algorithm} is not an RSA algorithm"
            )));
        }
        let bits = public.size() * 8;
        if bits < MIN_MODULUS_BITS {
            return Err(JwtError::key(format!(
                "RSA modulus is {bits} bits, {algorithm} requires at least {MIN_MODULUS_BITS}"
            )));
        }
        Ok(Self {
            algorithm,
            private,
            public,
        })
    }

    fn pkcs1(&self) -> Pkcs1v15Sign {
        match self.algorithm.hash() {
            HashWidth::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            HashWidth::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            HashWidth::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }

    fn pss(&self) -> Pss {
        match self.algorithm.hash() {
            HashWidth::Sha256 => Pss::new::<Sha256>(),
            HashWidth::Sha384 => Pss::new::<Sha384>(),
            HashWidth::Sha512 => Pss::new::<Sha512>(),
        }
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self.algorithm.hash() {
            HashWidth::Sha256 => Sha256::digest(data).to_vec(),
            HashWidth::Sha384 => Sha384::digest(data).to_vec(),
            HashWidth::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl Signer for RsaSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// PS* signatures use a fresh random salt on every call.
    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        let private = self
            .private
            .as_ref()
            .ok_or_else(|| JwtError::key(format!("{} signer holds no private key", self.algorithm)))?;
        let hashed = self.digest(data);
        let signature = if self.algorithm.family() == Family::RsaPss {
            private.sign_with_rng(&mut OsRng, self.pss(), &hashed)
        } else {
            private.sign(self.pkcs1(), &hashed)
        };
        signature.map_err(|e| JwtError::key(format!("RSA signing failed: {e}")))
    }

    fn verify_signature(&self, data: &[u8], signature: &[u8]) -> JwtResult<()> {
        let hashed = self.digest(data);
        let verified = if self.algorithm.family() == Family::RsaPss {
            self.public.verify(self.pss(), &hashed, signature)
        } else {
            self.public.verify(self.pkcs1(), &hashed, signature)
        };
        verified.map_err(|_| JwtError::InvalidSignature)
    }
}
