//! Signer capability
//!
//! A [`Signer`] is one algorithm bound to one key. The primitive methods
//! (`sign`, `verify_signature`) are implemented per family; `encode` and
//! `decode` are provided on top of them and are the same for every
//! algorithm.

use std::sync::Arc;

use crate::algorithms::Algorithm;
use crate::binding::{DecodeTarget, Encodable};
use crate::encoding;
use crate::error::{JwtError, JwtResult};
use crate::operations;

/// Signing algorithm interface.
///
/// Implementations hold no mutable state and must be thread-safe, so one
/// signer can serve concurrent encode and decode calls.
pub trait Signer: Send + Sync {
    /// The algorithm this signer is bound to.
    fn algorithm(&self) -> Algorithm;

    /// Sign `data` and return the raw signature bytes.
    ///
    /// HS* and RS* signatures are deterministic. PS* and ES* signatures are
    /// randomized: signing the same input twice yields different bytes, both
    /// of which verify. See [`Algorithm::is_deterministic`].
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Key`] when the signer holds only a public key.
    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>>;

    /// Check a raw signature over `data`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidSignature`] when the signature does not
    /// verify.
    fn verify_signature(&self, data: &[u8], signature: &[u8]) -> JwtResult<()>;

    /// Verify a base64url signature segment over `data` and return the
    /// decoded signature bytes.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidSignature`] when the segment is not valid
    /// base64url or the signature does not verify.
    fn verify(&self, data: &[u8], signature: &[u8]) -> JwtResult<Vec<u8>> {
        let raw = encoding::decode(signature).map_err(|_| JwtError::InvalidSignature)?;
        self.verify_signature(data, &raw)?;
        Ok(raw)
    }

    /// Encode `value` as a signed compact token.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Serialization`] when the header or payload cannot
    /// be serialized, or the signing error.
    fn encode<T: Encodable + ?Sized>(&self, value: &T) -> JwtResult<String>
    where
        Self: Sized,
    {
        operations::encode(self, value)
    }

    /// Verify `token` and bind its parts into `target`.
    ///
    /// `target` is left untouched unless every check passes.
    ///
    /// # Errors
    ///
    /// [`JwtError::MalformedToken`], [`JwtError::InvalidSignature`] or
    /// [`JwtError::InvalidAlgorithm`], in the order the checks run.
    fn decode<T: DecodeTarget>(&self, token: impl AsRef<[u8]>, target: &mut T) -> JwtResult<()>
    where
        Self: Sized,
    {
        operations::decode(self, token.as_ref(), target)
    }

    /// Verify `token` and bind it into a fresh `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Signer::decode`].
    fn decode_into<T: DecodeTarget + Default>(&self, token: impl AsRef<[u8]>) -> JwtResult<T>
    where
        Self: Sized,
    {
        let mut target = T::default();
        operations::decode(self, token.as_ref(), &mut target)?;
        Ok(target)
    }
}

impl<S: Signer + ?Sized> Signer for Box<S> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(data)
    }

    fn verify_signature(&self, data: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify_signature(data, signature)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).verify(data, signature)
    }
}

/// Shared ownership, for one signer used from many tasks.
impl<S: Signer + ?Sized> Signer for Arc<S> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(data)
    }

    fn verify_signature(&self, data: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify_signature(data, signature)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).verify(data, signature)
    }
}
