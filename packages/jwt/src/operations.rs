//! JWT core operations: encode and decode
//!
//! Decode runs a fixed sequence and stops at the first failure:
//!
//! 1. split into three segments            -> `MalformedToken`
//! 2. verify the signature over `h.p`      -> `InvalidSignature`
//! 3. decode the header                    -> `MalformedToken`
//! 4. header `alg` must equal the signer's -> `InvalidAlgorithm`
//! 5. decode the payload                   -> `MalformedToken`
//! 6. bind header, payload, signature into the target
//!
//! Nothing reaches the target before step 6.

use serde::de::DeserializeOwned;

use crate::binding::{DecodeTarget, Encodable};
use crate::codec::{self, UnverifiedToken};
use crate::encoding;
use crate::error::{JwtError, JwtResult};
use crate::signer::Signer;
use crate::types::Header;

pub(crate) fn encode<S, T>(signer: &S, value: &T) -> JwtResult<String>
where
    S: Signer + ?Sized,
    T: Encodable + ?Sized,
{
    let algorithm = signer.algorithm();
    let header = value.header_json(algorithm)?;
    let payload = value.payload_json()?;

    let signing_input = codec::signing_input(&header, &payload);
    let signature = signer.sign(signing_input.as_bytes())?;
    let token = codec::append_signature(signing_input, &signature);

    tracing::trace!(%algorithm, len = token.len(), "encoded token");
    Ok(token)
}

pub(crate) fn decode<S, T>(signer: &S, token: &[u8], target: &mut T) -> JwtResult<()>
where
    S: Signer + ?Sized,
    T: DecodeTarget,
{
    let algorithm = signer.algorithm();

    let parts = UnverifiedToken::parse(token).inspect_err(|_| {
        tracing::debug!(%algorithm, stage = "split", "rejected token");
    })?;

    let signature = signer
        .verify(parts.signing_input(), parts.signature())
        .map_err(|_| {
            tracing::debug!(%algorithm, stage = "verify", "rejected token");
            JwtError::InvalidSignature
        })?;

    let header: Header = segment_json(parts.header(), "header").inspect_err(|_| {
        tracing::debug!(%algorithm, stage = "header", "rejected token");
    })?;

    if header.alg != algorithm {
        tracing::debug!(%algorithm, found = %header.alg, stage = "algorithm", "rejected token");
        return Err(JwtError::InvalidAlgorithm {
            expected: algorithm,
            found: header.alg,
        });
    }

    let payload: T::Payload = segment_json(parts.payload(), "payload").inspect_err(|_| {
        tracing::debug!(%algorithm, stage = "payload", "rejected token");
    })?;

    target.accept_header(header);
    target.accept_payload(payload);
    target.accept_signature(signature);

    tracing::trace!(%algorithm, len = token.len(), "decoded token");
    Ok(())
}

fn segment_json<T: DeserializeOwned>(segment: &[u8], part: &'static str) -> JwtResult<T> {
    let json = encoding::decode(segment)
        .map_err(|_| JwtError::MalformedToken(format!("{part} is not valid base64url")))?;
    serde_json::from_slice(&json)
        .map_err(|e| JwtError::MalformedToken(format!("{part} is not valid JSON: {e}")))
}
