//! PEM key source
//!
//! Reads one or more PEM blocks and hands the algorithm the block it needs:
//!
//! | family   | accepted labels                                                  |
//! |----------|------------------------------------------------------------------|
//! | HS*      | `HMAC SECRET` (the decoded body is the secret)                   |
//! | RS*, PS* | `PRIVATE KEY`, `RSA PRIVATE KEY`, `PUBLIC KEY`, `RSA PUBLIC KEY` |
//! | ES*      | `PRIVATE KEY`, `EC PRIVATE KEY`, `PUBLIC KEY`                    |
//!
//! A private key wins over a public key when both are present. PEM data that
//! only holds a key of another class (an RSA key for ES256, an EC key or a
//! secret for RS256, any asymmetric key for HS256) is `UnsupportedAlgorithm`.

use std::fmt;
use std::path::{Path, PathBuf};

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, PrivateKeyInfo, SubjectPublicKeyInfoRef};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::algorithms::{Algorithm, Family};
use crate::error::{JwtError, JwtResult};
use crate::keys::{KeyMaterial, KeySource};

const HMAC_SECRET: &str = "HMAC SECRET";

/// PEM-encoded key material, from a file or from memory.
#[derive(Clone)]
pub enum Pem {
    /// Read the file when the key is loaded.
    Path(PathBuf),
    /// PEM text already in memory.
    Bytes(Zeroizing<Vec<u8>>),
}

impl Pem {
    /// PEM file on disk.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Pem::Path(path.as_ref().to_path_buf())
    }

    /// PEM text in memory.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Pem::Bytes(Zeroizing::new(bytes.into()))
    }

    fn blocks(&self) -> JwtResult<Vec<::pem::Pem>> {
        let bytes = match self {
            Pem::Path(path) => Zeroizing::new(std::fs::read(path).map_err(|e| {
                JwtError::Io(format!("reading {}: {e}", path.display()))
            })?),
            Pem::Bytes(bytes) => bytes.clone(),
        };
        let blocks = ::pem::parse_many(bytes.as_slice())
            .map_err(|e| JwtError::key(format!("invalid PEM data: {e}")))?;
        if blocks.is_empty() {
            return Err(JwtError::key("no PEM blocks found"));
        }
        Ok(blocks)
    }
}

impl fmt::Debug for Pem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pem::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Pem::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

impl KeySource for Pem {
    fn load(self, algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        (&self).load(algorithm)
    }
}

impl KeySource for &Pem {
    fn load(self, algorithm: Algorithm) -> JwtResult<KeyMaterial> {
        let blocks = self.blocks()?;
        tracing::debug!(%algorithm, blocks = blocks.len(), "loading PEM key material");

        let wanted = match algorithm.family() {
            Family::Hmac => KeyClass::Secret,
            Family::RsaPkcs1 | Family::RsaPss => KeyClass::Rsa,
            Family::Ecdsa => KeyClass::Ec,
        };
        let usable: Vec<&::pem::Pem> = blocks
            .iter()
            .filter(|block| KeyClass::of(block) == Some(wanted))
            .collect();
        if usable.is_empty() {
            return Err(match blocks.iter().find_map(KeyClass::of) {
                Some(found) => JwtError::UnsupportedAlgorithm(format!(
                    "{algorithm} cannot use {found} from PEM data"
                )),
                None => JwtError::key(format!("PEM data holds no {wanted}")),
            });
        }

        match wanted {
            KeyClass::Secret => secret(usable[0]),
            KeyClass::Rsa => rsa_key(&usable),
            KeyClass::Ec => ec_key(algorithm, &usable),
        }
    }
}

/// What a PEM block holds, judged by its label and, for PKCS#8 and SPKI
/// blocks, by the algorithm OID inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Secret,
    Rsa,
    Ec,
}

impl KeyClass {
    fn of(block: &::pem::Pem) -> Option<Self> {
        let oid = match block.tag() {
            HMAC_SECRET => return Some(KeyClass::Secret),
            "RSA PRIVATE KEY" | "RSA PUBLIC KEY" => return Some(KeyClass::Rsa),
            "EC PRIVATE KEY" => return Some(KeyClass::Ec),
            "PRIVATE KEY" => PrivateKeyInfo::try_from(block.contents())
                .ok()?
                .algorithm
                .oid,
            "PUBLIC KEY" => SubjectPublicKeyInfoRef::try_from(block.contents())
                .ok()?
                .algorithm
                .oid,
            _ => return None,
        };
        if oid == rsa::pkcs1::ALGORITHM_OID {
            Some(KeyClass::Rsa)
        } else if oid == p256::elliptic_curve::ALGORITHM_OID {
            Some(KeyClass::Ec)
        } else {
            None
        }
    }
}

impl fmt::Display for KeyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyClass::Secret => "an HMAC secret",
            KeyClass::Rsa => "an RSA key",
            KeyClass::Ec => "an EC key",
        })
    }
}

fn secret(block: &::pem::Pem) -> JwtResult<KeyMaterial> {
    if block.contents().is_empty() {
        return Err(JwtError::key("PEM secret is empty"));
    }
    Ok(KeyMaterial::Secret(Zeroizing::new(block.contents().to_vec())))
}

fn rsa_key(blocks: &[&::pem::Pem]) -> JwtResult<KeyMaterial> {
    let mut public = None;
    for block in blocks {
        match block.tag() {
            "PRIVATE KEY" => {
                let key = RsaPrivateKey::from_pkcs8_der(block.contents())
                    .map_err(|e| JwtError::key(format!("invalid PKCS#8 RSA private key: {e}")))?;
                return Ok(KeyMaterial::from(key));
            }
            "RSA PRIVATE KEY" => {
                let key = RsaPrivateKey::from_pkcs1_der(block.contents())
                    .map_err(|e| JwtError::key(format!("invalid PKCS#1 RSA private key: {e}")))?;
                return Ok(KeyMaterial::from(key));
            }
            "PUBLIC KEY" if public.is_none() => {
                let key = RsaPublicKey::from_public_key_der(block.contents())
                    .map_err(|e| JwtError::key(format!("invalid RSA public key: {e}")))?;
                public = Some(key);
            }
            "RSA PUBLIC KEY" if public.is_none() => {
                let key = RsaPublicKey::from_pkcs1_der(block.contents())
                    .map_err(|e| JwtError::key(format!("invalid PKCS#1 RSA public key: {e}")))?;
                public = Some(key);
            }
            _ => {}
        }
    }
    public
        .map(KeyMaterial::from)
        .ok_or_else(|| JwtError::key("no RSA key found in PEM data"))
}

/// Parse an EC key for one curve. Each curve crate exposes the same
/// `SecretKey` / `PublicKey` surface, so the per-curve code is generated.
macro_rules! ec_curve {
    ($name:ident, $curve:ident, $label:literal, $into_signing:expr, $into_verifying:expr) => {
        fn $name(blocks: &[&::pem::Pem]) -> JwtResult<KeyMaterial> {
            let mut public: Option<$curve::PublicKey> = None;
            for block in blocks {
                let secret = match block.tag() {
                    "PRIVATE KEY" => Some(
                        $curve::SecretKey::from_pkcs8_der(block.contents()).map_err(|e| e.to_string()),
                    ),
                    "EC PRIVATE KEY" => Some(
                        $curve::SecretKey::from_sec1_der(block.contents()).map_err(|e| e.to_string()),
                    ),
                    "PUBLIC KEY" if public.is_none() => {
                        let key = $curve::PublicKey::from_public_key_der(block.contents()).map_err(
                            |e| JwtError::key(format!("invalid {} public key: {e}", $label)),
                        )?;
                        public = Some(key);
                        None
                    }
                    _ => None,
                };
                if let Some(secret) = secret {
                    let secret = secret
                        .map_err(|e| JwtError::key(format!("invalid {} private key: {e}", $label)))?;
                    let signing: $curve::ecdsa::SigningKey = $into_signing(&secret)?;
                    return Ok(KeyMaterial::from(signing));
                }
            }
            let public = public
                .ok_or_else(|| JwtError::key(format!("no {} key found in PEM data", $label)))?;
            let verifying: $curve::ecdsa::VerifyingKey = $into_verifying(&public)?;
            Ok(KeyMaterial::from(verifying))
        }
    };
}

ec_curve!(
    p256_key,
    p256,
    "P-256",
    |secret: &p256::SecretKey| -> JwtResult<_> { Ok(p256::ecdsa::SigningKey::from(secret)) },
    |public: &p256::PublicKey| -> JwtResult<_> { Ok(p256::ecdsa::VerifyingKey::from(public)) }
);

ec_curve!(
    p384_key,
    p384,
    "P-384",
    |secret: &p384::SecretKey| -> JwtResult<_> { Ok(p384::ecdsa::SigningKey::from(secret)) },
    |public: &p384::PublicKey| -> JwtResult<_> { Ok(p384::ecdsa::VerifyingKey::from(public)) }
);

ec_curve!(
    p521_key,
    p521,
    "P-521",
    |secret: &p521::SecretKey| -> JwtResult<_> {
        p521::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
            .map_err(|_| JwtError::key("invalid P-521 private scalar"))
    },
    |public: &p521::PublicKey| -> JwtResult<_> {
        p521::ecdsa::VerifyingKey::from_affine(*public.as_affine())
            .map_err(|_| JwtError::key("invalid P-521 public point"))
    }
);

fn ec_key(algorithm: Algorithm, blocks: &[&::pem::Pem]) -> JwtResult<KeyMaterial> {
    match algorithm {
        Algorithm::ES256 => p256_key(blocks),
        Algorithm::ES384 => p384_key(blocks),
        Algorithm::ES512 => p521_key(blocks),
        other => Err(JwtError::UnsupportedAlgorithm(format!(
            "{other} is not an ECDSA algorithm"
        ))),
    }
}
