//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::path::PathBuf;

use signed_jwt::{Algorithm, Pem, Signer};

pub fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// Fixture holding the signing half of the key for `alg`.
pub fn private_key_file(alg: Algorithm) -> &'static str {
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => "hmac.pem",
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => "rsa.pem",
        Algorithm::ES256 => "es256.pem",
        Algorithm::ES384 => "es384.pem",
        Algorithm::ES512 => "es512.pem",
    }
}

/// Fixture holding the verifying half. HMAC has only the shared secret.
pub fn public_key_file(alg: Algorithm) -> &'static str {
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => "hmac.pem",
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => "rsa.pub.pem",
        Algorithm::ES256 => "es256.pub.pem",
        Algorithm::ES384 => "es384.pub.pem",
        Algorithm::ES512 => "es512.pub.pem",
    }
}

pub fn signer(alg: Algorithm) -> Box<dyn Signer> {
    alg.new(Pem::from_path(testdata(private_key_file(alg))))
        .unwrap_or_else(|e| panic!("{alg} signer from fixture: {e}"))
}

pub fn verifier(alg: Algorithm) -> Box<dyn Signer> {
    alg.new(Pem::from_path(testdata(public_key_file(alg))))
        .unwrap_or_else(|e| panic!("{alg} verifier from fixture: {e}"))
}
