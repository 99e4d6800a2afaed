//! Key sources and algorithm/key compatibility

mod common;

use signed_jwt::{Algorithm, Claims, JwtError, KeyMaterial, KeySource, Pem, Signer};

fn pem(name: &str) -> Pem {
    Pem::from_path(common::testdata(name))
}

fn assert_verifies(signer: &dyn Signer, verifier: &dyn Signer) {
    let input = b"header.payload";
    let signature = signer
        .sign(input)
        .unwrap_or_else(|e| panic!("{} sign: {e}", signer.algorithm()));
    if let Err(e) = verifier.verify_signature(input, &signature) {
        panic!("{} verify: {e}", verifier.algorithm());
    }
}

#[test]
fn test_pkcs1_and_pkcs8_rsa_keys_are_the_same_key() {
    let pkcs8 = Algorithm::RS256.new(pem("rsa.pem")).expect("pkcs8");
    let pkcs1 = Algorithm::RS256.new(pem("rsa.pkcs1.pem")).expect("pkcs1");
    let public = Algorithm::RS256.new(pem("rsa.pub.pem")).expect("public");

    assert_eq!(
        pkcs8.sign(b"data").expect("sign"),
        pkcs1.sign(b"data").expect("sign")
    );
    assert_verifies(pkcs1.as_ref(), public.as_ref());
}

#[test]
fn test_sec1_ec_key() {
    let sec1 = Algorithm::ES256.new(pem("es256.sec1.pem")).expect("sec1");
    let public = common::verifier(Algorithm::ES256);
    assert_verifies(sec1.as_ref(), public.as_ref());
}

#[test]
fn test_pem_from_memory() {
    let text = std::fs::read(common::testdata("es384.pem")).expect("fixture");
    let signer = Algorithm::ES384.new(Pem::from_bytes(text)).expect("signer");
    assert_verifies(signer.as_ref(), common::verifier(Algorithm::ES384).as_ref());
}

#[test]
fn test_private_key_wins_in_bundle() {
    let mut bundle = std::fs::read(common::testdata("rsa.pub.pem")).expect("public");
    bundle.extend(std::fs::read(common::testdata("rsa.pem")).expect("private"));
    let material = Pem::from_bytes(bundle)
        .load(Algorithm::PS256)
        .expect("bundle");
    assert!(material.can_sign());
}

#[test]
fn test_hmac_pem_secret_is_shared_by_all_widths() {
    let claims = Claims::builder().subject("hmac").build();
    for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
        let token = common::signer(alg).encode(&claims).expect("encode");
        let decoded: Claims = common::verifier(alg).decode_into(&token).expect("decode");
        assert_eq!(decoded, claims);
    }
}

#[test]
fn test_wrong_curve_is_key_error() {
    for (alg, file) in [
        (Algorithm::ES256, "es384.pem"),
        (Algorithm::ES384, "es512.pub.pem"),
        (Algorithm::ES512, "es256.pem"),
    ] {
        let result = alg.new(pem(file));
        assert!(matches!(result, Err(JwtError::Key(_))), "{alg} with {file}");
    }
}

#[test]
fn test_wrong_key_class_is_unsupported() {
    let rsa = || pem("rsa.pem").load(Algorithm::RS256).expect("rsa");
    let ec = || pem("es256.pem").load(Algorithm::ES256).expect("ec");

    let cases: [(Algorithm, KeyMaterial); 4] = [
        (Algorithm::HS256, rsa()),
        (Algorithm::ES256, rsa()),
        (Algorithm::RS256, ec()),
        (Algorithm::PS256, KeyMaterial::secret("secret")),
    ];
    for (alg, material) in cases {
        let kind = material.kind();
        let result = alg.new(material);
        assert!(
            matches!(result, Err(JwtError::UnsupportedAlgorithm(_))),
            "{alg} with {kind}"
        );
    }
}

#[test]
fn test_asymmetric_pem_is_not_an_hmac_secret() {
    // A public key file handed to an HMAC algorithm must not become the
    // shared secret, or anyone holding the public key could mint tokens.
    for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
        for file in ["rsa.pub.pem", "rsa.pem", "rsa.pkcs1.pem", "es256.pem", "es384.pub.pem"] {
            let result = alg.new(pem(file));
            assert!(
                matches!(result, Err(JwtError::UnsupportedAlgorithm(_))),
                "{alg} with {file}"
            );
        }
    }
}

#[test]
fn test_pem_of_another_class_is_unsupported() {
    for (alg, file) in [
        (Algorithm::ES256, "rsa.pem"),
        (Algorithm::ES384, "rsa.pkcs1.pem"),
        (Algorithm::ES512, "rsa.pub.pem"),
        (Algorithm::RS256, "es256.pem"),
        (Algorithm::PS384, "es384.pub.pem"),
        (Algorithm::RS512, "hmac.pem"),
    ] {
        let result = alg.new(pem(file));
        assert!(
            matches!(result, Err(JwtError::UnsupportedAlgorithm(_))),
            "{alg} with {file}"
        );
    }
}

#[test]
fn test_short_rsa_modulus_is_rejected() {
    for alg in [Algorithm::RS256, Algorithm::PS512] {
        assert!(matches!(alg.new(pem("rsa1024.pem")), Err(JwtError::Key(_))));
    }
}

#[test]
fn test_key_file_problems() {
    assert!(matches!(
        Algorithm::RS256.new(pem("does-not-exist.pem")),
        Err(JwtError::Io(msg)) if msg.contains("does-not-exist.pem")
    ));
    assert!(matches!(
        Algorithm::RS256.new(Pem::from_bytes("-----BEGIN CERTIFICATE-----\nQUJD\n-----END CERTIFICATE-----\n")),
        Err(JwtError::Key(_))
    ));
    assert!(matches!(
        Algorithm::HS256.new(Pem::from_bytes("no armor here")),
        Err(JwtError::Key(_))
    ));
    assert!(matches!(Algorithm::HS512.new(""), Err(JwtError::Key(_))));
}
