//! Fixed tokens with known signatures

use hex_literal::hex;
use serde_json::json;
use signed_jwt::{encoding, Algorithm, Claims, Header, JwtError, NumericDate, Signer, Token};

const SECRET_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                            eyJpc3MiOiJ1c2VyQGV4YW1wbGUuY29tIn0.\
                            JbhJfM7A0OktGmda08K9xMuM8gwtvGlayvQBwKuOcwY";

#[test]
fn test_hs256_secret_scenario() {
    let signer = Algorithm::HS256.new("secret").expect("signer");
    let claims = Claims::builder().issuer("user@example.com").build();

    let token = signer.encode(&claims).expect("encode");
    assert_eq!(token, SECRET_TOKEN);

    let decoded: Token = signer.decode_into(&token).expect("decode");
    assert_eq!(decoded.payload.iss.as_deref(), Some("user@example.com"));
    assert_eq!(
        decoded.signature,
        hex!("25b8497ccec0d0e92d1a675ad3c2bdc4cb8cf20c2dbc695acaf401c0ab8e7306")
    );

    let mut target: Token = Token::default();
    let other = Algorithm::HS256.new("not the secret").expect("other signer");
    assert_eq!(
        other.decode(&token, &mut target),
        Err(JwtError::InvalidSignature)
    );
    assert!(target.signature.is_empty());
}

#[test]
fn test_hs256_raw_sign_and_verify() {
    let signer = Algorithm::HS256.new(b"secret").expect("signer");
    let (signing_input, signature) = SECRET_TOKEN.rsplit_once('.').expect("segments");

    let raw = signer.sign(signing_input.as_bytes()).expect("sign");
    assert_eq!(encoding::encode(&raw), signature);

    let verified = signer
        .verify(signing_input.as_bytes(), signature.as_bytes())
        .expect("verify");
    assert_eq!(verified, raw);
    assert_eq!(
        signer.verify(b"other input", signature.as_bytes()),
        Err(JwtError::InvalidSignature)
    );
}

/// RFC 7515 Appendix A.1. The header lists `typ` before `alg` and both
/// segments contain CRLF whitespace, so only the raw segments are signed.
#[test]
fn test_rfc7515_a1_example() {
    let key = encoding::decode(
        "AyM1SysPpbyDfgZld3umj1qzKObwVMkoqQ-EstJQLr_T-1qS0gZH75aKtMN3Yj0iPS4hcgUuTwjAzZr1Z9CAow",
    )
    .expect("key");
    let token = "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9.\
                 eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ.\
                 dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";

    let signer = Algorithm::HS256.new(key).expect("signer");
    let decoded: Token = signer.decode_into(token).expect("decode");

    assert_eq!(decoded.header, Header::new(Algorithm::HS256));
    assert_eq!(decoded.payload.iss.as_deref(), Some("joe"));
    assert_eq!(decoded.payload.exp, Some(NumericDate(1_300_819_380)));
    assert_eq!(
        decoded.payload.get("http://example.com/is_root"),
        Some(&json!(true))
    );
    assert_eq!(
        decoded.signature,
        hex!("7418dfb49799e0254ffa607dd8adbbba16d4254d69d6bff05b58055853848d79")
    );

    // Re-encoding produces compact JSON, so the token differs but still
    // verifies.
    let reencoded = signer.encode(&decoded).expect("encode");
    assert_ne!(reencoded, token);
    let again: Token = signer.decode_into(&reencoded).expect("decode again");
    assert_eq!(again.payload, decoded.payload);
}
