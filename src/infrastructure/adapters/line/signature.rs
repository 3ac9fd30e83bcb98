//! `X-Line-Signature` verification

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::application::errors::BotError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Check that `signature` is base64(HMAC-SHA256(secret, body)).
/// The comparison is constant-time.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> Result<(), BotError> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|e| BotError::Signature(format!("not base64: {}", e)))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BotError::Internal(e.to_string()))?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| BotError::Signature("mismatch".to_string()))
}

/// Compute the signature LINE would send for `body`
pub fn sign(secret: &str, body: &[u8]) -> Result<String, BotError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BotError::Internal(e.to_string()))?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "channel-secret";
    const BODY: &[u8] = br#"{"destination":"U0","events":[]}"#;

    #[test]
    fn test_valid_signature() {
        let signature = sign(SECRET, BODY).unwrap();
        assert!(verify_signature(SECRET, BODY, &signature).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signature = sign("other-secret", BODY).unwrap();
        let err = verify_signature(SECRET, BODY, &signature).unwrap_err();
        assert!(matches!(err, BotError::Signature(_)));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let signature = sign(SECRET, BODY).unwrap();
        assert!(verify_signature(SECRET, b"{}", &signature).is_err());
    }

    #[test]
    fn test_malformed_signature_rejected() {
        let err = verify_signature(SECRET, BODY, "!!not-base64!!").unwrap_err();
        assert!(matches!(err, BotError::Signature(_)));
        assert!(verify_signature(SECRET, BODY, "").is_err());
    }
}
