//! Session Token Signing
//!
//! Cookie tokens are `{session_id}.{signature}` where the signature is
//! HMAC-SHA256 over the session id, base64url without padding. A token
//! with a bad signature is rejected before any database lookup.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Sign a session id into a cookie token
pub fn sign_session_token(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id_str = session_id.to_string();
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{session_id_str}.{signature}")
}

/// Verify a cookie token and extract the session id
pub fn parse_session_token(secret: &[u8; 32], token: &str) -> Option<Uuid> {
    let (session_id_str, signature_b64) = token.split_once('.')?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());
    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac.verify_slice(&signature).ok()?;

    session_id_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn signed_tokens_round_trip() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(&SECRET, session_id);
        assert_eq!(parse_session_token(&SECRET, &token), Some(session_id));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(&SECRET, session_id);

        let other_id = Uuid::new_v4();
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{other_id}.{signature}");
        assert_eq!(parse_session_token(&SECRET, &forged), None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(&SECRET, session_id);
        assert_eq!(parse_session_token(&[8u8; 32], &token), None);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(parse_session_token(&SECRET, "no-dot"), None);
        assert_eq!(parse_session_token(&SECRET, "not-a-uuid.sig"), None);
        assert_eq!(parse_session_token(&SECRET, ""), None);
    }
}
