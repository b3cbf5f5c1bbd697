//! HMAC-signed, time-limited blob URLs.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use soundvault_core::error::AppError;
use soundvault_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Signs blob read URLs with an expiry and an HMAC-SHA256 signature.
///
/// The signed message is `"{blob_name}:{expires}"`, so a signature is
/// valid for exactly one blob and one expiry instant.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    base_url: String,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UrlSigner {
    /// Create a signer from the URL secret and public base URL.
    pub fn new(secret: &str, base_url: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Produce a signed read URL for a blob, valid for `ttl`.
    pub fn sign(&self, blob_name: &str, ttl: Duration) -> AppResult<String> {
        let expires = Utc::now().timestamp() + ttl.as_secs() as i64;
        let signature = self.signature(blob_name, expires)?;
        Ok(format!(
            "{}/{}?expires={}&signature={}",
            self.base_url, blob_name, expires, signature
        ))
    }

    /// Check a signature produced by [`sign`](Self::sign).
    ///
    /// Rejects expired URLs and signature mismatches alike with an
    /// authentication error.
    pub fn verify(&self, blob_name: &str, expires: i64, signature: &str) -> AppResult<()> {
        if Utc::now().timestamp() >= expires {
            return Err(AppError::unauthorized("Signed URL has expired"));
        }
        let given = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AppError::unauthorized("Invalid URL signature"))?;
        self.mac(blob_name, expires)?
            .verify_slice(&given)
            .map_err(|_| AppError::unauthorized("Invalid URL signature"))
    }

    fn signature(&self, blob_name: &str, expires: i64) -> AppResult<String> {
        let mac = self.mac(blob_name, expires)?;
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    fn mac(&self, blob_name: &str, expires: i64) -> AppResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::internal(format!("Invalid URL signing key: {e}")))?;
        mac.update(blob_name.as_bytes());
        mac.update(b":");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundvault_core::error::ErrorKind;

    #[test]
    fn test_sign_produces_verifiable_url() {
        let signer = UrlSigner::new("test-secret", "http://localhost:8080/blobs/");
        let url = signer.sign("abc.mp3", Duration::from_secs(600)).unwrap();
        assert!(url.starts_with("http://localhost:8080/blobs/abc.mp3?expires="));

        let query = url.split_once('?').unwrap().1;
        let mut expires = 0i64;
        let mut signature = String::new();
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("expires", v)) => expires = v.parse().unwrap(),
                Some(("signature", v)) => signature = v.to_string(),
                _ => {}
            }
        }
        signer.verify("abc.mp3", expires, &signature).unwrap();
    }

    #[test]
    fn test_signature_bound_to_blob_name() {
        let signer = UrlSigner::new("test-secret", "http://localhost:8080/blobs");
        let expires = Utc::now().timestamp() + 600;
        let signature = signer.signature("abc.mp3", expires).unwrap();

        let err = signer.verify("other.mp3", expires, &signature).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_url_rejected() {
        let signer = UrlSigner::new("test-secret", "http://localhost:8080/blobs");
        let expires = Utc::now().timestamp() - 10;
        let signature = signer.signature("abc.mp3", expires).unwrap();

        let err = signer.verify("abc.mp3", expires, &signature).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_mangled_signature_rejected() {
        let signer = UrlSigner::new("test-secret", "http://localhost:8080/blobs");
        let expires = Utc::now().timestamp() + 600;
        let mut signature = signer.signature("abc.mp3", expires).unwrap();

        // Flip the last character of the encoded signature.
        let flipped = if signature.ends_with('A') { 'B' } else { 'A' };
        signature.pop();
        signature.push(flipped);
        let err = signer.verify("abc.mp3", expires, &signature).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        // Not base64 at all.
        let err = signer.verify("abc.mp3", expires, "!!not-base64!!").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_different_secret_fails_verification() {
        let a = UrlSigner::new("secret-a", "http://localhost:8080/blobs");
        let b = UrlSigner::new("secret-b", "http://localhost:8080/blobs");
        let expires = Utc::now().timestamp() + 600;
        let signature = a.signature("abc.mp3", expires).unwrap();

        assert!(b.verify("abc.mp3", expires, &signature).is_err());
    }
}
