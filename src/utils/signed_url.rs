use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// HMAC-SHA256 signed claims: which file, and until when.
#[derive(Debug, Serialize, Deserialize)]
pub struct MediaClaims {
    pub sub: String,
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: u64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn sign_until(filename: &str, key: &str, exp: u64) -> Result<SignedToken, AppError> {
    let claims = MediaClaims {
        sub: filename.to_string(),
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign media url: {e}")))?;

    Ok(SignedToken {
        token,
        expires_at: exp,
    })
}

pub fn sign(filename: &str, key: &str, ttl: u64) -> Result<SignedToken, AppError> {
    sign_until(filename, key, now() + ttl)
}

/// Accepts the token only for `filename`, with a valid signature, before expiry.
pub fn verify(filename: &str, token: &str, key: &str) -> Result<MediaClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<MediaClaims>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidSignature)?;

    if claims.sub != filename {
        return Err(AppError::InvalidSignature);
    }
    Ok(claims)
}

pub fn public_url(base_url: &str, filename: &str, token: &str) -> String {
    format!(
        "{}/media/{filename}?token={token}",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "media-key";

    #[test]
    fn signed_token_verifies_for_its_file() {
        let signed = sign("report.png", KEY, 60).unwrap();
        let claims = verify("report.png", &signed.token, KEY).unwrap();
        assert_eq!(claims.sub, "report.png");
        assert_eq!(claims.exp, signed.expires_at);
    }

    #[test]
    fn token_is_bound_to_file_and_key() {
        let signed = sign("report.png", KEY, 60).unwrap();
        assert!(matches!(
            verify("other.png", &signed.token, KEY),
            Err(AppError::InvalidSignature)
        ));
        assert!(matches!(
            verify("report.png", &signed.token, "wrong-key"),
            Err(AppError::InvalidSignature)
        ));
        assert!(matches!(
            verify("report.png", "garbage", KEY),
            Err(AppError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let signed = sign_until("report.png", KEY, now() - 5).unwrap();
        assert!(matches!(
            verify("report.png", &signed.token, KEY),
            Err(AppError::InvalidSignature)
        ));
    }

    #[test]
    fn public_url_shape() {
        assert_eq!(
            public_url("https://host/app/", "a.png", "t.o.k"),
            "https://host/app/media/a.png?token=t.o.k"
        );
    }
}
