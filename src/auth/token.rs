//! HS256 JSON Web Tokens.
//!
//! Only the subset needed to authenticate callers is supported: the header
//! must declare `HS256`, the payload must carry the numeric user `id`, and an
//! `exp` claim is enforced when present.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac, digest::InvalidLength};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[cfg(test)]
const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user ID
    pub id: i64,
    /// Expiry as seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Deserialize)]
struct Header {
    alg: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("unsupported signing algorithm: {0}")]
    Algorithm(String),

    #[error("signature does not match")]
    Signature,

    #[error("token expired at {0}")]
    Expired(i64),
}

#[derive(Clone)]
pub struct TokenVerifier {
    mac: HmacSha256,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret)?,
        })
    }

    /// Signs `claims` with the shared secret.
    #[cfg(test)]
    pub fn issue(&self, claims: &Claims) -> Result<String, serde_json::Error> {
        let header = URL_SAFE_NO_PAD.encode(HEADER);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{header}.{payload}");

        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let decoded_header: Header = decode_segment(header)?;
        if decoded_header.alg != "HS256" {
            return Err(TokenError::Algorithm(decoded_header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::Signature)?;

        let claims: Claims = decode_segment(payload)?;
        if let Some(exp) = claims.exp {
            if exp <= Utc::now().timestamp() {
                return Err(TokenError::Expired(exp));
            }
        }

        Ok(claims)
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}
