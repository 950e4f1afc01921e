//! JWT implementation of the token codec.

use std::sync::Arc;

use chrono::DateTime;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::ports::{Claims, Clock, TokenCodec, TokenError, TokenKind};

/// Wire shape of the signed claims set.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    typ: TokenKind,
    iat: i64,
    exp: i64,
    jti: Uuid,
}

/// HS256 token codec keyed by a process-wide secret.
///
/// The secret arrives at construction; nothing here reads ambient state.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let wire = WireClaims {
            sub: claims.sub.clone(),
            typ: claims.kind,
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
            jti: claims.jti,
        };

        encode(&Header::default(), &wire, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        // Expiry is checked against the injected clock below; the
        // library check would read the system clock instead.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<WireClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            }
        })?;

        // Signature is good from here on; only now are claims trusted.
        let wire = data.claims;
        let expires_at = DateTime::from_timestamp(wire.exp, 0).ok_or(TokenError::Malformed)?;
        let issued_at = DateTime::from_timestamp(wire.iat, 0).ok_or(TokenError::Malformed)?;

        if expires_at <= self.clock.now() {
            return Err(TokenError::Expired);
        }

        if wire.typ != expected {
            return Err(TokenError::WrongType);
        }

        Ok(Claims {
            sub: wire.sub,
            kind: wire.typ,
            issued_at,
            expires_at,
            jti: wire.jti,
        })
    }
}
