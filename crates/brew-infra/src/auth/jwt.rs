//! JWT claims decoder.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use brew_core::ports::{AuthError, TokenClaims, TokenDecoder};

/// Claims the backend puts in its session tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Reads the payload segment of a JWT without checking its signature or
/// any registered claim; expiry is judged by the caller.
pub struct JwtTokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenDecoder {
    pub fn new() -> Self {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
        }
    }
}

impl Default for JwtTokenDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDecoder for JwtTokenDecoder {
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id: data.claims.user_id,
            email: data.claims.email,
            name: data.claims.name,
            exp: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn token(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-only-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_reads_claims() {
        let decoder = JwtTokenDecoder::new();
        let claims = decoder
            .decode(&token(json!({
                "user_id": "u1",
                "email": "ana@example.com",
                "name": "Ana",
                "exp": 1_900_000_000_i64
            })))
            .unwrap();

        assert_eq!(claims.user_id.as_deref(), Some("u1"));
        assert_eq!(claims.name.as_deref(), Some("Ana"));
        assert_eq!(claims.exp, Some(1_900_000_000));
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let decoder = JwtTokenDecoder::new();
        let claims = decoder.decode(&token(json!({"exp": 1}))).unwrap();
        assert_eq!(claims.exp, Some(1));
    }

    #[test]
    fn test_decode_without_exp() {
        let decoder = JwtTokenDecoder::new();
        let claims = decoder.decode(&token(json!({"email": "x@y.z"}))).unwrap();
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_decode_malformed_token() {
        let decoder = JwtTokenDecoder::new();
        assert!(matches!(
            decoder.decode("not-a-token"),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(decoder.decode("a.b.c").is_err());
    }
}
