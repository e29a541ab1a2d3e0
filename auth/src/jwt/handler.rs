use std::fmt;
use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use super::secret::SecretProvider;
use super::secret::StaticSecret;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Tokens are signed with HS256 using whatever
/// secret the [`SecretProvider`] returns at the time of the call; keys are
/// derived per operation and never cached.
#[derive(Clone)]
pub struct JwtHandler {
    secrets: Arc<dyn SecretProvider>,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a handler backed by a secret provider.
    ///
    /// # Arguments
    /// * `secrets` - Provider consulted on every encode and decode
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - An empty secret is treated as no secret at all
    pub fn new(secrets: impl SecretProvider + 'static) -> Self {
        Self {
            secrets: Arc::new(secrets),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a handler with a fixed secret.
    pub fn with_secret(secret: &[u8]) -> Self {
        Self::new(StaticSecret::new(secret))
    }

    fn current_secret(&self) -> Result<Vec<u8>, JwtError> {
        match self.secrets.secret() {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(JwtError::MissingSecret),
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// Compact JWT string, safe for use in headers
    ///
    /// # Errors
    /// * `MissingSecret` - Provider has no (or an empty) secret
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let secret = self.current_secret()?;
        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(&secret))
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Check the signature and structure of a token and return its claims.
    ///
    /// This says nothing about whether the token is still the one on record for
    /// its subject.
    ///
    /// # Errors
    /// * `MissingSecret` - Provider has no (or an empty) secret
    /// * `InvalidToken` - Signature does not match or the algorithm is wrong
    /// * `DecodingFailed` - Token is malformed or its claims do not deserialize
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let secret = self.current_secret()?;

        let mut validation = Validation::new(self.algorithm);
        // Access tokens carry no expiry
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let token_data = decode::<T>(token, &DecodingKey::from_secret(&secret), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidToken(e.to_string())
                }
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::jwt::Claims;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::with_secret(b"my_secret_key_at_least_32_bytes_long!");
        let claims = Claims::for_user("peter");

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::with_secret(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode::<Claims>("RandomStringWhichIsNoRealJWT");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::with_secret(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::with_secret(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&Claims::for_user("anna"))
            .expect("Failed to encode token");

        let result = handler2.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_foreign_claims_shape() {
        let handler = JwtHandler::with_secret(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&TestClaims {
                sub: "user123".to_string(),
                role: "admin".to_string(),
            })
            .expect("Failed to encode token");

        let result = handler.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_missing_secret() {
        let handler = JwtHandler::new(StaticSecret::none());

        assert!(matches!(
            handler.encode(&Claims::for_user("anna")),
            Err(JwtError::MissingSecret)
        ));
        assert!(matches!(
            handler.decode::<Claims>("a.b.c"),
            Err(JwtError::MissingSecret)
        ));
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let handler = JwtHandler::with_secret(b"");

        assert!(matches!(
            handler.encode(&Claims::for_user("anna")),
            Err(JwtError::MissingSecret)
        ));
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let handler = JwtHandler::with_secret(b"super_secret_example_text");
        assert!(!format!("{:?}", handler).contains("super_secret_example_text"));
    }
}
