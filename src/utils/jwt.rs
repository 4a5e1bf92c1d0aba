use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id; absent on tenant-only tokens (e.g. storefront kiosks).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Tenant claim; defaulted to 0 on decode so its absence is reported
    /// as an auth error rather than a malformed-token error.
    #[serde(default)]
    pub business_id: i64,
    pub exp: i64,
    pub iat: i64,
}

/// The identity attached to a request once the token guard has accepted it.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub business_id: i64,
    pub user_id: Option<i64>,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in: access_expires_in,
        }
    }

    pub fn generate_access_token(&self, business_id: i64, user_id: Option<i64>) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expires_in);

        let claims = Claims {
            sub: user_id.map(|id| id.to_string()),
            business_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<AuthContext> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)?;

        if claims.business_id <= 0 {
            return Err(AppError::AuthError("Token is missing a business claim".to_string()));
        }

        Ok(AuthContext {
            business_id: claims.business_id,
            user_id: claims.sub.as_deref().and_then(|s| s.parse().ok()),
        })
    }

    pub fn get_access_token_expires_in(&self) -> i64 {
        self.access_token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 3600)
    }

    #[test]
    fn test_round_trip_claims() {
        let svc = service();
        let token = svc.generate_access_token(7, Some(42)).unwrap();
        let ctx = svc.verify_access_token(&token).unwrap();
        assert_eq!(ctx.business_id, 7);
        assert_eq!(ctx.user_id, Some(42));
    }

    #[test]
    fn test_tenant_only_token() {
        let svc = service();
        let token = svc.generate_access_token(3, None).unwrap();
        let ctx = svc.verify_access_token(&token).unwrap();
        assert_eq!(ctx.business_id, 3);
        assert_eq!(ctx.user_id, None);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = service().generate_access_token(7, Some(1)).unwrap();
        let other = JwtService::new("another-secret", 3600);
        assert!(other.verify_access_token(&token).is_err());
    }
}
