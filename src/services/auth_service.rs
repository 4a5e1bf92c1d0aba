use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::JwtService;

#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DbPool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, business_id, username, password_hash, display_name, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(&request.username)
        .fetch_optional(&self.pool)
        .await?;

        let user = user
            .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

        if !crate::utils::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError("Invalid username or password".to_string()));
        }

        let access_token = self
            .jwt_service
            .generate_access_token(user.business_id, Some(user.id))?;

        log::info!("User {} logged in (business {})", user.username, user.business_id);

        Ok(AuthResponse {
            user: user.into(),
            access_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
