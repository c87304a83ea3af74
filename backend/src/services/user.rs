//! Account registration, login and token refresh

use crate::auth::{JwtService, PasswordService};
use crate::db::unique_violation;
use crate::error::ApiError;
use crate::repositories::{NewUser, UserRepository};
use aquatrack_shared::types::{AccountResponse, AuthTokens, RegisterRequest};
use aquatrack_shared::validation::{
    normalize_phone_number, validate_email, validate_password, validate_phone_number,
    validate_username, ValidationError,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    /// Register an account with an empty profile
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthTokens, ApiError> {
        let email = req.email.trim().to_lowercase();
        let username = req.username.trim().to_string();

        validate_email(&email).map_err(|e| ValidationError::new("email", &e))?;
        validate_password(&req.password).map_err(|e| ValidationError::new("password", &e))?;
        validate_username(&username).map_err(|e| ValidationError::new("username", &e))?;
        let phone_number = match req.phone_number.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => {
                validate_phone_number(phone).map_err(|e| ValidationError::new("phone_number", &e))?;
                Some(normalize_phone_number(phone))
            }
            _ => None,
        };

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        if UserRepository::username_exists(pool, &username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        let password_hash = PasswordService::hash(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            NewUser {
                email: &email,
                password_hash: &password_hash,
                username: &username,
                phone_number: phone_number.as_deref(),
            },
        )
        .await
        .map_err(|e| match unique_violation(&e) {
            // Lost a race with a concurrent registration
            Some(_) => ApiError::Conflict("Email or username already registered".to_string()),
            None => ApiError::Internal(e),
        })?;

        info!(user_id = %user.id, "User registered");

        jwt.issue_tokens(user.id).map_err(ApiError::Internal)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify(password.to_string(), user.password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        jwt.issue_tokens(user.id).map_err(ApiError::Internal)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        UserRepository::find_by_id(pool, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        jwt.issue_tokens(claims.sub).map_err(ApiError::Internal)
    }

    pub async fn get_account(pool: &PgPool, user_id: Uuid) -> Result<AccountResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AccountResponse {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            phone_number: user.phone_number,
            created_at: user.created_at,
        })
    }
}
