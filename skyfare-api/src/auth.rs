use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use skyfare_store::{User, UserRole};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::password;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    email: String,
    role: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/admin/signup", post(admin_signup))
        .route("/auth/admin/login", post(admin_login))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    register(&state, req, UserRole::Customer).await
}

async fn admin_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    register(&state, req, UserRole::Admin).await
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    authenticate(&state, req, UserRole::Customer).await
}

async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    authenticate(&state, req, UserRole::Admin).await
}

async fn register(
    state: &AppState,
    req: SignupRequest,
    role: UserRole,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::ValidationError("Invalid email address".to_string()));
    }
    let min_len = state.business_rules.min_password_length;
    if req.password.len() < min_len {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {} characters long",
            min_len
        )));
    }

    let password_hash = password::hash_password(&req.password)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?;

    let user = User::new(email.clone(), password_hash, role);
    let token = issue_token(state, &user)?;
    state.users.insert(user).await?;

    tracing::info!(%email, role = role.as_str(), "account created");

    Ok(Json(AuthResponse {
        token,
        email,
        role: role.as_str().to_string(),
    }))
}

async fn authenticate(
    state: &AppState,
    req: LoginRequest,
    role: UserRole,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();
    let user = state
        .users
        .find_by_email(&email)
        .await
        .ok_or_else(|| AppError::AuthenticationError("Invalid email or password".to_string()))?;

    if user.role != role {
        return Err(AppError::AuthorizationError(
            "Account does not have the required role".to_string(),
        ));
    }

    let verified = password::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {}", e)))?;
    if !verified {
        return Err(AppError::AuthenticationError("Invalid email or password".to_string()));
    }

    let token = issue_token(state, &user)?;
    Ok(Json(AuthResponse {
        token,
        email: user.email,
        role: user.role.as_str().to_string(),
    }))
}

pub fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn test_token_round_trip() {
        let secret = "test-secret";
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "asha@example.com".to_string(),
            role: "CUSTOMER".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, claims.sub);
        assert_eq!(decoded.claims.role, "CUSTOMER");

        // A different secret must not validate.
        let wrong = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(wrong.is_err());
    }
}
