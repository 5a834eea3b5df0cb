// src/gateways/identity.rs

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{error::AppError, state::AppState, utils::jwt::verify_jwt};

/// The resolved caller identity. The engine trusts this answer completely
/// and performs no independent verification.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub role: String,
}

impl AuthUser {
    /// Instructors and administrators may manage quizzes.
    pub fn is_instructor(&self) -> bool {
        self.role == "instructor" || self.role == "admin"
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Resolves an opaque credential to a user identity and role.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn resolve(&self, credential: &str) -> Result<AuthUser, AppError>;
}

/// Extractor: pulls the bearer token from the Authorization header and
/// resolves it through the injected identity gateway. Handlers that take an
/// `AuthUser` parameter are thereby authenticated; gateway failures surface
/// as 401 responses before the handler runs.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = match auth_header {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            _ => return Err(AppError::AuthError("Missing bearer token".to_string())),
        };

        state.identity.resolve(token).await
    }
}

/// Default gateway: the credential is a signed JWT carrying id and role.
pub struct JwtIdentityGateway {
    secret: String,
}

impl JwtIdentityGateway {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

#[async_trait]
impl IdentityGateway for JwtIdentityGateway {
    async fn resolve(&self, credential: &str) -> Result<AuthUser, AppError> {
        let claims = verify_jwt(credential, &self.secret)?;

        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        Ok(AuthUser {
            id,
            role: claims.role,
        })
    }
}
