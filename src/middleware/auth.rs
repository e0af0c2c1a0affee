use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Access, Claims, Role, TokenService};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, decoded from the bearer token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Resolve the caller from the `Authorization` header.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers)?;
    let claims = tokens.verify(token)?;
    Ok(AuthUser::from(claims))
}

/// Decide whether `user` may use a route requiring `access`.
pub fn authorize(user: Option<&AuthUser>, access: Access) -> Result<&AuthUser, ApiError> {
    let user = user.ok_or_else(|| ApiError::unauthorized("Authentication required"))?;
    if user.role.satisfies(access) {
        Ok(user)
    } else {
        tracing::debug!("User {} ({}) denied {:?} route", user.id, user.role, access);
        Err(ApiError::forbidden("Insufficient permissions"))
    }
}

/// Token from `Authorization: Bearer <token>`. A missing header, any other
/// scheme spelling or an empty token all count as no credentials.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let missing = || ApiError::unauthorized("Authentication required");
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(missing)?
        .to_str()
        .map_err(|_| missing())?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(missing()),
    }
}

/// Verifies the bearer token and stores the caller in request extensions
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(request.headers(), &state.tokens)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn require_manager(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(request.extensions().get::<AuthUser>(), Access::Manager)?;
    Ok(next.run(request).await)
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    authorize(request.extensions().get::<AuthUser>(), Access::Admin)?;
    Ok(next.run(request).await)
}
