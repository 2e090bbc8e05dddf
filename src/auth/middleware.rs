use crate::auth::auth::AuthUser;
use crate::auth::jwt::validate_token;
use crate::config::Config;
use crate::error::AppError;
use crate::store::users::find_user;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use sqlx::AnyPool;
use tracing::debug;

/// Resolves the bearer token to a stored user and attaches an `AuthUser`.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    match resolve_user(&req).await {
        Ok(auth_user) => {
            req.extensions_mut().insert(auth_user);
            next.call(req).await
        }
        Err(e) => Ok(req.into_response(e.error_response())),
    }
}

async fn resolve_user(req: &ServiceRequest) -> Result<AuthUser, AppError> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| AppError::Internal("App config missing".into()))?;
    let pool = req
        .app_data::<Data<AnyPool>>()
        .ok_or_else(|| AppError::Internal("Database pool missing".into()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthenticated)?;

    let username = validate_token(token, &config.jwt_secret)?;

    // the account must still exist
    let user = find_user(pool.get_ref(), &username)
        .await?
        .ok_or_else(|| {
            debug!(%username, "Token subject no longer exists");
            AppError::Unauthenticated
        })?;

    Ok(AuthUser {
        roles: config.roles.roles_for(&user.username),
        username: user.username,
    })
}
