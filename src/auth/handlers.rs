use crate::{
    auth::{auth::authenticate, jwt::issue_token},
    config::Config,
    error::AppError,
    models::{LoginForm, TokenResponse},
};
use actix_web::{HttpResponse, web};
use sqlx::AnyPool;
use tracing::{debug, error, info, instrument};

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Incorrect username or password", body = Object, example = json!({
            "error": "Incorrect username or password"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, form),
    fields(username = %form.username)
)]
pub async fn login(
    form: web::Form<LoginForm>,
    pool: web::Data<AnyPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    let Some(user) = authenticate(pool.get_ref(), &form.username, &form.password).await? else {
        info!("Login rejected");
        return Ok(HttpResponse::Unauthorized()
            .insert_header(("WWW-Authenticate", "Bearer"))
            .json(serde_json::json!({ "error": "Incorrect username or password" })));
    };

    debug!("Generating access token");

    let access_token = issue_token(
        &user.username,
        Some(config.access_token_ttl),
        &config.jwt_secret,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign token");
        AppError::Internal("Failed to sign token".into())
    })?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
