use crate::{
    auth::auth::AuthUser, error::AppError, model::student::Student, store::students::insert_student,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::AnyPool;
use tracing::{error, info};

/// Register Student
#[utoipa::path(
    post,
    path = "/register_student",
    request_body = Student,
    responses(
        (status = 200, description = "Student registered", body = Object, example = json!({
            "message": "Student registered successfully"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 500, description = "Failed to register student")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
pub async fn register_student(
    auth: AuthUser,
    pool: web::Data<AnyPool>,
    payload: web::Json<Student>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    insert_student(pool.get_ref(), &payload).await.map_err(|e| {
        error!(error = %e, student_id = %payload.id, "Failed to register student");
        AppError::from(e)
    })?;

    info!(student_id = %payload.id, by = %auth.username, "Student registered");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Student registered successfully"
    })))
}
