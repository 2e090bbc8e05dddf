use crate::{
    auth::auth::AuthUser,
    error::AppError,
    model::attendance::{AttendanceRecord, AttendanceStatus, MarkingMethod},
    recognition::{FaceRecognizer, first_match},
    store::{attendance::append, students::list_all},
};
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde_json::json;
use sqlx::AnyPool;
use tracing::{debug, info, warn};

/// Mark attendance from a photo
///
/// The first face found in the image is compared against every registered
/// student in turn; the first student that matches is marked present.
#[utoipa::path(
    post,
    path = "/mark_attendance",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Attendance marked", body = Object, example = json!({
            "message": "Attendance marked for student Jane Doe",
            "student_id": "S-1001"
        })),
        (status = 400, description = "Undecodable image or no face detected", body = Object, example = json!({
            "error": "No face detected in the image"
        })),
        (status = 404, description = "No registered student matches", body = Object, example = json!({
            "error": "Student not recognized"
        })),
        (status = 500, description = "Recognition or storage failure")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    body: web::Bytes,
    pool: web::Data<AnyPool>,
    recognizer: web::Data<dyn FaceRecognizer>,
) -> Result<HttpResponse, AppError> {
    let image = image::load_from_memory(&body).map_err(|e| {
        debug!(error = %e, bytes = body.len(), "Image decode failed");
        AppError::BadRequest("Invalid image data".into())
    })?;

    let worker = recognizer.clone();
    let encodings = web::block(move || worker.detect_and_encode(&image))
        .await
        .map_err(|e| AppError::Internal(format!("recognition task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("face recognition failed: {e:#}")))?;

    debug!(faces = encodings.len(), "Faces detected");

    let Some(candidate) = encodings.into_iter().next() else {
        return Err(AppError::BadRequest("No face detected in the image".into()));
    };

    let students = list_all(pool.get_ref()).await?;

    let Some(student) = first_match(recognizer.get_ref(), &candidate, &students) else {
        warn!(registered = students.len(), "Face did not match any student");
        return Err(AppError::NotFound("Student not recognized".into()));
    };

    let now = Local::now().naive_local();
    let record = AttendanceRecord {
        date: now.date(),
        student_id: student.id.clone(),
        status: AttendanceStatus::Present.to_string(),
        timestamp: now,
        method: MarkingMethod::FacialRecognition.to_string(),
    };

    append(pool.get_ref(), std::slice::from_ref(&record)).await?;

    info!(student_id = %student.id, "Attendance marked by face");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Attendance marked for student {}", student.name),
        "student_id": student.id
    })))
}

/// Manual attendance
///
/// Records are stored exactly as submitted; resubmitting the same batch
/// stores it again.
#[utoipa::path(
    post,
    path = "/manual_attendance",
    request_body = Vec<AttendanceRecord>,
    responses(
        (status = 200, description = "Records stored", body = Object, example = json!({
            "message": "Attendance marked for 2 students",
            "inserted": 2
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 500, description = "Failed to mark attendance")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn manual_attendance(
    auth: AuthUser,
    pool: web::Data<AnyPool>,
    records: web::Json<Vec<AttendanceRecord>>,
) -> Result<HttpResponse, AppError> {
    auth.require_teacher()?;

    let inserted = append(pool.get_ref(), &records).await?;

    info!(inserted, by = %auth.username, "Manual attendance stored");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Attendance marked for {inserted} students"),
        "inserted": inserted
    })))
}
