use crate::{
    auth::auth::AuthUser,
    error::AppError,
    model::attendance::{AttendanceRecord, AttendanceStatus, DATE_FORMAT},
    models::{AttendanceReport, ReportQuery},
    store::attendance::{AttendanceFilter, query},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use sqlx::AnyPool;
use tracing::debug;

/// Attendance report
#[utoipa::path(
    get,
    path = "/attendance_report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Counts by status", body = AttendanceReport),
        (status = 400, description = "Invalid date format", body = Object, example = json!({
            "error": "Invalid date format. Use YYYY-MM-DD"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is neither admin nor teacher")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn attendance_report(
    auth: AuthUser,
    pool: web::Data<AnyPool>,
    params: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin_or_teacher()?;

    let (start, end) = match (parse_date(&params.start_date), parse_date(&params.end_date)) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AppError::BadRequest(
                "Invalid date format. Use YYYY-MM-DD".into(),
            ));
        }
    };

    // blank filters from the dashboard mean "no filter"
    let filter = AttendanceFilter {
        class_name: params.class_name.clone().filter(|s| !s.is_empty()),
        student_id: params.student_id.clone().filter(|s| !s.is_empty()),
    };

    let records = query(pool.get_ref(), start, end, &filter).await?;
    debug!(%start, %end, ?filter, matched = records.len(), "Report query");

    Ok(HttpResponse::Ok().json(tally(&records)))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Unknown status labels count toward the total only.
pub fn tally(records: &[AttendanceRecord]) -> AttendanceReport {
    records
        .iter()
        .fold(AttendanceReport::default(), |mut report, record| {
            report.total_records += 1;
            match record.status.parse::<AttendanceStatus>() {
                Ok(AttendanceStatus::Present) => report.present += 1,
                Ok(AttendanceStatus::Absent) => report.absent += 1,
                Ok(AttendanceStatus::Late) => report.late += 1,
                Err(_) => {}
            }
            report
        })
}
