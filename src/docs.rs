use crate::model::attendance::AttendanceRecord;
use crate::model::student::Student;
use crate::models::{AttendanceReport, LoginForm, ReportQuery, TokenResponse};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = r#"
## Student Attendance

Backend for a classroom attendance dashboard.

### Features
- **Login** with username and password for a short-lived bearer token
- **Student registry** with one stored face encoding per student
- **Attendance by photo**: the first face in the image is matched against the registry
- **Manual attendance** submitted by teachers
- **Reports** counting present, absent and late records over a date range

### Security
Protected endpoints take `Authorization: Bearer <token>` from `POST /token`.
Administrators and teachers are listed in the server configuration.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::student::register_student,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::manual_attendance,

        crate::api::report::attendance_report
    ),
    components(
        schemas(
            LoginForm,
            TokenResponse,
            Student,
            AttendanceRecord,
            ReportQuery,
            AttendanceReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Token issuance"),
        (name = "Students", description = "Student registry"),
        (name = "Attendance", description = "Attendance marking"),
        (name = "Reports", description = "Attendance reports"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/token",
            "/register_student",
            "/mark_attendance",
            "/manual_attendance",
            "/attendance_report",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(
            doc.components
                .unwrap()
                .security_schemes
                .contains_key("bearer_auth")
        );
    }
}
