use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username; a token without it is rejected
    pub sub: Option<String>,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Inclusive, `YYYY-MM-DD`
    #[schema(example = "2026-01-01")]
    pub start_date: String,
    /// Inclusive, `YYYY-MM-DD`
    #[schema(example = "2026-01-31")]
    pub end_date: String,
    #[schema(example = "7B")]
    pub class_name: Option<String>,
    #[schema(example = "S-1001")]
    pub student_id: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceReport {
    #[schema(example = 5)]
    pub total_records: u64,
    #[schema(example = 2)]
    pub present: u64,
    #[schema(example = 1)]
    pub absent: u64,
    #[schema(example = 1)]
    pub late: u64,
}
