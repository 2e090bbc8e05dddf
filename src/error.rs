use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use derive_more::Display;
use serde_json::json;
use tracing::error;

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Could not validate credentials")]
    Unauthenticated,

    #[display(fmt = "{}", _0)]
    Forbidden(&'static str),

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "storage error: {}", _0)]
    Storage(sqlx::Error),

    #[display(fmt = "{}", _0)]
    Internal(String),
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Storage(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut resp = HttpResponse::build(self.status_code());

        let message = match self {
            AppError::Storage(e) => {
                error!(error = %e, "Storage failure");
                "Something went wrong, Contact with system admin".to_string()
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "Internal failure");
                "Something went wrong, Contact with system admin".to_string()
            }
            AppError::Unauthenticated => {
                resp.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
                self.to_string()
            }
            other => other.to_string(),
        };

        resp.json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn storage_details_stay_out_of_the_body() {
        let resp = AppError::Storage(sqlx::Error::PoolTimedOut).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("pool"));
    }

    #[test]
    fn unauthenticated_asks_for_bearer() {
        let resp = AppError::Unauthenticated.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}
