use crate::{
    api::{attendance, report, student},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    middleware::{Condition, from_fn},
    web,
};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .milliseconds_per_request(60_000 / requests_per_min as u64)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let login_on = config.rate_login_per_min > 0;
    let api_on = config.rate_protected_per_min > 0;
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let api_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::resource("/token")
            .wrap(Condition::new(login_on, login_limiter.clone()))
            .route(web::post().to(handlers::login)),
    );
    cfg.service(
        web::resource("/mark_attendance")
            .app_data(web::PayloadConfig::new(config.max_image_bytes))
            .wrap(Condition::new(api_on, api_limiter.clone()))
            .route(web::post().to(attendance::mark_attendance)),
    );

    // Protected routes: token first, then role checks inside the handlers
    cfg.service(
        web::resource("/register_student")
            .wrap(from_fn(auth_middleware))
            .wrap(Condition::new(api_on, api_limiter.clone()))
            .route(web::post().to(student::register_student)),
    );
    cfg.service(
        web::resource("/manual_attendance")
            .wrap(from_fn(auth_middleware))
            .wrap(Condition::new(api_on, api_limiter.clone()))
            .route(web::post().to(attendance::manual_attendance)),
    );
    cfg.service(
        web::resource("/attendance_report")
            .wrap(from_fn(auth_middleware))
            .wrap(Condition::new(api_on, api_limiter))
            .route(web::get().to(report::attendance_report)),
    );
}

// LOGIN
//  └─ POST /token (form) -> access_token (ACCESS_TOKEN_TTL, 30 min)

// API REQUEST
//  └─ Authorization: Bearer access_token
//       └─ roles resolved from ADMIN_USERS / TEACHER_USERS

// EXPIRED
//  └─ log in again; there is no refresh token
