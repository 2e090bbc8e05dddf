#![allow(dead_code)]

use std::io::Cursor;
use std::sync::OnceLock;

use attendance::auth::password::hash_password;
use attendance::config::{Config, RoleTable};
use attendance::db::{ensure_schema, init_memory_db};
use attendance::model::user::User;
use attendance::recognition::{DEFAULT_TOLERANCE, Encoding, FaceRecognizer, within_tolerance};
use attendance::store::users::insert_user;
use image::{DynamicImage, ImageFormat, RgbImage};
use sqlx::AnyPool;

pub const SECRET: &str = "integration-secret";
pub const PASSWORD: &str = "correct horse";

/// Builds the app the way `main` does, minus logging and swagger.
macro_rules! test_app {
    ($pool:expr, $recognizer:expr) => {{
        let config = crate::common::test_config();
        let recognizer: std::sync::Arc<dyn attendance::recognition::FaceRecognizer> =
            std::sync::Arc::new($recognizer);
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new(config.clone()))
                .app_data(actix_web::web::Data::from(recognizer))
                .configure(|cfg| attendance::routes::configure(cfg, config.clone())),
        )
        .await
    }};
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: SECRET.into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 1800,
        roles: RoleTable {
            admins: vec!["admin".into()],
            teachers: vec!["teacher1".into(), "teacher2".into()],
        },
        face_match_tolerance: DEFAULT_TOLERANCE,
        embedding_socket: "/nonexistent/embedding.sock".into(),
        max_image_bytes: 1 << 20,
        rate_login_per_min: 0,
        rate_protected_per_min: 0,
        log_dir: "logs".into(),
    }
}

pub fn shared_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).unwrap())
}

/// Fresh database with `admin`, `teacher1` and `clerk` (no role), all using `PASSWORD`.
pub async fn seeded_pool() -> AnyPool {
    let pool = init_memory_db().await.unwrap();
    ensure_schema(&pool).await.unwrap();

    for username in ["admin", "teacher1", "clerk"] {
        insert_user(
            &pool,
            &User {
                username: username.into(),
                hashed_password: shared_hash().to_string(),
                email: Some(format!("{username}@school.test")),
                full_name: None,
                disabled: Some(false),
            },
        )
        .await
        .unwrap();
    }

    pool
}

pub fn bearer(username: &str) -> (&'static str, String) {
    let token = attendance::auth::jwt::issue_token(username, Some(600), SECRET).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

pub fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Pretends every image contains the given faces.
pub struct StubRecognizer {
    pub faces: Vec<Encoding>,
}

impl StubRecognizer {
    pub fn seeing(faces: Vec<Encoding>) -> Self {
        Self { faces }
    }
}

impl FaceRecognizer for StubRecognizer {
    fn detect_and_encode(&self, _image: &DynamicImage) -> anyhow::Result<Vec<Encoding>> {
        Ok(self.faces.clone())
    }

    fn matches(&self, candidate: &Encoding, stored: &Encoding) -> bool {
        within_tolerance(candidate, stored, DEFAULT_TOLERANCE)
    }
}

pub struct BrokenRecognizer;

impl FaceRecognizer for BrokenRecognizer {
    fn detect_and_encode(&self, _image: &DynamicImage) -> anyhow::Result<Vec<Encoding>> {
        anyhow::bail!("model not loaded")
    }

    fn matches(&self, _candidate: &Encoding, _stored: &Encoding) -> bool {
        false
    }
}
