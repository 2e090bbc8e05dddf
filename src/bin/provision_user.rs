//! Creates a login for the attendance API.
//!
//! ```text
//! provision-user <username> <password> [email] [full name]
//! ```
//!
//! Reads `DATABASE_URL` the same way the server does.

use anyhow::{Context, Result, bail};
use attendance::auth::password::hash_password;
use attendance::db::{ensure_schema, init_db};
use attendance::model::user::User;
use attendance::store::users::{find_user, insert_user};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        bail!("usage: provision-user <username> <password> [email] [full name]");
    };
    let email = args.next();
    let full_name = {
        let rest: Vec<String> = args.collect();
        (!rest.is_empty()).then(|| rest.join(" "))
    };

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db(&database_url).await.context("Failed to connect to database")?;
    ensure_schema(&pool).await?;

    if find_user(&pool, &username).await?.is_some() {
        bail!("user {username} already exists");
    }

    let hashed_password =
        hash_password(&password).map_err(|e| anyhow::anyhow!("hashing password: {e}"))?;

    insert_user(
        &pool,
        &User {
            username: username.clone(),
            hashed_password,
            email,
            full_name,
            disabled: Some(false),
        },
    )
    .await?;

    tracing::info!(%username, "User created");
    Ok(())
}
