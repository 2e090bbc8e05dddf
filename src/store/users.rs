use sqlx::AnyPool;

use crate::model::user::{User, UserRow};

pub async fn find_user(pool: &AnyPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, hashed_password, email, full_name, disabled
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Used by provisioning; the API itself never creates users.
pub async fn insert_user(pool: &AnyPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (username, hashed_password, email, full_name, disabled)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.hashed_password)
    .bind(user.email.clone().unwrap_or_default())
    .bind(user.full_name.clone().unwrap_or_default())
    .bind(i64::from(user.disabled.unwrap_or(false)))
    .execute(pool)
    .await?;

    Ok(())
}
