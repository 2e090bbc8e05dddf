use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: Option<bool>,
}

/// Row shape of the `users` table; `disabled` is stored as an integer flag and
/// absent profile fields as empty strings.
#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub username: String,
    pub hashed_password: String,
    pub email: String,
    pub full_name: String,
    pub disabled: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            hashed_password: row.hashed_password,
            email: non_empty(row.email),
            full_name: non_empty(row.full_name),
            disabled: Some(row.disabled != 0),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_fields_read_back_as_absent() {
        let user = User::from(UserRow {
            username: "clerk".into(),
            hashed_password: "$argon2id$...".into(),
            email: "clerk@school.test".into(),
            full_name: String::new(),
            disabled: 0,
        });

        assert_eq!(user.email.as_deref(), Some("clerk@school.test"));
        assert_eq!(user.full_name, None);
        assert_eq!(user.disabled, Some(false));
    }
}
