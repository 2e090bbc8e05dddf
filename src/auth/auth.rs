use crate::{
    auth::password::verify_password, error::AppError, model::role::Role, model::user::User,
    store::users::find_user,
};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};
use sqlx::AnyPool;
use tracing::debug;

/// Caller identity resolved by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub roles: Vec<Role>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| AppError::Unauthenticated.into()),
        )
    }
}

impl AuthUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.has_role(Role::Admin) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Not authorized to register students"))
        }
    }

    pub fn require_teacher(&self) -> Result<(), AppError> {
        if self.has_role(Role::Teacher) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Not authorized to mark manual attendance"))
        }
    }

    pub fn require_admin_or_teacher(&self) -> Result<(), AppError> {
        if self.has_role(Role::Admin) || self.has_role(Role::Teacher) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Not authorized to view attendance reports"))
        }
    }
}

/// `None` for an unknown user and for a wrong password alike.
pub async fn authenticate(
    pool: &AnyPool,
    username: &str,
    password: &str,
) -> Result<Option<User>, sqlx::Error> {
    let Some(user) = find_user(pool, username).await? else {
        debug!("Invalid credentials: user not found");
        return Ok(None);
    };

    if let Err(e) = verify_password(password, &user.hashed_password) {
        debug!(error = %e, "Invalid credentials: password mismatch");
        return Ok(None);
    }

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: Vec<Role>) -> AuthUser {
        AuthUser {
            username: "someone".into(),
            roles,
        }
    }

    #[test]
    fn role_checks() {
        let admin = user(vec![Role::Admin]);
        let teacher = user(vec![Role::Teacher]);
        let nobody = user(vec![]);

        assert!(admin.require_admin().is_ok());
        assert!(admin.require_teacher().is_err());
        assert!(admin.require_admin_or_teacher().is_ok());

        assert!(teacher.require_admin().is_err());
        assert!(teacher.require_teacher().is_ok());
        assert!(teacher.require_admin_or_teacher().is_ok());

        assert!(matches!(nobody.require_admin_or_teacher(), Err(AppError::Forbidden(_))));
    }
}
