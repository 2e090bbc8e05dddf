use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// A stored hash that cannot be parsed fails the same way a wrong password does.
pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let parsed = PasswordHash::new(hashed)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verify() {
        let a = hash_password("s3cret").unwrap();
        let b = hash_password("s3cret").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("s3cret", &a).is_ok());
        assert!(verify_password("s3cret", &b).is_ok());
        assert!(verify_password("wrong", &a).is_err());
    }

    #[test]
    fn garbage_hash_is_a_mismatch() {
        assert!(verify_password("s3cret", "not-a-phc-string").is_err());
    }
}
