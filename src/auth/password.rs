use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::{error, warn};

lazy_static! {
    /// Verified against when an email is unknown, so a miss costs as much as a wrong password.
    static ref DUMMY_HASH: Option<String> = match hash_password("houselandia-dummy-password") {
        Ok(hash) => Some(hash),
        Err(e) => {
            error!(error = %e, "dummy hash unavailable; unknown-email logins will answer faster");
            None
        }
    };
}

fn argon2_failure(op: &'static str, e: password_hash::Error) -> anyhow::Error {
    error!(error = %e, op, "argon2 failure");
    anyhow::anyhow!("argon2 {op}: {e}")
}

/// Argon2id PHC string for `plain` with a fresh OS-random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| argon2_failure("hash", e))
}

/// Constant-time check of `plain` against a stored PHC string.
/// `Ok(false)` is a mismatch; `Err` means the stored hash is unreadable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| argon2_failure("parse", e))?;
    let matches = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok();
    Ok(matches)
}

/// Spends one verification on the dummy hash. Returns whether it ran.
pub fn burn_verification(plain: &str) -> bool {
    let Some(hash) = DUMMY_HASH.as_deref() else {
        warn!("skipping dummy verification");
        return false;
    };
    // The outcome is meaningless; only the time spent matters.
    let _ = verify_password(plain, hash);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_verifies_only_its_password() {
        let hash = hash_password("listing-owner-pw").expect("hash");
        assert!(verify_password("listing-owner-pw", &hash).expect("verify"));
        assert!(!verify_password("listing-owner-PW", &hash).expect("verify"));
    }

    #[test]
    fn unreadable_stored_hash_is_an_error() {
        let err = verify_password("anything", "bcrypt-or-garbage").unwrap_err();
        assert!(err.to_string().starts_with("argon2 parse"));
    }

    #[test]
    fn hashes_are_salted_phc_strings() {
        let plain = "plaintext-password-1";
        let a = hash_password(plain).unwrap();
        let b = hash_password(plain).unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(!a.contains(plain));
    }

    #[test]
    fn dummy_verification_runs() {
        assert!(DUMMY_HASH.is_some());
        assert!(burn_verification("anything"));
    }
}
