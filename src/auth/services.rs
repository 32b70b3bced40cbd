use anyhow::Context;
use sqlx::AnyPool;
use tracing::{debug, warn};

use crate::auth::{
    password::{burn_verification, hash_password, verify_password},
    repo_types::User,
};

/// Longest email the `users.email` column accepts.
pub const MAX_EMAIL_LEN: usize = 120;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    InvalidInput,
    #[error("Email must be at most {} characters", MAX_EMAIL_LEN)]
    EmailTooLong,
    #[error("User already exists")]
    AlreadyExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Validated `(email, password)` pair. Email is trimmed, otherwise kept as sent.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn parse(email: Option<String>, password: Option<String>) -> Result<Self, AuthError> {
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::InvalidInput)?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::InvalidInput)?;
        Ok(Self { email, password })
    }
}

/// Store a new user with a salted hash of the password.
pub async fn register(db: &AnyPool, creds: &Credentials) -> Result<User, AuthError> {
    if creds.email.chars().count() > MAX_EMAIL_LEN {
        return Err(AuthError::EmailTooLong);
    }

    if User::find_by_email(db, &creds.email).await?.is_some() {
        warn!(email = %creds.email, "email already registered");
        return Err(AuthError::AlreadyExists);
    }

    let hash = hash_password(&creds.password)?;

    match User::create(db, &creds.email, &hash).await {
        Ok(user) => Ok(user),
        // lost a race with a concurrent signup for the same email
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(email = %creds.email, "email registered concurrently");
            Err(AuthError::AlreadyExists)
        }
        Err(e) => Err(AuthError::Internal(
            anyhow::Error::new(e).context("insert user"),
        )),
    }
}

/// Check a password against the stored hash. Unknown email and wrong
/// password are indistinguishable to the caller. An email too long to have
/// been registered is simply unknown.
pub async fn authenticate(db: &AnyPool, creds: &Credentials) -> Result<User, AuthError> {
    let Some(user) = User::find_by_email(db, &creds.email).await? else {
        burn_verification(&creds.password);
        debug!(email = %creds.email, "login unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    let ok = verify_password(&creds.password, &user.password_hash)
        .with_context(|| format!("stored hash unreadable for user {}", user.id))?;
    if !ok {
        debug!(user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
