//! Credential codec: slow, salted password hashing and verification.
//!
//! Both operations run on the blocking pool so an Argon2 derivation never
//! stalls the request executor.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use gatehouse_core::Password;
use secrecy::{ExposeSecret, Secret};

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

/// Hash a password with a per-call random salt. Two calls with the same
/// input produce different strings. Fails only on internal errors (entropy,
/// parameter construction), never on input shape.
#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

/// True iff the candidate reproduces the hash. A malformed hash counts as a
/// mismatch, not an error; the argon2 verifier compares in constant time.
#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> bool {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let Ok(expected_password_hash) =
                PasswordHash::new(expected_password_hash.expose_secret())
            else {
                return false;
            };
            let Ok(hasher) = hasher() else {
                return false;
            };

            hasher
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .is_ok()
        })
    })
    .await;

    result.unwrap_or(false)
}
