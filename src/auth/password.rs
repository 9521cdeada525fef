//! PBKDF2-SHA256 password hashing.
//!
//! Stored format: `pbkdf2_sha256$<iterations>$<salt hex>$<hash hex>`.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AppError, AppResult};

const SCHEME: &str = "pbkdf2_sha256";
pub const DEFAULT_ITERATIONS: u32 = 210_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    hash_with_iterations(password, DEFAULT_ITERATIONS)
}

fn hash_with_iterations(password: &str, iterations: u32) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    let key = derive_key(password, &salt, iterations);
    format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(key)
    )
}

/// Well-formed hash at the default cost that no password matches.
///
/// Verified in place of a real hash when the account does not exist, so an
/// unknown e-mail costs the same key derivation as a wrong password.
pub fn dummy_hash() -> String {
    format!(
        "{}${}${}${}",
        SCHEME,
        DEFAULT_ITERATIONS,
        hex::encode([0u8; SALT_LEN]),
        hex::encode([0u8; KEY_LEN])
    )
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, stored: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))
}

/// Check `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let (Ok(iterations), Ok(salt), Ok(expected)) =
        (iterations.parse::<u32>(), hex::decode(salt), hex::decode(hash))
    else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    let actual = derive_key(password, &salt, iterations);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}
