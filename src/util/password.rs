//! Credential hashing and token key generation.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Hash a password with a fresh random salt.
///
/// The stored format is `<salt-hex>$<digest-hex>` where the digest is
/// SHA-256 over the salt hex followed by the password bytes.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt[..]);

    let salt_hex = hex::encode(salt);
    let digest = digest_with_salt(&salt_hex, password);

    format!("{}${}", salt_hex, digest)
}

/// Check a password against a stored `<salt-hex>$<digest-hex>` value.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest)) = stored.split_once('$') else {
        return false;
    };

    digest_with_salt(salt_hex, password) == digest
}

/// Generate a new 40-character hex token key.
pub fn generate_token_key() -> String {
    let mut bytes = [0u8; 20];
    rand::rng().fill(&mut bytes[..]);

    hex::encode(bytes)
}

fn digest_with_salt(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());

    hex::encode(hasher.finalize())
}
