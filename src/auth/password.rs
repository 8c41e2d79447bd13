use sha2::{Digest, Sha256};

/// sha-256 hex digest of a password. Deliberately trivial hashing: the tool
/// is an internal trainer, not an identity provider.
pub fn hash_password(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    hash_password(plaintext) == digest
}
