use sha2::{Digest, Sha256};

/// Compute SHA256 of raw bytes and return it as a lowercase hex string
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// First 8 characters of the digest, for display
pub fn short(digest: &str) -> &str {
    digest.get(..8).unwrap_or(digest)
}
