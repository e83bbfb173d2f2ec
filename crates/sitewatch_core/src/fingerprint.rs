use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Length of a fingerprint: a hex-encoded 256-bit digest.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// SHA-256 of the UTF-8 bytes of `content`, as lowercase hex.
pub fn fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let mut hex = String::with_capacity(FINGERPRINT_HEX_LEN);
    for byte in digest.iter() {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
