//! Auth keys
//!
//! An auth key is an opaque bearer credential issued at signup and returned
//! again on every successful login. Keys do not expire.

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

/// Random bytes per key (256 bits)
pub const AUTH_KEY_BYTES: usize = 32;

/// Generate a fresh auth key, hex-encoded
pub fn generate_auth_key() -> String {
    let mut bytes = [0u8; AUTH_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Compare a stored key with a supplied one in constant time
pub fn keys_match(stored: &str, supplied: &str) -> bool {
    stored.as_bytes().ct_eq(supplied.as_bytes()).into()
}
