//! Random password generation for `add login --generate`.

use rand::Rng;

/// Characters drawn from when generating a password.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Generate a random password of `length` characters from the OS RNG.
///
/// Uses `gen_range` per character, so there is no modulo bias.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rngs::OsRng;
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
