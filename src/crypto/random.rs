use crate::error::{Error, Result};
use getrandom::fill;
use zeroize::Zeroizing;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|e| Error::EntropySource(e.to_string()))
}

/// Generate a salt of `size` bytes from the OS random generator
pub fn generate_salt(size: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut salt = Zeroizing::new(vec![0u8; size]);
    secure_random(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_has_requested_length() {
        assert_eq!(generate_salt(16).unwrap().len(), 16);
        assert_eq!(generate_salt(64).unwrap().len(), 64);
    }

    #[test]
    fn salts_differ() {
        let s1 = generate_salt(16).unwrap();
        let s2 = generate_salt(16).unwrap();
        assert_ne!(*s1, *s2);
    }
}
