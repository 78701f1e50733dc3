use crate::algorithm::KeyedAlgorithm;
use crate::error::Result;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroizing;

/// Derive `key_size` bytes from `text` and `salt` with PBKDF2-HMAC-SHA1.
pub fn derive_key(text: &[u8], salt: &[u8], iterations: u32, key_size: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; key_size]);
    pbkdf2_hmac::<Sha1>(text, salt, iterations, &mut key);
    key
}

/// Message fed to the keyed digest: text bytes followed by the salt.
pub fn salted_message(text: &[u8], salt: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut message = Zeroizing::new(Vec::with_capacity(text.len() + salt.len()));
    message.extend_from_slice(text);
    message.extend_from_slice(salt);
    message
}

/// Digest stored in a security record for `text` under the given parameters.
///
/// The derived key is the HMAC key and `text || salt` is the message; this
/// composition must stay fixed for existing records to keep validating.
pub fn keyed_digest(
    algorithm: KeyedAlgorithm,
    text: &str,
    salt: &[u8],
    iterations: u32,
    key_size: usize,
) -> Result<Vec<u8>> {
    let text = text.as_bytes();
    let key = derive_key(text, salt, iterations, key_size);
    let message = salted_message(text, salt);

    algorithm.compute(&key, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::STANDARD};

    #[test]
    fn kdf_matches_rfc6070_vector() {
        let key = derive_key(b"password", b"salt", 1, 20);
        let expected = [
            0x0c, 0x60, 0xc8, 0x0f, 0x96, 0x1f, 0x0e, 0x71, 0xf3, 0xa9, 0xb5, 0x24, 0xaf, 0x60,
            0x12, 0x06, 0x2f, 0xe0, 0x37, 0xa6,
        ];
        assert_eq!(*key, expected);
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];

        let k1 = derive_key(b"password", &salt, 100, 32);
        let k2 = derive_key(b"password", &salt, 100, 32);

        assert_eq!(k1, k2);
    }

    #[test]
    fn kdf_params_affect_output() {
        let salt = [7u8; 16];

        let k1 = derive_key(b"pw", &salt, 100, 32);
        let k2 = derive_key(b"pw", &salt, 101, 32);

        assert_ne!(k1, k2);
    }

    #[test]
    fn salted_message_appends_salt() {
        let message = salted_message(b"abc", &[1, 2, 3]);
        assert_eq!(*message, vec![b'a', b'b', b'c', 1, 2, 3]);

        let message = salted_message(b"", &[9, 9]);
        assert_eq!(*message, vec![9, 9]);
    }

    #[test]
    fn keyed_digest_known_answer() {
        let salt: Vec<u8> = (0u8..16).collect();
        let digest = keyed_digest(
            KeyedAlgorithm::HmacSha256,
            "correct horse battery staple",
            &salt,
            1000,
            32,
        )
        .unwrap();

        assert_eq!(
            STANDARD.encode(digest),
            "iIeugZvcqmtHCNvuLkeFvMdISAFX8AmPt8WLFJp+5I0="
        );
    }

    #[test]
    fn keyed_digest_known_answer_empty_text() {
        let salt = [7u8; 8];
        let digest = keyed_digest(KeyedAlgorithm::HmacSha1, "", &salt, 1, 20).unwrap();

        assert_eq!(STANDARD.encode(digest), "SNOJvOGBkO+bTcMm8L5WLfD31qI=");
    }
}
