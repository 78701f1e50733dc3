//! Keyed digest functions a security record may name.

use crate::error::{Error, Result};
use hmac::{Hmac, Mac, digest::KeyInit};
use md5::Md5;
use ripemd::Ripemd160;
use serde::{Serialize, Serializer};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use std::str::FromStr;

/// Namespace prefix some producers store in front of the algorithm name.
const LEGACY_NAMESPACE: &str = "System.Security.Cryptography.";

/// Generic name that older producers resolve to HMAC-SHA1.
const DEFAULT_KEYED_NAME: &str = "KEYEDHASHALGORITHM";

/// HMAC variant used to bind the derived key to the salted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyedAlgorithm {
    HmacMd5,
    HmacRipemd160,
    HmacSha1,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl KeyedAlgorithm {
    /// Canonical name, as written into security records.
    pub fn name(&self) -> &'static str {
        match self {
            KeyedAlgorithm::HmacMd5 => "HMACMD5",
            KeyedAlgorithm::HmacRipemd160 => "HMACRIPEMD160",
            KeyedAlgorithm::HmacSha1 => "HMACSHA1",
            KeyedAlgorithm::HmacSha256 => "HMACSHA256",
            KeyedAlgorithm::HmacSha384 => "HMACSHA384",
            KeyedAlgorithm::HmacSha512 => "HMACSHA512",
        }
    }

    /// Length in bytes of the digest this algorithm produces.
    pub fn digest_len(&self) -> usize {
        match self {
            KeyedAlgorithm::HmacMd5 => 16,
            KeyedAlgorithm::HmacRipemd160 => 20,
            KeyedAlgorithm::HmacSha1 => 20,
            KeyedAlgorithm::HmacSha256 => 32,
            KeyedAlgorithm::HmacSha384 => 48,
            KeyedAlgorithm::HmacSha512 => 64,
        }
    }

    /// Compute the keyed digest of `message` under `key`.
    pub(crate) fn compute(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        match self {
            KeyedAlgorithm::HmacMd5 => mac::<Hmac<Md5>>(key, message),
            KeyedAlgorithm::HmacRipemd160 => mac::<Hmac<Ripemd160>>(key, message),
            KeyedAlgorithm::HmacSha1 => mac::<Hmac<Sha1>>(key, message),
            KeyedAlgorithm::HmacSha256 => mac::<Hmac<Sha256>>(key, message),
            KeyedAlgorithm::HmacSha384 => mac::<Hmac<Sha384>>(key, message),
            KeyedAlgorithm::HmacSha512 => mac::<Hmac<Sha512>>(key, message),
        }
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        <M as KeyInit>::new_from_slice(key).map_err(|e| Error::KeyLength(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl FromStr for KeyedAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = match s.get(..LEGACY_NAMESPACE.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(LEGACY_NAMESPACE) => {
                &s[LEGACY_NAMESPACE.len()..]
            }
            _ => s,
        };

        match name.to_ascii_uppercase().as_str() {
            "HMACMD5" => Ok(KeyedAlgorithm::HmacMd5),
            "HMACRIPEMD160" => Ok(KeyedAlgorithm::HmacRipemd160),
            "HMACSHA1" | DEFAULT_KEYED_NAME => Ok(KeyedAlgorithm::HmacSha1),
            "HMACSHA256" => Ok(KeyedAlgorithm::HmacSha256),
            "HMACSHA384" => Ok(KeyedAlgorithm::HmacSha384),
            "HMACSHA512" => Ok(KeyedAlgorithm::HmacSha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl std::fmt::Display for KeyedAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for KeyedAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
