//! Security record format.
//!
//! A record is one line of five colon-separated fields:
//! ```text
//! ALGORITHM : ITERATIONS : KEY_SIZE : BASE64(SALT) : BASE64(DIGEST)
//! ```
//! It carries every parameter needed to recompute its digest.

use crate::algorithm::KeyedAlgorithm;
use crate::config::{HashConfiguration, MAX_KEY_SIZE, MIN_SALT_SIZE};
use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Field separator.
pub const DELIMITER: char = ':';

/// A parsed security record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRecord {
    algorithm: KeyedAlgorithm,
    iterations: u32,
    key_size: usize,
    salt: Zeroizing<Vec<u8>>,
    digest: Zeroizing<Vec<u8>>,
}

impl SecurityRecord {
    /// Creates a record from its components.
    pub fn new(
        algorithm: KeyedAlgorithm,
        iterations: u32,
        key_size: usize,
        salt: Vec<u8>,
        digest: Vec<u8>,
    ) -> Self {
        Self {
            algorithm,
            iterations,
            key_size,
            salt: Zeroizing::new(salt),
            digest: Zeroizing::new(digest),
        }
    }

    /// Returns the keyed digest algorithm.
    pub fn algorithm(&self) -> KeyedAlgorithm {
        self.algorithm
    }

    /// Returns the key derivation iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Returns the derived key length in bytes.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Returns the salt.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the stored digest.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Returns the configuration this record was created under.
    pub fn parameters(&self) -> Result<HashConfiguration> {
        HashConfiguration::new(
            self.algorithm,
            self.iterations,
            self.key_size,
            self.salt.len(),
        )
    }
}

impl FromStr for SecurityRecord {
    type Err = Error;

    /// Parses a record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record does not have exactly five fields
    /// - The algorithm is unsupported
    /// - A numeric field is not a positive decimal integer
    /// - The key size exceeds [`MAX_KEY_SIZE`]
    /// - The salt or digest is not valid base64, or the salt is too short
    /// - The digest length does not match the algorithm
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(DELIMITER).collect();
        let [algorithm, iterations, key_size, salt, digest] = fields[..] else {
            return Err(Error::Format(fields.len()));
        };

        let algorithm: KeyedAlgorithm = algorithm.parse()?;
        let iterations = parse_positive::<u32>("iterations", iterations)?;
        let key_size = parse_positive::<usize>("key size", key_size)?;
        if key_size > MAX_KEY_SIZE {
            return Err(Error::parse(
                "key size",
                format!("{key_size} bytes, expected at most {MAX_KEY_SIZE}"),
            ));
        }

        let salt = STANDARD
            .decode(salt)
            .map_err(|e| Error::parse("salt", e.to_string()))?;
        if salt.len() < MIN_SALT_SIZE {
            return Err(Error::parse(
                "salt",
                format!("{} bytes, expected at least {MIN_SALT_SIZE}", salt.len()),
            ));
        }

        let digest = STANDARD
            .decode(digest)
            .map_err(|e| Error::parse("digest", e.to_string()))?;
        if digest.len() != algorithm.digest_len() {
            return Err(Error::parse(
                "digest",
                format!(
                    "{} bytes, {algorithm} produces {}",
                    digest.len(),
                    algorithm.digest_len()
                ),
            ));
        }

        Ok(SecurityRecord::new(
            algorithm, iterations, key_size, salt, digest,
        ))
    }
}

impl fmt::Display for SecurityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{algorithm}{d}{iterations}{d}{key_size}{d}{salt}{d}{digest}",
            algorithm = self.algorithm,
            iterations = self.iterations,
            key_size = self.key_size,
            salt = STANDARD.encode(&*self.salt),
            digest = STANDARD.encode(&*self.digest),
            d = DELIMITER,
        )
    }
}

fn parse_positive<T>(field: &'static str, value: &str) -> Result<T>
where
    T: FromStr + Default + PartialEq,
    T::Err: fmt::Display,
{
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(field, format!("'{value}' is not a decimal integer")));
    }

    let parsed: T = value
        .parse()
        .map_err(|e: T::Err| Error::parse(field, e.to_string()))?;
    if parsed == T::default() {
        return Err(Error::parse(field, "must be greater than zero"));
    }

    Ok(parsed)
}
