//! Salted, iterated, keyed password digests.
//!
//! [`Hasher::create_record`] turns a plaintext credential into a self-describing
//! security record; [`Hasher::validate_record`] checks a plaintext against such a
//! record using the parameters embedded in the record itself.
//!
//! # Example
//!
//! ```
//! use credhash::{CredentialHasher, HashConfiguration, Hasher, KeyedAlgorithm};
//!
//! # fn main() -> credhash::Result<()> {
//! let config = HashConfiguration::builder()
//!     .algorithm(KeyedAlgorithm::HmacSha256)
//!     .iterations(1000)
//!     .key_size(32)
//!     .salt_size(16)
//!     .build()?;
//! let hasher = Hasher::new(config);
//!
//! let record = hasher.create("hunter2")?;
//! assert!(hasher.validate("hunter2", &record)?);
//! assert!(!hasher.validate("hunter3", &record)?);
//! # Ok(())
//! # }
//! ```

mod algorithm;
mod config;
mod crypto;
mod error;
mod format;

pub use crate::algorithm::KeyedAlgorithm;
pub use crate::config::{
    HashConfiguration, HashConfigurationBuilder, MAX_KEY_SIZE, MIN_SALT_SIZE,
};
pub use crate::crypto::constant_time_eq;
pub use crate::error::{Error, Result};
pub use crate::format::SecurityRecord;

/// Creates and checks security records for plaintext credentials.
pub trait CredentialHasher {
    /// Hash `text` into a new security record string.
    fn create(&self, text: &str) -> Result<String>;

    /// Check `text` against a security record string.
    ///
    /// Returns `Ok(false)` when the credential does not match and `Err` when
    /// the record itself cannot be evaluated.
    fn validate(&self, text: &str, security: &str) -> Result<bool>;
}

/// PBKDF2 + HMAC credential hasher.
#[derive(Debug, Clone, Copy)]
pub struct Hasher {
    config: HashConfiguration,
}

impl Hasher {
    pub fn new(config: HashConfiguration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &HashConfiguration {
        &self.config
    }

    /// Hash `text` with a fresh random salt.
    pub fn create_record(&self, text: &str) -> Result<SecurityRecord> {
        self.config.validate()?;

        let algorithm = self.config.algorithm();
        let iterations = self.config.iterations();
        let key_size = self.config.key_size();

        let salt = crypto::generate_salt(self.config.salt_size())?;
        let digest = crypto::keyed_digest(algorithm, text, &salt, iterations, key_size)?;

        tracing::debug!(
            %algorithm,
            iterations,
            key_size,
            salt_size = salt.len(),
            "created security record"
        );

        Ok(SecurityRecord::new(
            algorithm,
            iterations,
            key_size,
            salt.to_vec(),
            digest,
        ))
    }

    /// Check `text` against an already parsed record.
    pub fn validate_record(&self, text: &str, record: &SecurityRecord) -> Result<bool> {
        let computed = crypto::keyed_digest(
            record.algorithm(),
            text,
            record.salt(),
            record.iterations(),
            record.key_size(),
        )?;

        let matched = crypto::constant_time_eq(&computed, record.digest());
        tracing::debug!(
            algorithm = %record.algorithm(),
            iterations = record.iterations(),
            matched,
            "validated security record"
        );

        Ok(matched)
    }

    /// Returns `true` if `security` was made with parameters other than this
    /// hasher's configuration and should be replaced after a successful
    /// validation.
    pub fn needs_rehash(&self, security: &str) -> Result<bool> {
        let record = parse_record(security)?;

        Ok(record.algorithm() != self.config.algorithm()
            || record.iterations() != self.config.iterations()
            || record.key_size() != self.config.key_size()
            || record.salt().len() != self.config.salt_size())
    }
}

impl CredentialHasher for Hasher {
    fn create(&self, text: &str) -> Result<String> {
        Ok(self.create_record(text)?.to_string())
    }

    fn validate(&self, text: &str, security: &str) -> Result<bool> {
        let record = parse_record(security)?;
        self.validate_record(text, &record)
    }
}

fn parse_record(security: &str) -> Result<SecurityRecord> {
    security.parse().inspect_err(|e| {
        tracing::warn!(error = %e, "rejected security record");
    })
}
