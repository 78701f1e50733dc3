use crate::algorithm::KeyedAlgorithm;
use crate::error::{Error, Result};
use serde::Serialize;

/// Shortest salt the key derivation accepts, in bytes.
pub const MIN_SALT_SIZE: usize = 8;

/// Longest derived key accepted, in bytes.
pub const MAX_KEY_SIZE: usize = 1024;

/// Parameters controlling how a new security record is derived.
///
/// Immutable once built: obtain one through [`HashConfiguration::new`] or
/// [`HashConfiguration::builder`], both of which validate every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashConfiguration {
    algorithm: KeyedAlgorithm,
    iterations: u32,
    key_size: usize,
    salt_size: usize,
}

impl HashConfiguration {
    pub fn new(
        algorithm: KeyedAlgorithm,
        iterations: u32,
        key_size: usize,
        salt_size: usize,
    ) -> Result<Self> {
        let config = Self {
            algorithm,
            iterations,
            key_size,
            salt_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn builder() -> HashConfigurationBuilder {
        HashConfigurationBuilder::default()
    }

    pub fn algorithm(&self) -> KeyedAlgorithm {
        self.algorithm
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub fn salt_size(&self) -> usize {
        self.salt_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(Error::Configuration("iterations must be >= 1".into()));
        }
        if self.key_size < 1 {
            return Err(Error::Configuration("key size must be >= 1".into()));
        }
        if self.key_size > MAX_KEY_SIZE {
            return Err(Error::Configuration(format!(
                "key size must be <= {MAX_KEY_SIZE} bytes"
            )));
        }
        if self.salt_size < MIN_SALT_SIZE {
            return Err(Error::Configuration(format!(
                "salt size must be >= {MIN_SALT_SIZE} bytes"
            )));
        }
        Ok(())
    }
}

/// Collects configuration fields; none is set until the caller sets it.
#[derive(Debug, Default, Clone)]
pub struct HashConfigurationBuilder {
    algorithm: Option<KeyedAlgorithm>,
    iterations: Option<u32>,
    key_size: Option<usize>,
    salt_size: Option<usize>,
}

impl HashConfigurationBuilder {
    pub fn algorithm(mut self, algorithm: KeyedAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn key_size(mut self, key_size: usize) -> Self {
        self.key_size = Some(key_size);
        self
    }

    pub fn salt_size(mut self, salt_size: usize) -> Self {
        self.salt_size = Some(salt_size);
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a field was never set or is out of
    /// range.
    pub fn build(self) -> Result<HashConfiguration> {
        let algorithm = self.algorithm.ok_or_else(|| missing("algorithm"))?;
        let iterations = self.iterations.ok_or_else(|| missing("iterations"))?;
        let key_size = self.key_size.ok_or_else(|| missing("key size"))?;
        let salt_size = self.salt_size.ok_or_else(|| missing("salt size"))?;

        HashConfiguration::new(algorithm, iterations, key_size, salt_size)
    }
}

fn missing(field: &str) -> Error {
    Error::Configuration(format!("{field} is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_with_all_fields_succeeds() {
        let config = HashConfiguration::builder()
            .algorithm(KeyedAlgorithm::HmacSha256)
            .iterations(1000)
            .key_size(32)
            .salt_size(16)
            .build()
            .unwrap();

        assert_eq!(config.algorithm(), KeyedAlgorithm::HmacSha256);
        assert_eq!(config.iterations(), 1000);
        assert_eq!(config.key_size(), 32);
        assert_eq!(config.salt_size(), 16);
    }

    #[test]
    fn empty_builder_fails() {
        let err = HashConfiguration::builder().build().unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("algorithm")));
    }

    #[test]
    fn builder_missing_iterations_fails() {
        let err = HashConfiguration::builder()
            .algorithm(KeyedAlgorithm::HmacSha1)
            .key_size(20)
            .salt_size(16)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("iterations")));
    }

    #[test]
    fn zero_values_fail() {
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 0, 32, 16).is_err());
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1000, 0, 16).is_err());
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1000, 32, 0).is_err());
    }

    #[test]
    fn oversized_key_fails() {
        let err =
            HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1000, MAX_KEY_SIZE + 1, 16)
                .unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("key size")));
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1, MAX_KEY_SIZE, 16).is_ok());
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1, usize::MAX, 16).is_err());
    }

    #[test]
    fn short_salt_fails() {
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1000, 32, 7).is_err());
        assert!(HashConfiguration::new(KeyedAlgorithm::HmacSha256, 1000, 32, 8).is_ok());
    }

    #[test]
    fn serializes_as_json() {
        let config = HashConfiguration::new(KeyedAlgorithm::HmacSha512, 5000, 64, 24).unwrap();
        let json = serde_json::to_value(config).unwrap();

        assert_eq!(json["algorithm"], "HMACSHA512");
        assert_eq!(json["iterations"], 5000);
        assert_eq!(json["key_size"], 64);
        assert_eq!(json["salt_size"], 24);
    }
}
