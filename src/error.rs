pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid hash configuration: {0}")]
    Configuration(String),

    #[error("malformed security record: expected 5 fields, found {0}")]
    Format(usize),

    #[error("invalid {field} field in security record: {reason}")]
    Parse { field: &'static str, reason: String },

    #[error("unsupported keyed digest algorithm: '{0}'")]
    UnsupportedAlgorithm(String),

    #[error("OS random generator unavailable: {0}")]
    EntropySource(String),

    #[error("keyed digest rejected the derived key: {0}")]
    KeyLength(String),
}

impl Error {
    pub(crate) fn parse(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Parse {
            field,
            reason: reason.into(),
        }
    }
}
