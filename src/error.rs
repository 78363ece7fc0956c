use thiserror::Error;

pub type Result<T> = std::result::Result<T, SealboxError>;

#[derive(Debug, Error)]
pub enum SealboxError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("plaintext is {size} bytes but the RSA modulus is only {max}")]
    InputTooLarge { size: usize, max: usize },

    /// Covers AEAD authentication failures, RSA padding violations, and key
    /// parse failures. Deliberately carries no detail about which check
    /// failed, so callers cannot be used as a padding/authentication oracle.
    #[error("cryptographic failure: wrong key material or corrupted data")]
    CryptoFailure,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
