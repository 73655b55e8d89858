use thiserror::Error;

/// Errors surfaced by key generation and by signature opening.
///
/// The signing and verification hot paths are infallible by construction:
/// any corruption of a signature manifests as a reconstructed root that
/// fails the final constant-time comparison, never as an in-band error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The caller-provided randomness source failed before the secret key
    /// was fully populated.
    #[error("randomness source failed during key generation: {0}")]
    RandomnessExhausted(String),
    /// `open` was handed fewer bytes than a signature occupies.
    #[error("signed message too short: expected at least {0} bytes, found {1} bytes")]
    SignatureTooShort(usize, usize),
    /// The reconstructed hypertree root did not match the public root.
    #[error("signature verification failed")]
    VerificationFailed,
    /// Byte-slice conversion into a fixed-size key or signature failed.
    #[error("invalid length: expected {0} bytes, found {1} bytes")]
    BadLength(usize, usize),
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wording() {
        assert_eq!(
            Error::VerificationFailed.to_string(),
            "signature verification failed"
        );
        assert_eq!(
            Error::BadLength(1056, 12).to_string(),
            "invalid length: expected 1056 bytes, found 12 bytes"
        );
        assert_eq!(
            Error::SignatureTooShort(41000, 40999).to_string(),
            "signed message too short: expected at least 41000 bytes, found 40999 bytes"
        );
    }
}
