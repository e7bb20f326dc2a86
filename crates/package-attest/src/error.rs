use std::fmt;

use der_trace::DerError;

#[derive(Debug)]
pub enum AttestError {
    PackageNotFound,
    Archive(String),
    SignatureBlockNotFound,
    Parse(DerError),
    FingerprintMismatch { expected: String, observed: String },
}

impl AttestError {
    /// Stable category string, used when logging a failed check.
    pub fn category(&self) -> &'static str {
        match self {
            Self::PackageNotFound => "package_not_found",
            Self::Archive(_) => "archive_error",
            Self::SignatureBlockNotFound => "signature_block_not_found",
            Self::Parse(_) => "signature_block_rejected",
            Self::FingerprintMismatch { .. } => "fingerprint_mismatch",
        }
    }
}

impl fmt::Display for AttestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageNotFound => {
                write!(f, "package archive backing this process was not found")
            }
            Self::Archive(detail) => write!(f, "archive error: {}", detail),
            Self::SignatureBlockNotFound => {
                write!(f, "no signature block entry in the package archive")
            }
            Self::Parse(err) => write!(f, "signature block rejected: {}", err),
            Self::FingerprintMismatch { expected, observed } => write!(
                f,
                "certificate fingerprint mismatch: expected={} observed={}",
                expected, observed
            ),
        }
    }
}

impl std::error::Error for AttestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DerError> for AttestError {
    fn from(value: DerError) -> Self {
        Self::Parse(value)
    }
}

pub type AttestResult<T> = std::result::Result<T, AttestError>;
