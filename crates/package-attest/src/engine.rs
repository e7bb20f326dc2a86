//! One-shot attestation of the installed package's signing certificate.

use std::path::PathBuf;

use der_trace::{certificate_block_span, walk_signed_data, Parser};
use tracing::{debug, warn};

use crate::archive::read_signature_block;
use crate::error::{AttestError, AttestResult};
use crate::fingerprint::{encode_hex, expected_fingerprint, fingerprint_matches};
use crate::locator::locate_package_archive;

#[derive(Debug, Clone)]
pub struct AttestConfig {
    /// Lowercase hex the certificate block must start with.
    pub expected_fingerprint_hex: String,
    /// Skips reading the process identity string when set.
    pub package_name: Option<String>,
    /// Skips the mapping-table scan entirely when set.
    pub archive_path: Option<PathBuf>,
}

impl Default for AttestConfig {
    fn default() -> Self {
        Self {
            expected_fingerprint_hex: expected_fingerprint(),
            package_name: None,
            archive_path: None,
        }
    }
}

/// What a successful attestation verified.
#[derive(Debug, Clone)]
pub struct AttestReport {
    pub package_path: PathBuf,
    pub signature_entry: String,
    pub certificate_block_len: usize,
}

#[derive(Debug, Default)]
pub struct AttestEngine {
    config: AttestConfig,
}

impl AttestEngine {
    pub fn new(config: AttestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AttestConfig {
        &self.config
    }

    /// Locate the package, pull its signature block, walk the SignedData
    /// structure, and compare the certificate block's fingerprint.
    pub fn attest(&self) -> AttestResult<AttestReport> {
        let package_path = match &self.config.archive_path {
            Some(path) => path.clone(),
            None => locate_package_archive(self.config.package_name.as_deref())
                .ok_or(AttestError::PackageNotFound)?,
        };
        debug!(path = %package_path.display(), "attesting installed package");

        let (signature_entry, block) = read_signature_block(&package_path)?;

        let certificate_block = {
            let mut parser = Parser::new(&block);
            walk_signed_data(&mut parser)?;
            let span = certificate_block_span(&parser)?;
            block[span].to_vec()
            // parser (cursor + element trace) is released here, before the
            // fingerprint comparison
        };

        let observed = encode_hex(&certificate_block);
        let expected = &self.config.expected_fingerprint_hex;
        if !fingerprint_matches(expected, &observed) {
            let shown = observed[..observed.len().min(expected.len())].to_string();
            return Err(AttestError::FingerprintMismatch {
                expected: expected.clone(),
                observed: shown,
            });
        }

        Ok(AttestReport {
            package_path,
            signature_entry,
            certificate_block_len: certificate_block.len(),
        })
    }
}

/// Process-start entry point. Runs the attestation once against the
/// compiled-in expected fingerprint and returns whether it passed.
///
/// Every failure category fails closed: a package that cannot be located,
/// an unreadable archive, a rejected signature block and a mismatching
/// fingerprint all come back `false`, each logged with its category.
pub fn verify_installed_package() -> bool {
    match AttestEngine::default().attest() {
        Ok(report) => {
            debug!(
                path = %report.package_path.display(),
                entry = report.signature_entry.as_str(),
                certificate_block_len = report.certificate_block_len,
                "package signing certificate verified"
            );
            true
        }
        Err(err) => {
            warn!(
                category = err.category(),
                error = %err,
                "package integrity check failed"
            );
            false
        }
    }
}
