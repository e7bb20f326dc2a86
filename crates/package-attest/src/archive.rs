//! Signature-block selection from the package archive.
//!
//! The ZIP container itself is an external concern: opening, entry
//! enumeration and decompression all go through the `zip` crate. This
//! module only picks the right entry and reads its bytes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::error::{AttestError, AttestResult};

const SIGNATURE_DIR_PREFIX: &str = "META-INF/";
const SIGNATURE_EXTENSIONS: [&str; 3] = [".rsa", ".dsa", ".ec"];

/// True when `name` is a signature-block entry. The metadata directory is
/// fixed-case in well-formed archives, the extension is not.
pub fn is_signature_entry(name: &str) -> bool {
    if !name.starts_with(SIGNATURE_DIR_PREFIX) {
        return false;
    }
    let lower = name.to_ascii_lowercase();
    SIGNATURE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Decompressed bytes of the first signature-block entry, with its name.
/// The scan stops at the first hit; archives with several blocks keep
/// whichever one the central directory lists first.
pub fn read_signature_block(path: &Path) -> AttestResult<(String, Vec<u8>)> {
    let file = File::open(path)
        .map_err(|err| AttestError::Archive(format!("open {}: {}", path.display(), err)))?;
    let mut archive = ZipArchive::new(file).map_err(|err| {
        AttestError::Archive(format!("read archive {}: {}", path.display(), err))
    })?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|err| AttestError::Archive(format!("entry {}: {}", index, err)))?;
        if !is_signature_entry(entry.name()) {
            continue;
        }

        let name = entry.name().to_string();
        debug!(
            entry = name.as_str(),
            compressed = entry.compressed_size(),
            uncompressed = entry.size(),
            method = ?entry.compression(),
            crc32 = entry.crc32(),
            "selected signature block entry"
        );

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|err| AttestError::Archive(format!("decompress {}: {}", name, err)))?;
        return Ok((name, bytes));
    }

    Err(AttestError::SignatureBlockNotFound)
}
