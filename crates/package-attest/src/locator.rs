//! Locates the package archive backing the current process.
//!
//! The process's own identity string names the installed package; the
//! mapping table then yields the on-disk archive the loader has open.

use std::fs;
use std::path::PathBuf;

const PROC_SELF_CMDLINE: &str = "/proc/self/cmdline";
const PROC_SELF_MAPS: &str = "/proc/self/maps";
const PACKAGE_ARCHIVE_EXTENSION: &str = ".apk";

/// Absolute path of the package archive backing this process, or `None`
/// when process metadata is unreadable or no mapping matches.
pub fn locate_package_archive(package_name: Option<&str>) -> Option<PathBuf> {
    let package = match package_name {
        Some(name) => name.to_string(),
        None => {
            let cmdline = fs::read(PROC_SELF_CMDLINE).ok()?;
            package_name_from_cmdline(&cmdline)?
        }
    };
    let maps = fs::read_to_string(PROC_SELF_MAPS).ok()?;
    find_package_mapping(&maps, &package)
}

/// Package name from the raw NUL-separated identity string. A `:worker`
/// style suffix names a secondary process of the same package and is
/// stripped.
pub fn package_name_from_cmdline(raw: &[u8]) -> Option<String> {
    let first = raw.split(|byte| *byte == 0).next()?;
    let text = std::str::from_utf8(first).ok()?;
    let name = text.split(':').next().unwrap_or(text).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// First mapped file whose path contains `package` and carries the package
/// archive extension (case-insensitive).
pub fn find_package_mapping(maps: &str, package: &str) -> Option<PathBuf> {
    for line in maps.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Format: start-end perms offset dev inode pathname
        let mut parts = line.splitn(6, char::is_whitespace);
        let _range = parts.next();
        let _perms = parts.next();
        let _offset = parts.next();
        let _dev = parts.next();
        let _inode = parts.next();
        let Some(path) = parts.next().map(str::trim) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }

        if path.contains(package)
            && path
                .to_ascii_lowercase()
                .ends_with(PACKAGE_ARCHIVE_EXTENSION)
        {
            return Some(PathBuf::from(path));
        }
    }
    None
}
