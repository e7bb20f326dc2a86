//! Expected-fingerprint handling: hex rendering, the embedded constant,
//! and the prefix comparison.

const COMPILETIME_EXPECTED_FINGERPRINT: Option<&str> =
    option_env!("PACKAGE_ATTEST_EXPECTED_FINGERPRINT");

/// Per-position rotation schedule for the embedded constant. `true` means
/// rotate left on decode.
const ROTATION_SCHEDULE: [(bool, u32); 8] = [
    (true, 3),
    (false, 2),
    (true, 5),
    (false, 1),
    (true, 7),
    (false, 4),
    (true, 2),
    (false, 6),
];

/// Expected certificate-block fingerprint, stored with each byte rotated
/// per [`ROTATION_SCHEDULE`] so the hex string never appears literally in
/// the binary. Obfuscation only: the transform is fixed and keyless, and
/// resists nothing beyond a casual string scan.
const EXPECTED_FINGERPRINT_ROTATED: [u8; 144] = [
    0x2c, 0xc0, 0xc1, 0x64, 0x60, 0x33, 0x4c, 0x0e, 0x66, 0xc0, 0xc1, 0x64,
    0x60, 0x33, 0x4c, 0x0d, 0x66, 0xc0, 0xc1, 0x64, 0x60, 0x13, 0x99, 0xd8,
    0x2c, 0xc0, 0x81, 0x66, 0x60, 0x23, 0x0c, 0x4c, 0x06, 0xc8, 0x81, 0x64,
    0x60, 0x43, 0x0d, 0x58, 0x27, 0x99, 0x89, 0xc6, 0x64, 0x23, 0xcc, 0x0c,
    0x06, 0x91, 0x81, 0x6c, 0x60, 0x93, 0x8c, 0x58, 0x07, 0xd8, 0xa1, 0x70,
    0x70, 0x63, 0x99, 0xcd, 0x06, 0x91, 0x81, 0x62, 0x60, 0x13, 0x0c, 0x98,
    0x06, 0xd4, 0x81, 0x60, 0x66, 0x03, 0x8c, 0x4c, 0x66, 0xc4, 0x89, 0xcc,
    0x66, 0x03, 0x4c, 0x19, 0x06, 0xd8, 0x81, 0x66, 0x6a, 0x53, 0x0c, 0x0d,
    0x06, 0xcc, 0x81, 0xc6, 0x62, 0x63, 0x8d, 0xcc, 0xc6, 0x99, 0xb1, 0xc8,
    0x64, 0x56, 0xcd, 0x8d, 0xc6, 0xd4, 0xb1, 0xca, 0x6c, 0x43, 0x8d, 0x99,
    0xe6, 0xc8, 0x91, 0xca, 0x6e, 0x73, 0x8d, 0x4c, 0xc6, 0x8d, 0xb1, 0xc6,
    0x6c, 0x53, 0xcd, 0x0d, 0x46, 0x95, 0xb1, 0x68, 0x6c, 0x53, 0xcd, 0x8d,
];

/// Lowercase hex, two digits per byte, no separators.
pub fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

/// Undo the per-position rotations of an embedded constant.
pub fn decode_expected_fingerprint(encoded: &[u8]) -> String {
    let mut out = String::with_capacity(encoded.len());
    for (index, byte) in encoded.iter().enumerate() {
        let (left, bits) = ROTATION_SCHEDULE[index % ROTATION_SCHEDULE.len()];
        let decoded = if left {
            byte.rotate_left(bits)
        } else {
            byte.rotate_right(bits)
        };
        out.push(decoded as char);
    }
    out
}

/// The expected fingerprint this build was compiled against: the
/// `PACKAGE_ATTEST_EXPECTED_FINGERPRINT` build-time override when set and
/// valid, otherwise the embedded rotated constant.
pub fn expected_fingerprint() -> String {
    if let Some(raw) = COMPILETIME_EXPECTED_FINGERPRINT {
        if let Some(value) = normalize_fingerprint_hex(raw) {
            return value;
        }
    }
    decode_expected_fingerprint(&EXPECTED_FINGERPRINT_ROTATED)
}

/// Trimmed, lowercased hex or `None` for empty/non-hex input.
pub fn normalize_fingerprint_hex(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if !normalized.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(normalized)
}

/// Byte-for-byte comparison from position 0; the check succeeds once every
/// byte of `expected` has matched, so a longer observed string passes as
/// long as `expected` is its prefix.
pub fn fingerprint_matches(expected: &str, observed: &str) -> bool {
    let expected = expected.as_bytes();
    let observed = observed.as_bytes();
    if expected.len() > observed.len() {
        return false;
    }
    expected.iter().zip(observed).all(|(want, have)| want == have)
}
