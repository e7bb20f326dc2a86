use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerError {
    Truncated {
        offset: usize,
    },
    LengthOfLength {
        offset: usize,
        count: u8,
    },
    SpanOutOfBounds {
        begin: usize,
        length: usize,
        limit: usize,
    },
    UnexpectedTag {
        field: &'static str,
        expected: u8,
        found: u8,
        offset: usize,
    },
    TrailingBytes {
        cursor: usize,
        buffer_len: usize,
    },
    MissingElement {
        name: &'static str,
    },
    HeaderMismatch {
        offset: usize,
        expected_tag: u8,
        found: u8,
    },
}

impl fmt::Display for DerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { offset } => {
                write!(f, "buffer ends inside a tag/length header at offset {}", offset)
            }
            Self::LengthOfLength { offset, count } => write!(
                f,
                "unsupported length-of-length {} at offset {} (1..=4 supported)",
                count, offset
            ),
            Self::SpanOutOfBounds {
                begin,
                length,
                limit,
            } => write!(
                f,
                "value span at offset {} ({} bytes) exceeds limit {}",
                begin, length, limit
            ),
            Self::UnexpectedTag {
                field,
                expected,
                found,
                offset,
            } => write!(
                f,
                "field '{}' expected tag 0x{:02x} but found 0x{:02x} at offset {}",
                field, expected, found, offset
            ),
            Self::TrailingBytes { cursor, buffer_len } => write!(
                f,
                "{} unparsed bytes remain after signer info (cursor {} of {})",
                buffer_len - cursor,
                cursor,
                buffer_len
            ),
            Self::MissingElement { name } => {
                write!(f, "no element named '{}' was recorded", name)
            }
            Self::HeaderMismatch {
                offset,
                expected_tag,
                found,
            } => write!(
                f,
                "reconstructed header at offset {} holds tag 0x{:02x}, expected 0x{:02x}",
                offset, found, expected_tag
            ),
        }
    }
}

impl std::error::Error for DerError {}

pub type DerResult<T> = std::result::Result<T, DerError>;
