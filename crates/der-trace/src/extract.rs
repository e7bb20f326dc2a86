//! Reconstruction of the on-wire span of the certificates block.

use std::ops::Range;

use crate::error::{DerError, DerResult};
use crate::parser::Parser;

/// Length octets a minimal DER encoder emits for `length`, excluding the tag.
fn length_octets(length: usize) -> usize {
    if length < 0x80 {
        1
    } else if length <= 0xff {
        2
    } else if length <= 0xffff {
        3
    } else if length <= 0xff_ffff {
        4
    } else {
        5
    }
}

/// Locate the recorded `certificates` element and rebuild its full on-wire
/// span (tag + length octets + value) within the parsed buffer.
///
/// The header size is recomputed from the recorded value length and the
/// byte at the resulting offset must equal the recorded tag; a mismatch
/// means the buffer or the trace is corrupt.
pub fn certificate_block_span(parser: &Parser<'_>) -> DerResult<Range<usize>> {
    let element = parser
        .find_element("certificates")
        .ok_or(DerError::MissingElement {
            name: "certificates",
        })?;

    let header = 1 + length_octets(element.length);
    let Some(start) = element.begin.checked_sub(header) else {
        return Err(DerError::HeaderMismatch {
            offset: 0,
            expected_tag: element.tag,
            found: 0,
        });
    };

    let found = parser.buffer()[start];
    if found != element.tag {
        return Err(DerError::HeaderMismatch {
            offset: start,
            expected_tag: element.tag,
            found,
        });
    }

    Ok(start..element.begin + element.length)
}
