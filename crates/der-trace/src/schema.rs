//! Schema walk for a ContentInfo-wrapped PKCS#7 SignedData blob.
//!
//! Drives the tag/length primitive through the fixed SignedData, SignerInfo
//! and Certificate layouts, recording every matched field in the element
//! trace. Optional fields are detected by peeking the context-specific tag;
//! any mandatory-field mismatch or span overrun aborts the whole parse.

use crate::error::{DerError, DerResult};
use crate::parser::{tag, Parser};

/// Walk the full blob. On success the buffer has been consumed exactly and
/// the parser's trace holds one element per matched schema field.
pub fn walk_signed_data(parser: &mut Parser<'_>) -> DerResult<()> {
    let len = parser.expect_tag(tag::SEQUENCE, "contentInfo", 0)?;
    parser.ensure_fits(len)?;

    // contentType is skipped unread; the walk trusts schema position.
    let len = parser.expect_tag(tag::OBJECT_IDENTIFIER, "contentType", 1)?;
    parser.skip(len)?;

    let len = parser.expect_tag(tag::CONTEXT_0, "content", 1)?;
    parser.ensure_fits(len)?;

    walk_signed_data_body(parser)?;
    parser.require_end()
}

fn walk_signed_data_body(parser: &mut Parser<'_>) -> DerResult<()> {
    let len = parser.expect_tag(tag::SEQUENCE, "signedData", 2)?;
    parser.ensure_fits(len)?;

    let len = parser.expect_tag(tag::INTEGER, "version (signedData)", 3)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SET, "digestAlgorithms", 3)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "contentInfo (signedData)", 3)?;
    parser.skip(len)?;

    if let Some(certs_len) = parser.consume_tag(tag::CONTEXT_0, "certificates", 3)? {
        parser.ensure_fits(certs_len)?;
        let block_begin = parser.position();
        walk_certificate(parser, 4)?;
        // The block may hold a chain; only the first certificate is
        // structurally validated, the rest of the span is stepped over so
        // the remaining SignedData fields line up.
        let consumed = parser.position() - block_begin;
        if consumed > certs_len {
            return Err(DerError::SpanOutOfBounds {
                begin: block_begin,
                length: certs_len,
                limit: block_begin + certs_len,
            });
        }
        parser.skip(certs_len - consumed)?;
    }

    if let Some(len) = parser.consume_tag(tag::CONTEXT_1, "crls", 3)? {
        parser.skip(len)?;
    }

    let len = parser.expect_tag(tag::SET, "signerInfos", 3)?;
    parser.ensure_fits(len)?;
    walk_signer_info(parser)
}

/// One SignerInfo, the first element of the signerInfos SET.
fn walk_signer_info(parser: &mut Parser<'_>) -> DerResult<()> {
    let len = parser.expect_tag(tag::SEQUENCE, "signerInfo", 4)?;
    parser.ensure_fits(len)?;

    let len = parser.expect_tag(tag::INTEGER, "version (signerInfo)", 5)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "issuerAndSerialNumber", 5)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "digestAlgorithm", 5)?;
    parser.skip(len)?;
    if let Some(len) = parser.consume_tag(tag::CONTEXT_0, "authenticatedAttributes", 5)? {
        parser.skip(len)?;
    }
    let len = parser.expect_tag(tag::SEQUENCE, "digestEncryptionAlgorithm", 5)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::OCTET_STRING, "encryptedDigest", 5)?;
    parser.skip(len)?;
    if let Some(len) = parser.consume_tag(tag::CONTEXT_1, "unauthenticatedAttributes", 5)? {
        parser.skip(len)?;
    }
    Ok(())
}

/// Structural validation of one X.509 Certificate. Contents are unused
/// downstream; the walk only has to leave the cursor correctly positioned.
fn walk_certificate(parser: &mut Parser<'_>, level: u8) -> DerResult<()> {
    let len = parser.expect_tag(tag::SEQUENCE, "certificate", level)?;
    parser.ensure_fits(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "tbsCertificate", level + 1)?;
    parser.ensure_fits(len)?;

    if let Some(len) = parser.consume_tag(tag::CONTEXT_0, "version (tbsCertificate)", level + 2)? {
        parser.skip(len)?;
    }
    let len = parser.expect_tag(tag::INTEGER, "serialNumber", level + 2)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "signature", level + 2)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "issuer", level + 2)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "validity", level + 2)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "subject", level + 2)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::SEQUENCE, "subjectPublicKeyInfo", level + 2)?;
    parser.skip(len)?;
    if let Some(len) = parser.consume_tag(tag::CONTEXT_PRIMITIVE_1, "issuerUniqueID", level + 2)? {
        parser.skip(len)?;
    }
    if let Some(len) = parser.consume_tag(tag::CONTEXT_PRIMITIVE_2, "subjectUniqueID", level + 2)? {
        parser.skip(len)?;
    }
    if let Some(len) = parser.consume_tag(tag::CONTEXT_3, "extensions", level + 2)? {
        parser.skip(len)?;
    }

    let len = parser.expect_tag(tag::SEQUENCE, "signatureAlgorithm", level + 1)?;
    parser.skip(len)?;
    let len = parser.expect_tag(tag::BIT_STRING, "signatureValue", level + 1)?;
    parser.skip(len)?;
    Ok(())
}
