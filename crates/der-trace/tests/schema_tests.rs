use der_trace::{walk_signed_data, DerError, Parser};

fn length_bytes(length: usize) -> Vec<u8> {
    if length < 0x80 {
        return vec![length as u8];
    }
    let mut be = length.to_be_bytes().to_vec();
    while be.len() > 1 && be[0] == 0 {
        be.remove(0);
    }
    let mut out = vec![0x80 | be.len() as u8];
    out.extend_from_slice(&be);
    out
}

fn tlv(tag: u8, value: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(length_bytes(value.len()));
    out.extend_from_slice(value);
    out
}

fn minimal_signer_infos(set_tag: u8) -> Vec<u8> {
    let signer_info = tlv(
        0x30,
        &[
            tlv(0x02, &[1]),                          // version
            tlv(0x30, &[]),                           // issuerAndSerialNumber
            tlv(0x30, &[]),                           // digestAlgorithm
            tlv(0x30, &[]),                           // digestEncryptionAlgorithm
            tlv(0x04, &[0xde, 0xad, 0xbe, 0xef]),     // encryptedDigest
        ]
        .concat(),
    );
    tlv(set_tag, &signer_info)
}

fn build_blob(certificates: Option<&[u8]>, signer_infos_set_tag: u8) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend(tlv(0x02, &[1])); // version
    body.extend(tlv(0x31, &[])); // digestAlgorithms
    body.extend(tlv(0x30, &[])); // contentInfo
    if let Some(certs) = certificates {
        body.extend_from_slice(certs);
    }
    body.extend(minimal_signer_infos(signer_infos_set_tag));

    let signed_data = tlv(0x30, &body);
    let content = tlv(0xa0, &signed_data);
    let content_type = tlv(0x06, &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02]);
    tlv(0x30, &[content_type, content].concat())
}

fn minimal_certificate() -> Vec<u8> {
    let tbs = tlv(
        0x30,
        &[
            tlv(0x02, &[1]), // serialNumber
            tlv(0x30, &[]),  // signature
            tlv(0x30, &[]),  // issuer
            tlv(0x30, &[]),  // validity
            tlv(0x30, &[]),  // subject
            tlv(0x30, &[]),  // subjectPublicKeyInfo
        ]
        .concat(),
    );
    tlv(
        0x30,
        &[tbs, tlv(0x30, &[]), tlv(0x03, &[0x00])].concat(),
    )
}

#[test]
fn minimal_blob_without_certificates_is_accepted() {
    let blob = build_blob(None, 0x31);
    let mut parser = Parser::new(&blob);

    walk_signed_data(&mut parser).expect("accepted");

    assert_eq!(parser.position(), blob.len());
    let names = parser
        .elements()
        .iter()
        .map(|element| element.name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "contentInfo",
            "contentType",
            "content",
            "signedData",
            "version (signedData)",
            "digestAlgorithms",
            "contentInfo (signedData)",
            "signerInfos",
            "signerInfo",
            "version (signerInfo)",
            "issuerAndSerialNumber",
            "digestAlgorithm",
            "digestEncryptionAlgorithm",
            "encryptedDigest",
        ]
    );
}

#[test]
fn replaced_signer_infos_tag_is_rejected() {
    let blob = build_blob(None, 0x05);
    let mut parser = Parser::new(&blob);

    let err = walk_signed_data(&mut parser).expect_err("rejected");

    assert!(matches!(
        err,
        DerError::UnexpectedTag {
            field: "signerInfos",
            ..
        }
    ));
}

#[test]
fn blob_with_certificate_chain_is_accepted() {
    let single = tlv(0xa0, &minimal_certificate());
    let blob = build_blob(Some(single.as_slice()), 0x31);
    let mut parser = Parser::new(&blob);
    walk_signed_data(&mut parser).expect("single certificate accepted");

    let two_certs = [minimal_certificate(), minimal_certificate()].concat();
    let chain = tlv(0xa0, &two_certs);
    let blob = build_blob(Some(chain.as_slice()), 0x31);
    let mut parser = Parser::new(&blob);
    walk_signed_data(&mut parser).expect("certificate chain accepted");
    assert_eq!(parser.position(), blob.len());
}

#[test]
fn certificate_optionals_are_walked_when_present() {
    let tbs = tlv(
        0x30,
        &[
            tlv(0xa0, &tlv(0x02, &[2])), // version [0] EXPLICIT
            tlv(0x02, &[1]),
            tlv(0x30, &[]),
            tlv(0x30, &[]),
            tlv(0x30, &[]),
            tlv(0x30, &[]),
            tlv(0x30, &[]),
            tlv(0xa3, &tlv(0x30, &[])), // extensions [3]
        ]
        .concat(),
    );
    let certificate = tlv(
        0x30,
        &[tbs, tlv(0x30, &[]), tlv(0x03, &[0x00])].concat(),
    );
    let certificates_field = tlv(0xa0, &certificate);
    let blob = build_blob(Some(certificates_field.as_slice()), 0x31);

    let mut parser = Parser::new(&blob);
    walk_signed_data(&mut parser).expect("accepted");

    let names = parser
        .elements()
        .iter()
        .map(|element| element.name)
        .collect::<Vec<_>>();
    assert!(names.contains(&"version (tbsCertificate)"));
    assert!(names.contains(&"extensions"));
    assert!(names.contains(&"signatureValue"));
}

#[test]
fn crls_field_is_stepped_over_when_present() {
    let signer_infos = minimal_signer_infos(0x31);
    let mut body = Vec::new();
    body.extend(tlv(0x02, &[1]));
    body.extend(tlv(0x31, &[]));
    body.extend(tlv(0x30, &[]));
    body.extend(tlv(0xa1, &[0x30, 0x00])); // crls [1]
    body.extend(signer_infos);

    let signed_data = tlv(0x30, &body);
    let content = tlv(0xa0, &signed_data);
    let content_type = tlv(0x06, &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02]);
    let blob = tlv(0x30, &[content_type, content].concat());

    let mut parser = Parser::new(&blob);
    walk_signed_data(&mut parser).expect("accepted");
    assert!(parser.find_element("crls").is_some());
}

#[test]
fn buffer_truncated_one_byte_short_is_rejected() {
    let blob = build_blob(None, 0x31);
    let truncated = &blob[..blob.len() - 1];
    let mut parser = Parser::new(truncated);

    let err = walk_signed_data(&mut parser).expect_err("rejected");

    assert!(matches!(err, DerError::SpanOutOfBounds { .. }));
}

#[test]
fn trailing_bytes_after_signer_info_are_rejected() {
    let mut blob = build_blob(None, 0x31);
    blob.push(0x00);
    let mut parser = Parser::new(&blob);

    let err = walk_signed_data(&mut parser).expect_err("rejected");

    assert!(matches!(err, DerError::TrailingBytes { .. }));
}

#[test]
fn parsing_the_same_buffer_twice_yields_identical_traces() {
    let certificates_field = tlv(0xa0, &minimal_certificate());
    let blob = build_blob(Some(certificates_field.as_slice()), 0x31);

    let mut first = Parser::new(&blob);
    walk_signed_data(&mut first).expect("accepted");
    let mut second = Parser::new(&blob);
    walk_signed_data(&mut second).expect("accepted");

    assert_eq!(first.elements(), second.elements());
}

#[test]
fn every_recorded_span_stays_inside_the_buffer() {
    let certificates_field = tlv(0xa0, &minimal_certificate());
    let blob = build_blob(Some(certificates_field.as_slice()), 0x31);
    let mut parser = Parser::new(&blob);

    walk_signed_data(&mut parser).expect("accepted");

    for element in parser.elements() {
        assert!(
            element.begin + element.length <= blob.len(),
            "element '{}' overruns the buffer",
            element.name
        );
    }
}
