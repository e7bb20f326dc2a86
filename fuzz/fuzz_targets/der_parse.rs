#![no_main]

use der_trace::{certificate_block_span, walk_signed_data, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(data);
    if walk_signed_data(&mut parser).is_ok() {
        // An accepted walk consumed the buffer exactly and every recorded
        // span must sit inside it.
        assert_eq!(parser.position(), data.len());
        for element in parser.elements() {
            assert!(element.begin + element.length <= data.len());
        }
        let _ = certificate_block_span(&parser);
    }
});
