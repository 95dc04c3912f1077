#![no_main]

use std::io::Read;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unutf16::Utf8Reader;
use unutf16_bom::Bom;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    text: String,
    big_endian: bool,
}

// Fuzz target: text -> BOM + UTF-16 -> Utf8Reader roundtrip.
//
// Any valid string encoded as UTF-16 with a leading BOM must decode back
// to its exact UTF-8 bytes.
fuzz_target!(|input: FuzzInput| {
    let bom = if input.big_endian { Bom::Utf16Be } else { Bom::Utf16Le };
    let mut encoded = bom.bytes().to_vec();
    for unit in input.text.encode_utf16() {
        let bytes = if input.big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        };
        encoded.extend_from_slice(&bytes);
    }

    let mut out = Vec::new();
    Utf8Reader::new(&encoded[..]).read_to_end(&mut out).unwrap();
    assert_eq!(out, input.text.as_bytes());
});
