#![no_main]

use libfuzzer_sys::fuzz_target;
use unutf16_bom::{Bom, BOM_LEN};

// Fuzz target: Bom::detect on arbitrary prefixes.
//
// A detected mark must be exactly the first BOM_LEN bytes of the input,
// and inputs shorter than BOM_LEN never detect.
fuzz_target!(|data: &[u8]| {
    match Bom::detect(data) {
        Some(bom) => assert_eq!(&data[..BOM_LEN], &bom.bytes()[..]),
        None => {
            if let Some(prefix) = data.get(..BOM_LEN) {
                assert_ne!(prefix, Bom::Utf16Le.bytes());
                assert_ne!(prefix, Bom::Utf16Be.bytes());
            }
        }
    }
});
