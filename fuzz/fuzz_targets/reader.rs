#![no_main]

use std::io::{BufReader, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unutf16::{Detected, Malformed, ReaderConfig, Utf8Reader};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    buffer_capacity: u8,
    decode_buffer: u8,
    read_size: u8,
    replace: bool,
}

// Fuzz target: Utf8Reader over arbitrary bytes and buffer shapes.
//
// Catches bugs in:
// - Lookahead restitching with tiny BufReader capacities
// - Staging output through tiny decode buffers
// - Malformed UTF-16 reporting (must be InvalidData, never a panic)
// - Pass-through identity when no BOM is present
fuzz_target!(|input: FuzzInput| {
    let config = ReaderConfig {
        buffer_capacity: usize::from(input.buffer_capacity),
        decode_buffer: usize::from(input.decode_buffer),
        malformed: if input.replace {
            Malformed::Replace
        } else {
            Malformed::Error
        },
    };
    let capacity = usize::from(input.buffer_capacity).max(1);
    let source = BufReader::with_capacity(capacity, &input.data[..]);
    let mut reader = Utf8Reader::from_buf_read_with_config(source, config);

    let mut out = Vec::new();
    let mut buf = vec![0u8; usize::from(input.read_size).max(1)];
    let result = loop {
        match reader.read(&mut buf) {
            Ok(0) => break Ok(()),
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(err) => break Err(err),
        }
    };

    match reader.detected() {
        Some(Detected::PassThrough) => {
            result.unwrap();
            assert_eq!(out, input.data);
        }
        Some(Detected::Utf16(bom)) => {
            assert_eq!(&input.data[..2], &bom.bytes()[..]);
            match result {
                Ok(()) => assert!(String::from_utf8(out).is_ok()),
                Err(err) => {
                    assert!(!input.replace);
                    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
                }
            }
        }
        None => panic!("reader finished without choosing a strategy"),
    }
});
