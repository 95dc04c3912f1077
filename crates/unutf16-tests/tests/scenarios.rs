//! End-to-end decoding scenarios for [`Utf8Reader`].
//!
//! Three families of input:
//!
//! - **UTF-16LE with BOM** (`FF FE ...`): output is the UTF-8 encoding of
//!   the text, BOM not emitted.
//! - **UTF-16BE with BOM** (`FE FF ...`): same, big-endian.
//! - **Everything else**: output is byte-identical to input, including
//!   empty input, a lone `FF`, and a UTF-8 BOM.

use std::io::Read;

use unutf16::{Bom, Detected, Utf8Reader};
use unutf16_tests::{utf16be, utf16le};

fn decode(input: &[u8]) -> (Vec<u8>, Option<Detected>) {
    let mut reader = Utf8Reader::new(input);
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .expect("in-memory decode should not fail");
    (out, reader.detected())
}

// ── Reference payloads ────────────────────────────────────────────────────────

#[test]
fn hello_little_endian() {
    let input = [
        0xFF, 0xFE, 0x68, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F, 0x00,
    ];
    let (out, detected) = decode(&input);
    assert_eq!(out, b"hello");
    assert_eq!(detected, Some(Detected::Utf16(Bom::Utf16Le)));
}

#[test]
fn hello_big_endian() {
    let input = [
        0xFE, 0xFF, 0x00, 0x68, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F,
    ];
    let (out, detected) = decode(&input);
    assert_eq!(out, b"hello");
    assert_eq!(detected, Some(Detected::Utf16(Bom::Utf16Be)));
}

#[test]
fn plain_ascii_unchanged() {
    let (out, detected) = decode(b"hello world");
    assert_eq!(out, b"hello world");
    assert_eq!(detected, Some(Detected::PassThrough));
}

#[test]
fn empty_input_is_clean_end_of_stream() {
    let mut reader = Utf8Reader::new(&b""[..]);
    let mut buf = [0u8; 16];
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
}

// ── UTF-16 content ────────────────────────────────────────────────────────────

#[test]
fn non_ascii_text_both_byte_orders() {
    let text = "Grüße, 世界! 🦀 𝄞";
    assert_eq!(decode(&utf16le(text)).0, text.as_bytes());
    assert_eq!(decode(&utf16be(text)).0, text.as_bytes());
}

#[test]
fn bom_only_decodes_to_nothing() {
    let (out, detected) = decode(&[0xFF, 0xFE]);
    assert!(out.is_empty());
    assert_eq!(detected, Some(Detected::Utf16(Bom::Utf16Le)));
}

#[test]
fn second_bom_is_kept_as_content() {
    // Only the leading BOM is a marker; a later U+FEFF is text.
    let text = "\u{feff}inner";
    assert_eq!(decode(&utf16le(text)).0, text.as_bytes());
}

#[test]
fn large_payload() {
    let text = "line of text with ünïcödé 🚀\n".repeat(2_000);
    assert_eq!(decode(&utf16be(&text)).0, text.as_bytes());
}

// ── Pass-through ──────────────────────────────────────────────────────────────

#[test]
fn single_byte_inputs_pass_through() {
    for byte in [0x00, b'a', 0xFE, 0xFF] {
        let (out, detected) = decode(&[byte]);
        assert_eq!(out, [byte]);
        assert_eq!(detected, Some(Detected::PassThrough));
    }
}

#[test]
fn utf8_bom_passes_through() {
    let input = b"\xEF\xBB\xBFhello";
    assert_eq!(decode(input).0, input);
}

#[test]
fn near_miss_marks_pass_through() {
    for input in [&[0xFF, 0xFF, 0x00][..], &[0xFE, 0xFE], &[0x00, 0xFF, 0xFE]] {
        let (out, detected) = decode(input);
        assert_eq!(out, input);
        assert_eq!(detected, Some(Detected::PassThrough));
    }
}

#[test]
fn invalid_utf8_is_not_validated() {
    let input = [b'o', b'k', 0xC3, 0x28, 0xFF];
    assert_eq!(decode(&input).0, input);
}

#[test]
fn bomless_utf16_is_treated_as_opaque() {
    let input = [b'h', 0x00, b'i', 0x00];
    assert_eq!(decode(&input).0, input);
}
