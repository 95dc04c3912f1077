//! Shared fixtures for the integration tests and benches.
//!
//! - [`utf16le`] / [`utf16be`] build BOM-prefixed UTF-16 payloads from a
//!   `&str`, so tests state expectations as plain text.
//! - [`Script`] is a source that replays a fixed sequence of chunks,
//!   failures and (async only) stalls. It implements both `std::io::Read`
//!   and `tokio::io::AsyncRead`.
//! - [`read_in_chunks`] drains a reader through a fixed-size buffer.

use std::collections::VecDeque;
use std::io::{self, Read};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};
use unutf16_bom::Bom;

/// BOM-prefixed little-endian UTF-16 encoding of `text`.
#[must_use]
pub fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = Bom::Utf16Le.bytes().to_vec();
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

/// BOM-prefixed big-endian UTF-16 encoding of `text`.
#[must_use]
pub fn utf16be(text: &str) -> Vec<u8> {
    let mut bytes = Bom::Utf16Be.bytes().to_vec();
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    bytes
}

/// Drain `reader` through a buffer of `chunk` bytes, one `read` at a time.
///
/// # Errors
///
/// Returns the first error `reader` produces.
pub fn read_in_chunks<R: Read>(mut reader: R, chunk: usize) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        match reader.read(&mut buf)? {
            0 => return Ok(out),
            n => out.extend_from_slice(&buf[..n]),
        }
    }
}

/// A distinguishable error payload for sources that fail on purpose.
///
/// Tests recover it from the reader's error chain and compare it by
/// value to prove the original cause survived wrapping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("source fault #{0}")]
pub struct SourceFault(pub u32);

impl SourceFault {
    /// An `io::Error` of `kind` carrying this fault.
    #[must_use]
    pub fn into_io(self, kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, self)
    }
}

/// One step of a [`Script`].
#[derive(Debug)]
pub enum Step {
    /// Hand out these bytes, possibly over several reads.
    Data(Vec<u8>),
    /// Fail the next read with this error.
    Fail(io::Error),
    /// Return `Pending` once (async only; skipped by sync reads).
    Stall,
}

/// A source that replays a fixed script, then reports end of stream.
///
/// Each read serves at most one step, so a `Data` step is never merged
/// with the next one. That makes chunk boundaries in the script visible
/// to the reader under test.
#[derive(Debug, Default)]
pub struct Script {
    steps: VecDeque<Step>,
    reads: usize,
}

impl Script {
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            reads: 0,
        }
    }

    /// A script handing out `bytes` in pieces of `chunk` bytes.
    #[must_use]
    pub fn chunked(bytes: &[u8], chunk: usize) -> Self {
        Self::new(bytes.chunks(chunk.max(1)).map(|c| Step::Data(c.to_vec())))
    }

    /// Number of read calls served so far, end-of-stream reads included.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn serve(&mut self, buf: &mut [u8], skip_stalls: bool) -> Option<io::Result<usize>> {
        self.reads += 1;
        loop {
            match self.steps.pop_front() {
                None => return Some(Ok(0)),
                Some(Step::Stall) if skip_stalls => {}
                Some(Step::Stall) => return None,
                Some(Step::Fail(err)) => return Some(Err(err)),
                Some(Step::Data(mut bytes)) => {
                    let n = buf.len().min(bytes.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    if n < bytes.len() {
                        self.steps.push_front(Step::Data(bytes.split_off(n)));
                    }
                    return Some(Ok(n));
                }
            }
        }
    }
}

impl Read for Script {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.serve(buf, true).unwrap_or(Ok(0))
    }
}

impl AsyncRead for Script {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        match this.serve(buf.initialize_unfilled(), false) {
            None => {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Some(result) => {
                buf.advance(result?);
                Poll::Ready(Ok(()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_encode_with_bom() {
        assert_eq!(utf16le("hi"), [0xFF, 0xFE, b'h', 0x00, b'i', 0x00]);
        assert_eq!(utf16be("hi"), [0xFE, 0xFF, 0x00, b'h', 0x00, b'i']);
    }

    #[test]
    fn script_serves_one_step_per_read() {
        let mut script = Script::new([Step::Data(b"ab".to_vec()), Step::Data(b"c".to_vec())]);
        let mut buf = [0u8; 8];
        assert_eq!(script.read(&mut buf).unwrap(), 2);
        assert_eq!(script.read(&mut buf).unwrap(), 1);
        assert_eq!(script.read(&mut buf).unwrap(), 0);
        assert_eq!(script.reads(), 3);
    }

    #[test]
    fn script_splits_long_steps() {
        let script = Script::new([Step::Data(b"abcdef".to_vec())]);
        assert_eq!(read_in_chunks(script, 4).unwrap(), b"abcdef");
    }

    #[test]
    fn script_fails_on_cue() {
        let mut script = Script::new([
            Step::Stall,
            Step::Fail(SourceFault(1).into_io(io::ErrorKind::Other)),
        ]);
        let err = script.read(&mut [0u8; 4]).unwrap_err();
        assert_eq!(err.to_string(), "source fault #1");
    }
}
