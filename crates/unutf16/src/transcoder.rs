use std::io;

use encoding_rs::{CoderResult, Decoder, DecoderResult, Encoding, UTF_16BE, UTF_16LE};
use tracing::debug;
use unutf16_bom::Bom;

use crate::config::{Malformed, ReaderConfig};
use crate::error::DecodeError;

/// Sans-I/O bridge between a pull-read byte source and an
/// `encoding_rs` UTF-16 decoder.
///
/// The decoder can't write straight into the caller's buffer: a one-byte
/// read can't hold a three-byte UTF-8 sequence. Output is staged in a
/// fixed buffer and handed out across as many reads as it takes.
///
/// The sync and async readers drive it the same way:
///
/// ```text
///   loop {
///     if let Some(result) = transcoder.drain(buf) { return result }
///     let input = source.fill_buf()?;       // empty = end of stream
///     let used = transcoder.feed(input);
///     source.consume(used);
///   }
/// ```
pub(crate) struct Transcoder {
  decoder: Decoder,
  malformed: Malformed,
  out: Box<[u8]>,
  start: usize,
  end: usize,
  /// Source bytes consumed so far, BOM included.
  consumed: u64,
  /// Malformed input found by the last `feed`, reported once the output
  /// decoded ahead of it has been drained.
  pending: Option<DecodeError>,
  finished: bool,
}

impl Transcoder {
  pub(crate) fn new(bom: Bom, config: &ReaderConfig) -> Self {
    let encoding: &'static Encoding = match bom {
      Bom::Utf16Le => UTF_16LE,
      Bom::Utf16Be => UTF_16BE,
    };
    Self {
      // strips the BOM only if it matches `encoding`, which it does
      decoder: encoding.new_decoder_with_bom_removal(),
      malformed: config.malformed,
      out: vec![0; config.decode_buffer()].into_boxed_slice(),
      start: 0,
      end: 0,
      consumed: 0,
      pending: None,
      finished: false,
    }
  }

  /// Answer a read without touching the source, if possible.
  ///
  /// Returns `None` when the staging buffer is empty and the stream is
  /// not over: the caller must [`feed`](Self::feed) more input first.
  pub(crate) fn drain(&mut self, buf: &mut [u8]) -> Option<io::Result<usize>> {
    if buf.is_empty() {
      return Some(Ok(0));
    }
    if self.start < self.end {
      let n = buf.len().min(self.end - self.start);
      buf[..n].copy_from_slice(&self.out[self.start..self.start + n]);
      self.start += n;
      return Some(Ok(n));
    }
    if let Some(err) = self.pending.take() {
      return Some(Err(err.into()));
    }
    if self.finished {
      return Some(Ok(0));
    }
    None
  }

  /// Decode as much of `input` as fits in the staging buffer and return
  /// how many input bytes were used. An empty `input` means the source
  /// hit end of stream.
  ///
  /// Must only be called after [`drain`](Self::drain) returned `None`.
  pub(crate) fn feed(&mut self, input: &[u8]) -> usize {
    debug_assert!(self.start == self.end && self.pending.is_none());
    let last = input.is_empty();

    let (read, written) = match self.malformed {
      Malformed::Error => {
        let (result, read, written) =
          self
            .decoder
            .decode_to_utf8_without_replacement(input, &mut self.out, last);
        match result {
          DecoderResult::InputEmpty => self.finished = last,
          DecoderResult::OutputFull => {}
          DecoderResult::Malformed(len, after) => {
            let end = self.consumed + read as u64 - u64::from(after);
            let offset = end - u64::from(len);
            let encoding = self.decoder.encoding().name();
            debug!(encoding, offset, len, "malformed input");
            self.pending = Some(DecodeError::Malformed {
              encoding,
              offset,
              len,
            });
          }
        }
        (read, written)
      }
      Malformed::Replace => {
        let (result, read, written, replaced) =
          self.decoder.decode_to_utf8(input, &mut self.out, last);
        if replaced {
          debug!(
            encoding = self.decoder.encoding().name(),
            "replaced malformed input with U+FFFD"
          );
        }
        if result == CoderResult::InputEmpty {
          self.finished = last;
        }
        (read, written)
      }
    };

    self.consumed += read as u64;
    self.start = 0;
    self.end = written;
    read
  }
}
