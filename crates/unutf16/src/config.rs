/// Default capacity of the buffer placed around an unbuffered source.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Default size of the UTF-8 staging buffer used while decoding UTF-16.
pub const DEFAULT_DECODE_BUFFER: usize = 8 * 1024;

/// Smallest staging buffer the decoder accepts. Any single UTF-16 code
/// point fits in four UTF-8 bytes, so this always leaves room to make
/// progress.
pub const MIN_DECODE_BUFFER: usize = 16;

/// Configuration shared by [`Utf8Reader`](crate::Utf8Reader) and
/// [`AsyncUtf8Reader`](crate::AsyncUtf8Reader).
///
/// ```text
/// ┌─────────────────┬───────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                           │
/// ├─────────────────┼───────────────────────────────────────────────────┤
/// │ buffer_capacity │ BufReader capacity for `new` / `with_config`      │
/// │ decode_buffer   │ UTF-8 staging buffer for the UTF-16 strategies    │
/// │ malformed       │ Error out or substitute U+FFFD on bad UTF-16      │
/// └─────────────────┴───────────────────────────────────────────────────┘
/// ```
///
/// `buffer_capacity` is ignored by the `from_buf_read*` constructors,
/// which reuse the caller's buffer. A capacity of one byte is legal; the
/// lookahead then holds the first byte itself while it peeks the second.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
  /// Capacity of the `BufReader` wrapped around a plain source.
  /// Clamped to at least one byte.
  pub buffer_capacity: usize,

  /// Size of the UTF-8 staging buffer. Clamped to
  /// [`MIN_DECODE_BUFFER`].
  pub decode_buffer: usize,

  /// What the UTF-16 strategies do with malformed input.
  pub malformed: Malformed,
}

impl ReaderConfig {
  pub(crate) fn buffer_capacity(&self) -> usize {
    self.buffer_capacity.max(1)
  }

  pub(crate) fn decode_buffer(&self) -> usize {
    self.decode_buffer.max(MIN_DECODE_BUFFER)
  }
}

impl Default for ReaderConfig {
  /// 8 KiB source buffer, 8 KiB staging buffer, malformed input is an
  /// error.
  fn default() -> Self {
    Self {
      buffer_capacity: DEFAULT_BUFFER_CAPACITY,
      decode_buffer: DEFAULT_DECODE_BUFFER,
      malformed: Malformed::default(),
    }
  }
}

/// Handling of malformed UTF-16 (unpaired surrogates, odd trailing byte).
///
/// Pass-through streams are never validated, so this only matters once a
/// BOM has been seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Malformed {
  /// Deliver everything decoded before the bad sequence, then fail the
  /// next read with [`DecodeError::Malformed`](crate::DecodeError::Malformed).
  /// Reading again resumes after the sequence.
  #[default]
  Error,

  /// Substitute U+FFFD and keep going.
  Replace,
}
