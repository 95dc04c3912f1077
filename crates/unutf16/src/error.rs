use std::io;

/// Errors raised by the readers themselves.
///
/// Both readers implement the standard byte-stream traits, so these are
/// never returned bare: they travel inside an [`io::Error`] and can be
/// recovered with [`DecodeError::from_io`] or [`io::Error::into_inner`].
/// Errors from the underlying source during steady-state reads are
/// returned untouched and do not appear here.
///
/// ```text
///   io::Error
///   └── DecodeError
///       ├── PeekBom(io::Error)   ← source failed while sniffing the BOM
///       └── Malformed            ← codec rejected a UTF-16 sequence
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  /// The source failed before the first two bytes could be inspected.
  ///
  /// End of stream is not a failure here; a short stream simply has no
  /// BOM. The wrapping [`io::Error`] carries the cause's [`io::ErrorKind`]
  /// and the reader stays uninitialized, so the next read resumes
  /// detection.
  #[error("failed to peek BOM: {0}")]
  PeekBom(#[source] io::Error),

  /// The decoder hit a malformed UTF-16 sequence: an unpaired surrogate
  /// or an odd trailing byte at end of stream.
  ///
  /// `offset` counts source bytes from the start of the stream, BOM
  /// included. Reading again continues after the bad sequence.
  #[error("malformed {encoding} input: {len} byte(s) at offset {offset}")]
  Malformed {
    encoding: &'static str,
    offset: u64,
    len: u8,
  },
}

impl DecodeError {
  /// Find the `DecodeError` inside an [`io::Error`] returned by a reader.
  ///
  /// Returns `None` for errors that came straight from the source.
  #[must_use]
  pub fn from_io(err: &io::Error) -> Option<&Self> {
    err.get_ref().and_then(|inner| inner.downcast_ref::<Self>())
  }

  /// The source error behind a failed BOM lookahead.
  #[must_use]
  pub fn peek_cause(&self) -> Option<&io::Error> {
    match self {
      Self::PeekBom(cause) => Some(cause),
      Self::Malformed { .. } => None,
    }
  }
}

impl From<DecodeError> for io::Error {
  fn from(err: DecodeError) -> Self {
    let kind = match &err {
      DecodeError::PeekBom(cause) => cause.kind(),
      DecodeError::Malformed { .. } => io::ErrorKind::InvalidData,
    };
    io::Error::new(kind, err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn peek_bom_message_names_operation_and_cause() {
    let err = DecodeError::PeekBom(io::Error::other("disk on fire"));
    assert_eq!(err.to_string(), "failed to peek BOM: disk on fire");
  }

  #[test]
  fn peek_bom_keeps_cause_kind() {
    let err: io::Error =
      DecodeError::PeekBom(io::Error::from(io::ErrorKind::ConnectionReset)).into();
    assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
  }

  #[test]
  fn malformed_is_invalid_data() {
    let err: io::Error = DecodeError::Malformed {
      encoding: "UTF-16LE",
      offset: 4,
      len: 2,
    }
    .into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(
      err.to_string(),
      "malformed UTF-16LE input: 2 byte(s) at offset 4"
    );
  }

  #[test]
  fn from_io_finds_wrapped_error() {
    let err: io::Error = DecodeError::PeekBom(io::Error::other("boom")).into();
    let decode = DecodeError::from_io(&err).unwrap();
    assert_eq!(decode.peek_cause().unwrap().to_string(), "boom");
  }

  #[test]
  fn from_io_ignores_plain_errors() {
    let err = io::Error::new(io::ErrorKind::UnexpectedEof, "short");
    assert!(DecodeError::from_io(&err).is_none());
  }

  #[test]
  fn source_chain_reaches_cause() {
    use std::error::Error as _;

    let err = DecodeError::PeekBom(io::Error::other("boom"));
    assert_eq!(err.source().unwrap().to_string(), "boom");
  }
}
