use std::io::{self, BufRead, BufReader, Read};

use tracing::debug;
use unutf16_bom::Bom;

use crate::config::ReaderConfig;
use crate::error::DecodeError;
use crate::lookahead::Lookahead;
use crate::strategy::Strategy;

/// What a reader decided its source contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detected {
  /// No UTF-16 BOM; bytes are forwarded unchanged.
  PassThrough,
  /// A UTF-16 BOM; content is decoded to UTF-8.
  Utf16(Bom),
}

/// A reader that yields UTF-8 from a source that may be UTF-16.
///
/// Nothing is read at construction. The first call to [`read`](Read::read)
/// looks at the first two bytes of the source and picks a strategy for
/// the rest of the stream:
///
/// ```text
///   new(source)          no I/O
///        │
///   first read ──► sniff BOM ──► FF FE ─► decode UTF-16LE ─┐
///                      │    └──► FE FF ─► decode UTF-16BE ─┼─► every later read
///                      └──────► other ─► pass through ────┘
/// ```
///
/// The sniffed bytes are never lost: a BOM is consumed by the decoder,
/// anything else is delivered as the first bytes of output. Streams
/// shorter than two bytes have no BOM and pass through.
///
/// If the source fails while the BOM is being sniffed, `read` returns an
/// error wrapping [`DecodeError::PeekBom`] and the reader stays
/// uninitialized; the next `read` tries again from where it stopped.
/// After detection, source errors come back unchanged.
///
/// To keep ownership of the source, pass `&mut source`.
///
/// # Example
///
/// ```rust
/// use std::io::Read;
/// use unutf16::Utf8Reader;
///
/// let utf16le: &[u8] = &[0xFF, 0xFE, b'h', 0, b'i', 0];
/// let mut text = String::new();
/// Utf8Reader::new(utf16le).read_to_string(&mut text)?;
/// assert_eq!(text, "hi");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Utf8Reader<R> {
  source: Lookahead<R>,
  /// `None` until detection has finished; never reset afterwards.
  strategy: Option<Strategy>,
  config: ReaderConfig,
}

impl<R: Read> Utf8Reader<BufReader<R>> {
  /// Wrap an unbuffered source with the default configuration.
  #[must_use]
  pub fn new(source: R) -> Self {
    Self::with_config(source, ReaderConfig::default())
  }

  /// Wrap an unbuffered source in a `BufReader` of
  /// `config.buffer_capacity` bytes.
  #[must_use]
  pub fn with_config(source: R, config: ReaderConfig) -> Self {
    let buffered = BufReader::with_capacity(config.buffer_capacity(), source);
    Self::from_buf_read_with_config(buffered, config)
  }
}

impl<R: BufRead> Utf8Reader<R> {
  /// Use an already-buffered source as is.
  #[must_use]
  pub fn from_buf_read(source: R) -> Self {
    Self::from_buf_read_with_config(source, ReaderConfig::default())
  }

  /// Use an already-buffered source as is. `config.buffer_capacity` is
  /// ignored.
  #[must_use]
  pub fn from_buf_read_with_config(source: R, config: ReaderConfig) -> Self {
    Self {
      source: Lookahead::new(source),
      strategy: None,
      config,
    }
  }

  /// The strategy chosen on the first read, or `None` before that (and
  /// after a failed first read).
  #[must_use]
  pub fn detected(&self) -> Option<Detected> {
    self.strategy.as_ref().map(Strategy::detected)
  }

  /// Borrow the underlying source.
  ///
  /// Reading from it directly would desynchronize the decoder.
  #[must_use]
  pub fn get_ref(&self) -> &R {
    self.source.get_ref()
  }

  /// Unwrap the underlying source. Output still staged in the reader and
  /// a lookahead byte still held by it are discarded.
  #[must_use]
  pub fn into_inner(self) -> R {
    self.source.into_inner()
  }

  fn initialize(source: &mut Lookahead<R>, config: &ReaderConfig) -> io::Result<Strategy> {
    let bom = source.sniff().map_err(|err| {
      debug!(error = %err, "BOM lookahead failed");
      DecodeError::PeekBom(err)
    })?;
    Ok(Strategy::select(bom, config))
  }
}

impl<R: BufRead> Read for Utf8Reader<R> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let strategy = match &mut self.strategy {
      Some(strategy) => strategy,
      slot @ None => slot.insert(Self::initialize(&mut self.source, &self.config)?),
    };
    strategy.read(&mut self.source, buf)
  }
}
