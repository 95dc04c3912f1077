use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncBufRead, AsyncRead, BufReader, ReadBuf};
use tracing::debug;

use crate::config::ReaderConfig;
use crate::error::DecodeError;
use crate::lookahead::Lookahead;
use crate::reader::Detected;
use crate::strategy::Strategy;

/// Asynchronous counterpart of [`Utf8Reader`](crate::Utf8Reader) for
/// `tokio::io` sources (files, sockets, HTTP bodies, ...).
///
/// Detection happens on the first `poll_read` and may span several polls:
/// if the source returns `Pending` after one byte, that byte is held and
/// detection resumes on the next poll. Strategy selection, error wrapping
/// and the retry-after-failure behavior match the sync reader.
///
/// # Example
///
/// ```rust,no_run
/// use tokio::io::{AsyncRead, AsyncReadExt};
/// use unutf16::AsyncUtf8Reader;
///
/// async fn to_string(source: impl AsyncRead + Unpin) -> std::io::Result<String> {
///     let mut text = String::new();
///     AsyncUtf8Reader::new(source).read_to_string(&mut text).await?;
///     Ok(text)
/// }
/// ```
pub struct AsyncUtf8Reader<R> {
  source: Lookahead<R>,
  strategy: Option<Strategy>,
  config: ReaderConfig,
}

impl<R: AsyncRead + Unpin> AsyncUtf8Reader<BufReader<R>> {
  /// Wrap an unbuffered source with the default configuration.
  #[must_use]
  pub fn new(source: R) -> Self {
    Self::with_config(source, ReaderConfig::default())
  }

  /// Wrap an unbuffered source in a `tokio::io::BufReader` of
  /// `config.buffer_capacity` bytes.
  #[must_use]
  pub fn with_config(source: R, config: ReaderConfig) -> Self {
    let buffered = BufReader::with_capacity(config.buffer_capacity(), source);
    Self::from_buf_read_with_config(buffered, config)
  }
}

impl<R: AsyncBufRead + Unpin> AsyncUtf8Reader<R> {
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

  /// The strategy chosen on the first read, if it has completed.
  #[must_use]
  pub fn detected(&self) -> Option<Detected> {
    self.strategy.as_ref().map(Strategy::detected)
  }

  /// Borrow the underlying source.
  #[must_use]
  pub fn get_ref(&self) -> &R {
    self.source.get_ref()
  }

  /// Unwrap the underlying source, discarding staged output and any held
  /// lookahead byte.
  #[must_use]
  pub fn into_inner(self) -> R {
    self.source.into_inner()
  }
}

impl<R: AsyncBufRead + Unpin> AsyncRead for AsyncUtf8Reader<R> {
  fn poll_read(
    self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut ReadBuf<'_>,
  ) -> Poll<io::Result<()>> {
    let this = self.get_mut();
    let strategy = match &mut this.strategy {
      Some(strategy) => strategy,
      slot @ None => {
        let bom = ready!(this.source.poll_sniff(cx)).map_err(|err| {
          debug!(error = %err, "BOM lookahead failed");
          io::Error::from(DecodeError::PeekBom(err))
        })?;
        slot.insert(Strategy::select(bom, &this.config))
      }
    };
    strategy.poll_read(&mut this.source, cx, buf)
  }
}
