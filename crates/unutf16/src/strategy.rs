use std::io::{self, BufRead, Read};
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};
use tracing::debug;
use unutf16_bom::Bom;

use crate::config::ReaderConfig;
use crate::lookahead::Lookahead;
use crate::reader::Detected;
use crate::transcoder::Transcoder;

/// The decoding strategy a reader settles on after its first read.
///
/// ```text
///   first two bytes   strategy
///   ───────────────   ─────────────────────────────────────────
///   FF FE             Utf16Le   BOM + code units → encoding_rs
///   FE FF             Utf16Be   BOM + code units → encoding_rs
///   anything else     PassThrough   bytes forwarded untouched
/// ```
///
/// Selected exactly once; nothing ever moves a reader from one variant
/// to another.
pub(crate) enum Strategy {
  PassThrough,
  Utf16Le(Transcoder),
  Utf16Be(Transcoder),
}

impl Strategy {
  pub(crate) fn select(bom: Option<Bom>, config: &ReaderConfig) -> Self {
    let strategy = match bom {
      Some(Bom::Utf16Le) => Self::Utf16Le(Transcoder::new(Bom::Utf16Le, config)),
      Some(Bom::Utf16Be) => Self::Utf16Be(Transcoder::new(Bom::Utf16Be, config)),
      None => Self::PassThrough,
    };
    debug!(strategy = ?strategy.detected(), "selected decode strategy");
    strategy
  }

  pub(crate) fn detected(&self) -> Detected {
    match self {
      Self::PassThrough => Detected::PassThrough,
      Self::Utf16Le(_) => Detected::Utf16(Bom::Utf16Le),
      Self::Utf16Be(_) => Detected::Utf16(Bom::Utf16Be),
    }
  }

  pub(crate) fn read<R: BufRead>(
    &mut self,
    source: &mut Lookahead<R>,
    buf: &mut [u8],
  ) -> io::Result<usize> {
    match self {
      Self::PassThrough => source.read(buf),
      Self::Utf16Le(transcoder) | Self::Utf16Be(transcoder) => loop {
        if let Some(result) = transcoder.drain(buf) {
          return result;
        }
        let input = source.fill_buf()?;
        let used = transcoder.feed(input);
        source.consume(used);
      },
    }
  }

  pub(crate) fn poll_read<R: AsyncBufRead + Unpin>(
    &mut self,
    source: &mut Lookahead<R>,
    cx: &mut Context<'_>,
    buf: &mut ReadBuf<'_>,
  ) -> Poll<io::Result<()>> {
    match self {
      Self::PassThrough => Pin::new(source).poll_read(cx, buf),
      Self::Utf16Le(transcoder) | Self::Utf16Be(transcoder) => loop {
        if let Some(result) = transcoder.drain(buf.initialize_unfilled()) {
          buf.advance(result?);
          return Poll::Ready(Ok(()));
        }
        let input = ready!(Pin::new(&mut *source).poll_fill_buf(cx))?;
        let used = transcoder.feed(input);
        Pin::new(&mut *source).consume(used);
      },
    }
  }
}
