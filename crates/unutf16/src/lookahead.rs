use std::io::{self, BufRead, Read};
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};
use tracing::trace;
use unutf16_bom::Bom;

/// A buffered source with up to one byte of lookahead held outside it.
///
/// BOM detection prefers to peek: `fill_buf` shows the buffered bytes
/// without consuming them, so when two or more are visible nothing is
/// taken and the strategy sees the source exactly as it was. When the
/// buffer only shows a single byte (capacity-1 buffers, a chunk boundary
/// right after the first byte) that byte is consumed, held here, and the
/// second byte is peeked instead.
///
/// ```text
///   held: None      inner: [FF FE 68 00 ...]   ← peek-based, nothing taken
///   held: Some(FF)  inner: [FE 68 00 ...]      ← stitched: held byte first
/// ```
///
/// Reads, `fill_buf` and `consume` always drain the held byte before
/// touching `inner`, so the stitched stream is byte-identical to the
/// original.
pub(crate) struct Lookahead<R> {
  inner: R,
  held: Option<u8>,
}

/// Outcome of looking at the bytes currently visible.
#[derive(Debug, PartialEq, Eq)]
enum Inspect {
  /// Enough bytes were seen (or the stream ended) to decide.
  Detected(Option<Bom>),
  /// Only one byte is visible; it has been copied into `held` and must
  /// be consumed from the source before peeking again.
  Hold,
}

/// Decide on the BOM from the held byte (if any) and the visible bytes.
fn inspect(held: &mut Option<u8>, available: &[u8]) -> Inspect {
  match (*held, available) {
    (None, []) | (Some(_), []) => Inspect::Detected(None),
    (None, [first]) => {
      *held = Some(*first);
      Inspect::Hold
    }
    (None, prefix) => Inspect::Detected(Bom::detect(prefix)),
    (Some(first), [second, ..]) => Inspect::Detected(Bom::detect(&[first, *second])),
  }
}

impl<R> Lookahead<R> {
  pub(crate) fn new(inner: R) -> Self {
    Self { inner, held: None }
  }

  pub(crate) fn get_ref(&self) -> &R {
    &self.inner
  }

  /// Give back the source. A byte still held by the lookahead is lost.
  pub(crate) fn into_inner(self) -> R {
    self.inner
  }

  fn take_held(&mut self, buf: &mut [u8]) -> Option<usize> {
    if buf.is_empty() {
      return None;
    }
    let byte = self.held.take()?;
    buf[0] = byte;
    Some(1)
  }
}

impl<R: BufRead> Lookahead<R> {
  /// Inspect the first two bytes of the stream.
  ///
  /// End of stream is a normal outcome (`Ok(None)`). An error leaves any
  /// held byte in place, so calling again picks up where this call
  /// stopped.
  pub(crate) fn sniff(&mut self) -> io::Result<Option<Bom>> {
    loop {
      let available = self.inner.fill_buf()?;
      match inspect(&mut self.held, available) {
        Inspect::Detected(bom) => return Ok(bom),
        Inspect::Hold => {
          trace!("lookahead sees one byte, holding it");
          self.inner.consume(1);
        }
      }
    }
  }
}

impl<R: AsyncBufRead + Unpin> Lookahead<R> {
  /// Async counterpart of [`sniff`](Self::sniff). `Pending` part-way is
  /// fine: the held byte survives until the next poll.
  pub(crate) fn poll_sniff(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<Option<Bom>>> {
    loop {
      let available = ready!(Pin::new(&mut self.inner).poll_fill_buf(cx))?;
      match inspect(&mut self.held, available) {
        Inspect::Detected(bom) => return Poll::Ready(Ok(bom)),
        Inspect::Hold => {
          trace!("lookahead sees one byte, holding it");
          Pin::new(&mut self.inner).consume(1);
        }
      }
    }
  }
}

impl<R: BufRead> Read for Lookahead<R> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    if let Some(n) = self.take_held(buf) {
      return Ok(n);
    }
    self.inner.read(buf)
  }
}

impl<R: BufRead> BufRead for Lookahead<R> {
  fn fill_buf(&mut self) -> io::Result<&[u8]> {
    if let Some(byte) = &self.held {
      return Ok(std::slice::from_ref(byte));
    }
    self.inner.fill_buf()
  }

  fn consume(&mut self, amt: usize) {
    if amt == 0 {
      return;
    }
    if self.held.take().is_some() {
      debug_assert_eq!(amt, 1, "fill_buf exposed only the held byte");
      return;
    }
    self.inner.consume(amt);
  }
}

impl<R: AsyncBufRead + Unpin> AsyncRead for Lookahead<R> {
  fn poll_read(
    self: Pin<&mut Self>,
    cx: &mut Context<'_>,
    buf: &mut ReadBuf<'_>,
  ) -> Poll<io::Result<()>> {
    let this = self.get_mut();
    if buf.remaining() > 0 {
      if let Some(byte) = this.held.take() {
        buf.put_slice(&[byte]);
        return Poll::Ready(Ok(()));
      }
    }
    Pin::new(&mut this.inner).poll_read(cx, buf)
  }
}

impl<R: AsyncBufRead + Unpin> AsyncBufRead for Lookahead<R> {
  fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
    let this = self.get_mut();
    if let Some(byte) = &this.held {
      return Poll::Ready(Ok(std::slice::from_ref(byte)));
    }
    Pin::new(&mut this.inner).poll_fill_buf(cx)
  }

  fn consume(self: Pin<&mut Self>, amt: usize) {
    let this = self.get_mut();
    if amt == 0 {
      return;
    }
    if this.held.take().is_some() {
      debug_assert_eq!(amt, 1, "poll_fill_buf exposed only the held byte");
      return;
    }
    Pin::new(&mut this.inner).consume(amt);
  }
}
