//! Receive-side buffering for one connection.

use alloc::vec::Vec;

use super::error::Error;
use crate::network::Read;

/// Minimum capacity increment of [`RecvBuffer`], in bytes.
///
/// Growing in coarse steps bounds how often the buffer reallocates while a
/// request trickles in as small TCP segments.
pub const GROWTH_QUANTUM: usize = 2048;

/// Receive chunk size for a single socket read.
const RECV_CHUNK: usize = 512;

/// A growable byte buffer accumulating one request.
///
/// Owned by the connection being served and dropped when it ends, success or
/// failure. Its length always equals the total number of bytes received so
/// far; fragment boundaries on the wire are invisible to the parser.
#[derive(Debug, Default)]
pub struct RecvBuffer {
    buf: Vec<u8>,
}

impl RecvBuffer {
    /// Create an empty buffer. No allocation happens until data arrives.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Total bytes received so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current capacity, for inspecting the growth policy.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The accumulated bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a received fragment, growing if needed.
    ///
    /// Growth is by `max(GROWTH_QUANTUM, shortfall)` over the current
    /// capacity. An allocation failure is reported as
    /// [`Error::OutOfMemory`] instead of aborting; the caller answers 503.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), Error> {
        let needed = self.buf.len() + chunk.len();
        if needed > self.buf.capacity() {
            let shortfall = needed - self.buf.capacity();
            let grow = if shortfall < GROWTH_QUANTUM {
                GROWTH_QUANTUM
            } else {
                shortfall
            };
            let target = self.buf.capacity() + grow;
            self.buf
                .try_reserve_exact(target - self.buf.len())
                .map_err(|_| {
                    log::error!("could not grow receive buffer to {} bytes", target);
                    Error::OutOfMemory
                })?;
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }
}

/// Accumulate one request from `conn` into `buf`.
///
/// Reads until the stream reports end-of-stream (`Ok(0)`) or any read error.
/// The transport is expected to carry a short receive timeout, so an idle
/// line surfaces as a timeout error here: there is no length-delimited
/// framing, and end-of-request is *inferred from idleness*. This is a
/// deliberate simplification. It implicitly bounds memory by request size
/// and client pacing, but a very large or slowly-paced upload can be
/// truncated at an idle gap. Known limitation, kept on purpose.
pub fn read_request<C: Read>(conn: &mut C, buf: &mut RecvBuffer) -> Result<(), Error> {
    let mut chunk = [0u8; RECV_CHUNK];
    loop {
        match conn.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.append(&chunk[..n])?;
                log::trace!("received fragment of {} bytes", n);
            }
            Err(e) => {
                // Idle timeout, reset, whatever: the request is over.
                log::trace!("receive finished: {:?}", e);
                break;
            }
        }
    }
    Ok(())
}
