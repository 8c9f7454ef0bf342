//! A network abstraction layer for embedded systems
//!
//! This module provides the transport traits the portal service is written
//! against. Any TCP/IP stack can be plugged in by implementing [`Read`],
//! [`Write`] and [`Close`] for its connection type and [`Accept`] for its
//! listening socket, whether that is `std::net`, `smoltcp`, or an RTOS
//! netconn wrapper.
//!
//! The portal performs blocking, strictly sequential I/O; there is no async
//! trait family here. Receive calls are expected to honor a short, fixed
//! timeout configured on the underlying socket, because the portal uses
//! receive timeouts as its end-of-request heuristic (see
//! [`portal::read_request`](crate::portal::read_request)).

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Accept, Close, Connection, Read, Write};
}

/// Maximum textual length of a peer address an implementation may report.
pub const MAX_ADDR_LEN: usize = 47;

/// A peer address in textual form.
pub type AddrString = heapless::String<MAX_ADDR_LEN>;

// Core synchronous traits
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection.
    ///
    /// `Ok(0)` signals end-of-stream. Implementations with a configured
    /// receive timeout report an elapsed timeout as an error (for example
    /// [`error::Error::Timeout`]); the portal treats any read error as the
    /// end of the current request.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {
    /// Remote peer address, when the transport can report it.
    ///
    /// Used for logging only; the default reports nothing.
    fn peer_addr(&self) -> Option<AddrString> {
        None
    }
}

/// A synchronous listener (server side).
///
/// Owns the listening socket. [`accept`](Accept::accept) blocks until the
/// next connection arrives; a failed accept is fatal to the serving loop
/// (see [`Portal::serve_forever`](crate::portal::Portal::serve_forever)).
pub trait Accept {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Wait for and return the next incoming connection
    fn accept(&mut self) -> Result<Self::Connection, Self::Error>;
    /// Cooperative-scheduling hook, called between connections.
    ///
    /// A courtesy to other tasks on single-core targets, not a correctness
    /// requirement. The default does nothing.
    fn yield_now(&mut self) {}
}
