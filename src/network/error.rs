//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum defines a set of common errors that can occur when working with
/// network devices. It is designed to be simple and portable for `no_std`
/// environments. Transport implementations are free to use their own error
/// types; this one is a convenient default for adapters and tests.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An operation was attempted on a connection that is not open.
    NotOpen,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// A bounded-wait receive elapsed without data.
    Timeout,
    /// The connection was closed.
    ConnectionClosed,
    /// The listening socket failed to accept a connection.
    AcceptError,
    /// An invalid address was provided.
    InvalidAddress,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::AcceptError => defmt::write!(f, "AcceptError"),
            Error::InvalidAddress => defmt::write!(f, "InvalidAddress"),
        }
    }
}
