//! Common error types for the portal service

/// Errors surfaced by the portal's serving pipeline.
///
/// None of these are fatal to the device. Only [`Error::Accept`] stops the
/// serving loop, and recovery from that is a supervisor's job (restart the
/// task); everything else is scoped to a single connection, which is closed
/// before the error is reported.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The listening socket failed to accept; the serving loop has stopped.
    Accept,
    /// A write to the peer failed; the connection was abandoned unfinished.
    Write,
    /// The receive buffer could not grow. Reported to the peer as 503.
    OutOfMemory,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Accept => defmt::write!(f, "Accept"),
            Error::Write => defmt::write!(f, "Write"),
            Error::OutOfMemory => defmt::write!(f, "OutOfMemory"),
        }
    }
}
