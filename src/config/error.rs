//! Common error types for configuration stores

/// A common error type for configuration store operations.
///
/// Concrete stores (NVS, EEPROM-backed, in-memory) are free to use their own
/// error types through [`ConfigStore::Error`](super::ConfigStore::Error);
/// this one is a convenient default for adapters and tests.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The backing store could not be read.
    ReadError,
    /// The backing store could not be written.
    WriteError,
    /// The store ran out of space for a new key or value.
    StoreFull,
    /// The configuration could not be rendered as JSON.
    RenderError,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::StoreFull => defmt::write!(f, "StoreFull"),
            Error::RenderError => defmt::write!(f, "RenderError"),
        }
    }
}
