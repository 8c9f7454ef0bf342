//! Over-the-air update boundary.
//!
//! The portal only *triggers* firmware updates: a `POST /config.json`
//! carrying an `X-Custom-fwurl` field hands the URL to [`OtaTrigger::start`]
//! after the response has been written. Downloading, flashing and activation
//! are the platform's business; on dual-partition devices `start` usually
//! records the URL and restarts into the updater application.

#![deny(unsafe_code)]

/// External firmware-update starter.
pub trait OtaTrigger {
    /// Begin an over-the-air update from the given URL.
    ///
    /// The URL is exactly the submitted field value; it is never persisted
    /// in the configuration store. May not return on real hardware.
    fn start(&mut self, url: &str);
}
