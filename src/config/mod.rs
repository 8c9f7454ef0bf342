//! Configuration store boundary.
//!
//! The portal persists submitted settings through this trait and never talks
//! to flash directly. A concrete store is typically a thin wrapper over the
//! platform's non-volatile key/value storage (NVS on ESP-IDF, a flash-backed
//! map elsewhere); tests use an in-memory map.
//!
//! Keys and values are plain strings. Two keys have meaning to the portal
//! itself: [`AP_IP_KEY`] overrides the access-point IP used for captive
//! redirects, and [`HOST_NAME_KEY`] holds the device host name submitted via
//! `POST /connect.json`. Everything else is opaque payload owned by the
//! application.

#![deny(unsafe_code)]

use alloc::string::String;

/// Common error types for configuration stores
pub mod error;

/// Store key for the access-point IP address override.
pub const AP_IP_KEY: &str = "ap_ip_address";

/// Store key for the configured device host name.
pub const HOST_NAME_KEY: &str = "host_name";

/// String-keyed configuration persistence.
pub trait ConfigStore {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Look up a value by key. `Ok(None)` means the key is not present.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Persist a key/value pair, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Render the whole configuration as a JSON object.
    ///
    /// Serves `GET /config.json`; a failure here is reported to the client
    /// as 503, not treated as fatal.
    fn to_json(&self) -> Result<String, Self::Error>;
}
