//! Wi-Fi manager boundary.
//!
//! The scanning/connection state machine runs as its own task outside this
//! crate; the portal drives it through [`WifiControl`]. All `*_async` calls
//! are fire-and-forget requests: they enqueue work on the Wi-Fi task and
//! return immediately, so the portal never blocks a connection on radio
//! activity.
//!
//! The module also carries the producer-side snapshot types: the Wi-Fi task
//! renders its scan results and IP status to JSON with [`render_access_points`]
//! and [`render_ip_info`] and publishes the strings through the portal's
//! shared status slot (see [`SharedStatus`](crate::portal::SharedStatus)).

#![deny(unsafe_code)]

use serde::Serialize;

/// Maximum SSID length in bytes, per IEEE 802.11.
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA passphrase length in bytes.
pub const MAX_PASSWORD_LEN: usize = 64;

/// An IPv4 address in dotted-decimal text form.
pub type IpString = heapless::String<15>;

/// A device host name.
pub type HostName = heapless::String<32>;

/// Errors produced by this module's bounded types and renderers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// SSID exceeds [`MAX_SSID_LEN`].
    SsidTooLong,
    /// Password exceeds [`MAX_PASSWORD_LEN`].
    PasswordTooLong,
    /// The provided buffer is too small for the rendered JSON.
    BufferTooSmall,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::SsidTooLong => defmt::write!(f, "SsidTooLong"),
            Error::PasswordTooLong => defmt::write!(f, "PasswordTooLong"),
            Error::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
        }
    }
}

/// Station-mode credentials with enforced length limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationConfig {
    /// Network name to join.
    pub ssid: heapless::String<MAX_SSID_LEN>,
    /// Passphrase; empty for open networks.
    pub password: heapless::String<MAX_PASSWORD_LEN>,
}

impl StationConfig {
    /// Build a station configuration, rejecting over-long credentials.
    pub fn new(ssid: &str, password: &str) -> Result<Self, Error> {
        let ssid = heapless::String::try_from(ssid).map_err(|_| Error::SsidTooLong)?;
        let password = heapless::String::try_from(password).map_err(|_| Error::PasswordTooLong)?;
        Ok(Self { ssid, password })
    }
}

/// Control surface of the external Wi-Fi manager task.
pub trait WifiControl {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Request a scan; results arrive later through the shared status slot.
    fn scan_async(&mut self) -> Result<(), Self::Error>;

    /// Request a connection attempt with the given credentials.
    fn connect_async(&mut self, config: &StationConfig) -> Result<(), Self::Error>;

    /// Request a disconnect and forget the stored network.
    fn disconnect_async(&mut self) -> Result<(), Self::Error>;

    /// Current station-mode IP address, `0.0.0.0` when not connected.
    ///
    /// The Wi-Fi task guards this string with its own lock; implementations
    /// take that lock internally and return a copy.
    fn sta_ip(&self) -> IpString;

    /// Configured device host name, if any.
    fn hostname(&self) -> Option<HostName>;
}

/// One scanned access point, as published in `ap.json`.
#[derive(Debug, Serialize)]
pub struct AccessPoint<'a> {
    /// Network name.
    pub ssid: &'a str,
    /// Channel number.
    pub chan: u8,
    /// Signal strength in dBm.
    pub rssi: i8,
    /// Authentication mode; `0` means open.
    pub auth: u8,
}

/// Station status, as published in `status.json`.
#[derive(Debug, Serialize)]
pub struct IpInfo<'a> {
    /// SSID of the associated network, empty when disconnected.
    pub ssid: &'a str,
    /// Assigned IP address, `0.0.0.0` when disconnected.
    pub ip: &'a str,
    /// Network mask.
    pub netmask: &'a str,
    /// Gateway address.
    pub gw: &'a str,
    /// Update reason code for the last state change.
    pub urc: u8,
}

/// Render a scan result list to JSON, returning the number of bytes written.
pub fn render_access_points(aps: &[AccessPoint<'_>], buf: &mut [u8]) -> Result<usize, Error> {
    serde_json_core::to_slice(aps, buf).map_err(|_| Error::BufferTooSmall)
}

/// Render station status to JSON, returning the number of bytes written.
pub fn render_ip_info(info: &IpInfo<'_>, buf: &mut [u8]) -> Result<usize, Error> {
    serde_json_core::to_slice(info, buf).map_err(|_| Error::BufferTooSmall)
}
