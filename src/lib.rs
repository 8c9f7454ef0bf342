//! # libportal - Captive-portal configuration service for IoT devices
//!
//! A Rust library that turns any IoT device into its own setup endpoint: a
//! minimal, single-connection-at-a-time HTTP-like server that serves the
//! embedded configuration pages, publishes Wi-Fi scan results, accepts
//! credentials and settings, and triggers firmware updates, all without a
//! general-purpose HTTP stack. It is designed for embedded systems and
//! supports `no_std` environments (an allocator is required for the receive
//! buffer and status snapshots).
//!
//! ## Features
//!
//! ### Portal Service
//! - **Bespoke wire protocol**: request framing reconstructed from raw
//!   socket fragments, idle-based end-of-request detection
//! - **Captive-portal redirects**: foreign `Host` values are answered with
//!   a 302 to the device's access-point IP until setup completes
//! - **Header-carried configuration**: settings are submitted as
//!   `X-Custom-<field>: <value>` request headers, so no body decoding is
//!   ever needed
//! - **Embedded assets**: setup pages compiled into the image, vendor
//!   bundles served pre-gzipped
//!
//! ### Collaborator Boundaries
//! - Transport traits pluggable over any TCP/IP stack
//! - String-keyed configuration persistence
//! - Fire-and-forget Wi-Fi scan/connect/disconnect control
//! - Reboot (restart / OTA / recovery) and firmware-update triggers
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libportal = "0.1.0"
//! ```
//!
//! ### Serving the portal
//!
//! ```rust,no_run
//! use libportal::portal::{Portal, PortalConfig, SharedStatus, StatusError};
//! # use libportal::network::{Connection, Read, Write, Close, Accept};
//! # struct MockConnection;
//! # impl Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Connection for MockConnection {}
//! # struct MockListener;
//! # impl Accept for MockListener {
//! #     type Connection = MockConnection;
//! #     type Error = ();
//! #     fn accept(&mut self) -> Result<MockConnection, Self::Error> { Ok(MockConnection) }
//! # }
//! # struct MockConfig;
//! # impl libportal::config::ConfigStore for MockConfig {
//! #     type Error = ();
//! #     fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> { Ok(None) }
//! #     fn set(&mut self, _key: &str, _value: &str) -> Result<(), Self::Error> { Ok(()) }
//! #     fn to_json(&self) -> Result<String, Self::Error> { Ok(String::from("{}")) }
//! # }
//! # struct MockWifi;
//! # impl libportal::wifi::WifiControl for MockWifi {
//! #     type Error = ();
//! #     fn scan_async(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn connect_async(&mut self, _config: &libportal::wifi::StationConfig) -> Result<(), Self::Error> { Ok(()) }
//! #     fn disconnect_async(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn sta_ip(&self) -> libportal::wifi::IpString { libportal::wifi::IpString::new() }
//! #     fn hostname(&self) -> Option<libportal::wifi::HostName> { None }
//! # }
//! # struct MockStatus;
//! # impl SharedStatus for MockStatus {
//! #     fn ap_list_json(&self) -> Result<String, StatusError> { Err(StatusError::Empty) }
//! #     fn ip_info_json(&self) -> Result<String, StatusError> { Err(StatusError::Empty) }
//! # }
//! # struct MockReboot;
//! # impl libportal::system::Reboot for MockReboot {
//! #     fn reboot(&mut self, _mode: libportal::system::RebootMode) {}
//! # }
//! # struct MockOta;
//! # impl libportal::ota::OtaTrigger for MockOta {
//! #     fn start(&mut self, _url: &str) {}
//! # }
//!
//! let mut portal = Portal::new(
//!     PortalConfig::default(),
//!     MockConfig,
//!     MockWifi,
//!     MockStatus,
//!     MockReboot,
//!     MockOta,
//! );
//!
//! let mut listener = MockListener;
//! // portal.serve_forever(&mut listener)?;
//! ```
//!
//! ### Publishing status snapshots
//!
//! The Wi-Fi manager task renders its results to JSON and publishes them
//! through the shared status slot; the portal copies them out under a
//! bounded wait while serving `ap.json` and `status.json`:
//!
//! ```rust
//! use libportal::wifi::{AccessPoint, render_access_points};
//!
//! let aps = [AccessPoint { ssid: "home", chan: 6, rssi: -61, auth: 3 }];
//! let mut buf = [0u8; 256];
//! let len = render_access_points(&aps, &mut buf).unwrap();
//! assert!(len > 0);
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.) with an
//!   allocator and any TCP/IP stack
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//!
//! ## Known Limitation
//!
//! End-of-request is inferred from receive-timeout idleness, not from
//! `Content-Length` or chunked framing. This bounds memory implicitly by
//! request size and client pacing, but a very large or slowly-paced upload
//! can be truncated. The portal's own pages never produce such requests;
//! the simplification is kept deliberately.
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support and the mutex-backed status
//!   slot (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![doc(html_root_url = "https://shishir-dey.github.io/libportal/")]

extern crate alloc;

/// Network abstraction layer providing transport traits for the portal.
///
/// Contains the blocking `Read`/`Write`/`Close`/`Connection` traits the
/// service is written against, and the `Accept` trait for the listening
/// socket.
pub mod network;

/// The captive-portal HTTP service.
///
/// Connection acceptor, request parser, redirect policy, route table and
/// the shared status slot.
pub mod portal;

/// Wi-Fi manager boundary.
///
/// Control trait for the external Wi-Fi task plus the producer-side JSON
/// snapshot types and renderers.
pub mod wifi;

/// Configuration store boundary.
///
/// String-keyed persistence for submitted settings.
pub mod config;

/// System control boundary.
///
/// Reboot modes and the platform reboot controller.
pub mod system;

/// Over-the-air update boundary.
pub mod ota;
