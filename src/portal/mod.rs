//! The captive-portal HTTP service.
//!
//! A deliberately small, single-connection-at-a-time HTTP-like server: raw
//! bytes come in over a listening socket, framing is reconstructed without
//! any general-purpose HTTP library, and a fixed route table maps the
//! request onto embedded assets, JSON snapshots and configuration actions.
//! Configuration values arrive as `X-Custom-*` request header lines instead
//! of a body (see [`CUSTOM_FIELD_PREFIX`]).
//!
//! Per-connection life cycle:
//!
//! ```text
//! Accepted ──▶ Reading ──▶ Parsed ──▶ Redirected ─▶ Closed
//!                 │            ├─────▶ Routed ─────▶ Closed
//!                 │            └─────▶ Malformed ──▶ Closed
//!                 └─── no data ─────────────────────▶ Closed
//! ```
//!
//! Every terminal transition closes the socket and drops the per-connection
//! buffer. One request is fully served before the next connection is
//! accepted; there is no keep-alive, no chunked transfer and no TLS.

#![deny(unsafe_code)]

/// Embedded web assets
pub mod assets;

mod buffer;
mod error;
mod policy;
mod request;
mod response;
mod routes;
mod server;
mod status;

pub use buffer::{GROWTH_QUANTUM, RecvBuffer, read_request};
pub use error::Error;
pub use policy::should_redirect;
pub use request::{CUSTOM_FIELD_PREFIX, CustomField, CustomFields, Request, find_header};
pub use routes::{Action, Method, ROUTES, Route, match_route};
pub use server::{DEFAULT_AP_IP, Portal, PortalConfig};
#[cfg(feature = "std")]
pub use status::MutexStatus;
pub use status::{SharedStatus, StatusError};
