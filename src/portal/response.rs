//! Response templates and streaming writes.
//!
//! Responses are written straight to the socket in header-then-body order;
//! there is no assembled response buffer. The fixed header templates live in
//! flash, and the only formatting at runtime is the per-asset header for the
//! pre-compressed bundles, built in a short-lived stack buffer. A status
//! line is written at most once per connection: every handler picks exactly
//! one template before touching the socket.

use core::fmt::Write as _;

use super::assets::Asset;
use super::error::Error;
use crate::network::Write;

pub(crate) const HDR_HTML: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

pub(crate) const HDR_JS: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/javascript\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

pub(crate) const HDR_CSS: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nCache-Control: public, max-age=31536000\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

pub(crate) const HDR_JSON: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nCache-Control: no-store, no-cache, must-revalidate, max-age=0\r\nPragma: no-cache\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

pub(crate) const HDR_400: &[u8] = b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nCache-Control: no-store, no-cache, must-revalidate, max-age=0\r\nPragma: no-cache\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

pub(crate) const HDR_404: &[u8] = b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nCache-Control: no-store, no-cache, must-revalidate, max-age=0\r\nPragma: no-cache\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

pub(crate) const HDR_503: &[u8] = b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nCache-Control: no-store, no-cache, must-revalidate, max-age=0\r\nPragma: no-cache\r\nAccess-Control-Allow-Origin: *\r\n\r\n";

const REDIRECT_HEAD: &[u8] = b"HTTP/1.1 302 Found\r\nLocation: http://";

const REDIRECT_TAIL: &[u8] = b"/\r\nCache-Control: no-store, no-cache, must-revalidate, max-age=0\r\nPragma: no-cache\r\nAccess-Control-Allow-Origin: *\r\nContent-Length: 0\r\n\r\n";

/// Push all of `bytes` to the peer.
///
/// Short writes are continued; a write error or a peer that stops accepting
/// aborts the response. Nothing is retried or rolled back; the caller
/// closes the connection and moves on.
pub(crate) fn write_all<C: Write>(conn: &mut C, mut bytes: &[u8]) -> Result<(), Error> {
    while !bytes.is_empty() {
        match conn.write(bytes) {
            Ok(0) => return Err(Error::Write),
            Ok(n) => bytes = &bytes[n..],
            Err(e) => {
                log::debug!("write failed: {:?}", e);
                return Err(Error::Write);
            }
        }
    }
    Ok(())
}

/// Serve an uncompressed embedded asset with its type-specific header.
pub(crate) fn send_plain_asset<C: Write>(conn: &mut C, asset: &Asset) -> Result<(), Error> {
    let hdr = match asset.content_type {
        "text/html" => HDR_HTML,
        "text/css" => HDR_CSS,
        _ => HDR_JS,
    };
    write_all(conn, hdr)?;
    write_all(conn, asset.body)
}

/// Serve a pre-gzipped embedded asset, announcing length and encoding.
pub(crate) fn send_compressed_asset<C: Write>(conn: &mut C, asset: &Asset) -> Result<(), Error> {
    let mut hdr: heapless::String<224> = heapless::String::new();
    if write!(
        hdr,
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nAccept-Ranges: bytes\r\nContent-Length: {}\r\nContent-Encoding: gzip\r\nAccess-Control-Allow-Origin: *\r\n\r\n",
        asset.content_type,
        asset.body.len()
    )
    .is_err()
    {
        log::error!("could not format headers for compressed asset");
        return write_all(conn, HDR_503);
    }
    write_all(conn, hdr.as_bytes())?;
    write_all(conn, asset.body)
}

/// Serve a JSON body under the no-cache 200 template.
pub(crate) fn send_json<C: Write>(conn: &mut C, body: &str) -> Result<(), Error> {
    write_all(conn, HDR_JSON)?;
    write_all(conn, body.as_bytes())
}

/// Redirect the client to the access-point IP.
pub(crate) fn send_redirect<C: Write>(conn: &mut C, ap_ip: &str) -> Result<(), Error> {
    write_all(conn, REDIRECT_HEAD)?;
    write_all(conn, ap_ip.as_bytes())?;
    write_all(conn, REDIRECT_TAIL)
}
