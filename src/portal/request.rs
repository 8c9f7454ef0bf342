//! Request parsing.
//!
//! The parser is a set of span-returning scans over the receive buffer:
//! nothing is copied and nothing is mutated, every returned `&str` borrows
//! from the buffer for the lifetime of the request. Header lookup is a
//! *literal* byte scan, with no case folding and no header tokenization.
//! That is exactly enough for the fixed set of clients the portal serves,
//! namely its own embedded pages.

use core::str;

/// Marker prefix of the configuration-field convention.
///
/// Configuration values are carried as `X-Custom-<field>: <value>` request
/// header lines instead of a request body: captive-portal clients send
/// compressed bodies the device cannot decode, while header lines always
/// arrive verbatim.
pub const CUSTOM_FIELD_PREFIX: &str = "X-Custom-";

/// Find the first occurrence of a slice in another slice.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// A parsed view over one request in the receive buffer.
///
/// `method`, `path` and `version` are the whitespace-separated tokens of the
/// request line; missing tokens parse as empty strings and simply match no
/// route. The header block is everything after the first line terminator.
#[derive(Debug)]
pub struct Request<'a> {
    /// Request method token (`GET`, `POST`, `DELETE`, ...).
    pub method: &'a str,
    /// Request path token.
    pub path: &'a str,
    /// Protocol version token; empty when the client sent none.
    pub version: &'a str,
    headers: &'a [u8],
}

impl<'a> Request<'a> {
    /// Split the buffer into request line and header block.
    ///
    /// Returns `None` when no line terminator exists before the end of the
    /// buffer or the request line is not valid UTF-8: there is no request
    /// to answer, and the caller reports 404.
    pub fn parse(buf: &'a [u8]) -> Option<Self> {
        let nl = buf.iter().position(|&b| b == b'\n')?;
        let mut line = &buf[..nl];
        if line.ends_with(b"\r") {
            line = &line[..line.len() - 1];
        }
        let line = str::from_utf8(line).ok()?;
        let mut tokens = line.split(' ');
        let method = tokens.next().unwrap_or("");
        let path = tokens.next().unwrap_or("");
        let version = tokens.next().unwrap_or("");
        Some(Self {
            method,
            path,
            version,
            headers: &buf[nl + 1..],
        })
    }

    /// Literal header lookup.
    ///
    /// Scans the header block for `needle` (conventionally including the
    /// separator, e.g. `"Host: "`) and returns the remainder of that line,
    /// up to but excluding the line terminator. The scan does not anchor at
    /// line starts; the first literal occurrence wins.
    pub fn header(&self, needle: &str) -> Option<&'a str> {
        find_header(self.headers, needle)
    }

    /// Iterate the `X-Custom-*` configuration fields, left to right.
    pub fn custom_fields(&self) -> CustomFields<'a> {
        CustomFields {
            block: self.headers,
            pos: 0,
        }
    }
}

/// Literal scan of a header block; see [`Request::header`].
pub fn find_header<'a>(block: &'a [u8], needle: &str) -> Option<&'a str> {
    let at = find_slice(block, needle.as_bytes())?;
    let rest = &block[at + needle.len()..];
    let end = rest
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(rest.len());
    str::from_utf8(&rest[..end]).ok()
}

/// One submitted configuration field.
///
/// Both spans borrow from the receive buffer and are only valid while the
/// request is being handled; callers needing a value past the response copy
/// it out.
#[derive(Debug, PartialEq, Eq)]
pub struct CustomField<'a> {
    /// Field name, the text between [`CUSTOM_FIELD_PREFIX`] and the colon.
    pub name: &'a str,
    /// Field value, the text after the colon with leading spaces skipped.
    pub value: &'a str,
}

/// Iterator over `X-Custom-<name>: <value>` lines in a header block.
///
/// The scan advances strictly forward: each call resumes from just past the
/// previous match, so repeated field names are reported in wire order and no
/// byte range is visited twice. A prefix occurrence with no colon before the
/// line terminator yields nothing and is skipped.
#[derive(Debug)]
pub struct CustomFields<'a> {
    block: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for CustomFields<'a> {
    type Item = CustomField<'a>;

    fn next(&mut self) -> Option<CustomField<'a>> {
        let prefix = CUSTOM_FIELD_PREFIX.as_bytes();
        while self.pos < self.block.len() {
            let hit = find_slice(&self.block[self.pos..], prefix)?;
            let name_start = self.pos + hit + prefix.len();

            // The name runs to the colon, or the line has no field at all.
            let mut i = name_start;
            while i < self.block.len() && !matches!(self.block[i], b':' | b'\r' | b'\n') {
                i += 1;
            }
            if i >= self.block.len() || self.block[i] != b':' {
                self.pos = i;
                continue;
            }
            let name = &self.block[name_start..i];

            let mut v = i + 1;
            while v < self.block.len() && self.block[v] == b' ' {
                v += 1;
            }
            let mut end = v;
            while end < self.block.len() && !matches!(self.block[end], b'\r' | b'\n') {
                end += 1;
            }
            let value = &self.block[v..end];
            self.pos = if end < self.block.len() { end + 1 } else { end };

            match (str::from_utf8(name), str::from_utf8(value)) {
                (Ok(name), Ok(value)) => return Some(CustomField { name, value }),
                _ => {
                    log::debug!("skipping undecodable configuration field");
                    continue;
                }
            }
        }
        None
    }
}
