//! The route table.
//!
//! Dispatch is data, not control flow: a fixed ordered table of
//! (method, path, action) entries, evaluated top to bottom, first match
//! wins. Paths match exactly against the request-line path token; a request
//! line with no version token matches nothing and is answered 400 by the
//! server.

use super::assets::{self, Asset};
use crate::system::RebootMode;

/// Request methods the portal recognizes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Method {
    /// Literal `GET`.
    Get,
    /// Literal `POST`.
    Post,
    /// Literal `DELETE`.
    Delete,
}

impl Method {
    /// Wire form of the method token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// What a matched route does.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    /// Serve an embedded asset verbatim.
    Asset(&'static Asset),
    /// Serve a pre-gzipped embedded asset with encoding headers.
    CompressedAsset(&'static Asset),
    /// Request a Wi-Fi scan; no response bytes.
    TriggerScan,
    /// Serve the scan-result snapshot, then request a scan.
    ApList,
    /// Serve the configuration as JSON.
    ConfigGet,
    /// Persist submitted configuration fields.
    ConfigSet,
    /// Join a network with submitted credentials.
    Connect,
    /// Disconnect and forget the stored network.
    Disconnect,
    /// Acknowledge, then reboot into the given mode.
    RebootDevice(RebootMode),
    /// Serve the IP/status snapshot.
    Status,
}

/// One entry of the dispatch table.
#[derive(Debug)]
pub struct Route {
    /// Method the entry responds to.
    pub method: Method,
    /// Exact path the entry responds on.
    pub path: &'static str,
    /// Behavior of the entry.
    pub action: Action,
}

/// The dispatch table, in priority order.
pub static ROUTES: &[Route] = &[
    Route {
        method: Method::Get,
        path: "/",
        action: Action::Asset(&assets::INDEX),
    },
    Route {
        method: Method::Get,
        path: "/code.js",
        action: Action::Asset(&assets::CODE_JS),
    },
    Route {
        method: Method::Get,
        path: "/style.css",
        action: Action::Asset(&assets::STYLE_CSS),
    },
    Route {
        method: Method::Get,
        path: "/jquery.js",
        action: Action::CompressedAsset(&assets::JQUERY_JS),
    },
    Route {
        method: Method::Get,
        path: "/popper.js",
        action: Action::CompressedAsset(&assets::POPPER_JS),
    },
    Route {
        method: Method::Get,
        path: "/bootstrap.js",
        action: Action::CompressedAsset(&assets::BOOTSTRAP_JS),
    },
    Route {
        method: Method::Get,
        path: "/bootstrap.css",
        action: Action::CompressedAsset(&assets::BOOTSTRAP_CSS),
    },
    Route {
        method: Method::Get,
        path: "/scan.json",
        action: Action::TriggerScan,
    },
    Route {
        method: Method::Get,
        path: "/ap.json",
        action: Action::ApList,
    },
    Route {
        method: Method::Get,
        path: "/config.json",
        action: Action::ConfigGet,
    },
    Route {
        method: Method::Post,
        path: "/config.json",
        action: Action::ConfigSet,
    },
    Route {
        method: Method::Post,
        path: "/connect.json",
        action: Action::Connect,
    },
    Route {
        method: Method::Delete,
        path: "/connect.json",
        action: Action::Disconnect,
    },
    Route {
        method: Method::Post,
        path: "/reboot_ota.json",
        action: Action::RebootDevice(RebootMode::Ota),
    },
    Route {
        method: Method::Post,
        path: "/reboot.json",
        action: Action::RebootDevice(RebootMode::Restart),
    },
    Route {
        method: Method::Post,
        path: "/recovery.json",
        action: Action::RebootDevice(RebootMode::Recovery),
    },
    Route {
        method: Method::Get,
        path: "/status.json",
        action: Action::Status,
    },
];

/// Find the first table entry matching the given request-line tokens.
pub fn match_route(method: &str, path: &str) -> Option<&'static Route> {
    ROUTES
        .iter()
        .find(|route| route.method.as_str() == method && route.path == path)
}
