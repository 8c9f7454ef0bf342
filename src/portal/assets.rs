//! Embedded web assets.
//!
//! The setup pages are compiled into the firmware image from `web/`. The
//! vendor bundles are gzipped ahead of time by the build tooling and served
//! with `Content-Encoding: gzip` as-is; the device itself never compresses
//! or decompresses anything.

/// A file baked into the firmware image.
#[derive(Debug)]
pub struct Asset {
    /// MIME type reported in the response.
    pub content_type: &'static str,
    /// Raw bytes as served on the wire.
    pub body: &'static [u8],
}

/// Setup page.
pub static INDEX: Asset = Asset {
    content_type: "text/html",
    body: include_bytes!("../../web/index.html"),
};

/// Portal UI logic.
pub static CODE_JS: Asset = Asset {
    content_type: "text/javascript",
    body: include_bytes!("../../web/code.js"),
};

/// Portal stylesheet.
pub static STYLE_CSS: Asset = Asset {
    content_type: "text/css",
    body: include_bytes!("../../web/style.css"),
};

/// jQuery, pre-gzipped.
pub static JQUERY_JS: Asset = Asset {
    content_type: "text/javascript",
    body: include_bytes!("../../web/jquery.min.js.gz"),
};

/// Popper, pre-gzipped.
pub static POPPER_JS: Asset = Asset {
    content_type: "text/javascript",
    body: include_bytes!("../../web/popper.min.js.gz"),
};

/// Bootstrap scripts, pre-gzipped.
pub static BOOTSTRAP_JS: Asset = Asset {
    content_type: "text/javascript",
    body: include_bytes!("../../web/bootstrap.min.js.gz"),
};

/// Bootstrap stylesheet, pre-gzipped.
pub static BOOTSTRAP_CSS: Asset = Asset {
    content_type: "text/css",
    body: include_bytes!("../../web/bootstrap.min.css.gz"),
};
