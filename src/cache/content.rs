//! Response classification: declared content type to stored file extension.

use std::fmt;

/// File extension a cache entry is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Html,
    Json,
    Xml,
}

impl Extension {
    /// Every extension the store knows about, in forget-probe order.
    pub const ALL: [Extension; 3] = [Extension::Html, Extension::Json, Extension::Xml];

    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Html => "html",
            Extension::Json => "json",
            Extension::Xml => "xml",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a declared content type to a stored extension.
///
/// Total over its input domain: anything that is not JSON or XML is stored
/// as HTML. `structured_json` lets adapters flag framework-level JSON
/// responses that do not carry an exact `application/json` header.
pub fn classify(content_type: Option<&str>, structured_json: bool) -> Extension {
    if structured_json || content_type == Some("application/json") {
        return Extension::Json;
    }

    match content_type {
        Some("text/xml") | Some("application/xml") => Extension::Xml,
        _ => Extension::Html,
    }
}
