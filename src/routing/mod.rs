//! Static route table module
//!
//! Maps request paths to files on disk. Rules are fixed at startup and
//! matched in priority order: named page aliases first, then the script
//! prefix route, then the document-root catch-all.

use crate::http::mime;
use hyper::Method;
use std::path::{Path, PathBuf};

/// Named pages served with and without the `.html` suffix.
///
/// Order matters: these are checked before the script and catch-all rules,
/// so `/admin.html` never falls through to generic static serving.
const PAGE_ALIASES: &[(&str, &str)] = &[
    ("/admin", "admin.html"),
    ("/dashboard", "dashboard.html"),
    ("/register", "register.html"),
    ("/deposit", "deposit.html"),
    ("/withdraw", "withdraw.html"),
    ("/forget-password", "forget-password.html"),
];

const INDEX_FILE: &str = "index.html";
const SCRIPT_PREFIX: &str = "/js/";

/// A file candidate produced by route resolution.
///
/// `path` is `root` joined with the matched relative filename. Existence and
/// containment under `root` are verified by the serving layer before any
/// bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub root: PathBuf,
    pub path: PathBuf,
    pub content_type: &'static str,
}

/// Result of resolving a request path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    File(ResolvedFile),
    NotFound,
}

/// Static router holding the root directories the route table serves from.
#[derive(Debug, Clone)]
pub struct Router {
    document_root: PathBuf,
    script_root: PathBuf,
}

impl Router {
    pub fn new(document_root: impl Into<PathBuf>, script_root: impl Into<PathBuf>) -> Self {
        Self {
            document_root: document_root.into(),
            script_root: script_root.into(),
        }
    }

    /// Resolve a request to a file candidate.
    ///
    /// Only GET and HEAD reach the route table; anything else is NotFound
    /// here (the dispatch layer answers OPTIONS and 405 earlier). The path
    /// is percent-decoded before matching, and any decoded path that could
    /// step outside its root is rejected without touching the filesystem.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        if *method != Method::GET && *method != Method::HEAD {
            return Resolution::NotFound;
        }

        let Some(path) = decode_percent(path) else {
            return Resolution::NotFound;
        };
        if !is_clean(&path) {
            return Resolution::NotFound;
        }

        // Rule 1: site index
        if path == "/" {
            return self.document_file(INDEX_FILE);
        }

        // Rules 2-7: named page aliases, extension-less or explicit
        for (route, file) in PAGE_ALIASES {
            if path == *route || path.strip_prefix(route) == Some(".html") {
                return self.document_file(file);
            }
        }

        // Rule 8: script assets under their own root
        if let Some(rest) = path.strip_prefix(SCRIPT_PREFIX) {
            if rest.is_empty() {
                return Resolution::NotFound;
            }
            return Resolution::File(ResolvedFile {
                root: self.script_root.clone(),
                path: self.script_root.join(rest),
                content_type: content_type_of(rest),
            });
        }

        // Rule 9: catch-all against the document root
        match path.strip_prefix('/') {
            Some(rest) if !rest.is_empty() => self.document_file(rest),
            _ => Resolution::NotFound,
        }
    }

    fn document_file(&self, relative: &str) -> Resolution {
        Resolution::File(ResolvedFile {
            root: self.document_root.clone(),
            path: self.document_root.join(relative),
            content_type: content_type_of(relative),
        })
    }
}

fn content_type_of(relative: &str) -> &'static str {
    mime::get_content_type(Path::new(relative).extension().and_then(|e| e.to_str()))
}

/// Decode %XX escapes in a request path.
///
/// Returns None on truncated or non-hex escapes so malformed paths fail
/// closed. Decoding happens before rule matching so encoded traversal
/// sequences cannot slip past the cleanliness check below.
fn decode_percent(path: &str) -> Option<String> {
    if !path.contains('%') {
        return Some(path.to_string());
    }

    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Lexical traversal rejection: no `..` components, no NUL bytes, no
/// backslash tricks, no empty segments. An empty segment would leave an
/// absolute remainder after prefix stripping, and `Path::join` with an
/// absolute path replaces the root outright. The serving layer additionally
/// canonicalizes and verifies containment, so this is the first of two gates.
fn is_clean(path: &str) -> bool {
    if path == "/" {
        return true;
    }
    if path.contains('\0') || path.contains('\\') || path.contains("//") {
        return false;
    }
    path.split('/').all(|segment| segment != "..")
}
