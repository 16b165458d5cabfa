//! Static file serving module
//!
//! Loads resolved files from disk behind a canonicalization containment
//! guard and builds the response with cache validators.

use crate::http::{self, cache};
use crate::logger;
use crate::routing::ResolvedFile;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

/// Serve a resolved file candidate.
///
/// Missing files, directories, traversal escapes and read errors all come
/// back as a plain 404; the client learns nothing about which it was.
pub async fn serve(
    file: &ResolvedFile,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match load(file).await {
        Some(content) => {
            let etag = cache::generate_etag(&content);
            if cache::check_etag_match(if_none_match, &etag) {
                return http::build_304_response(&etag);
            }
            http::build_file_response(Bytes::from(content), file.content_type, &etag, is_head)
        }
        None => http::build_404_response(),
    }
}

/// Read the file bytes, verifying containment first.
///
/// The router already rejected `..` lexically; canonicalizing both the root
/// and the candidate closes the remaining gap (symlinks pointing outside
/// the root). The canonical path must be a descendant of the canonical
/// root or nothing is read.
async fn load(file: &ResolvedFile) -> Option<Vec<u8>> {
    let root = match fs::canonicalize(&file.root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Root directory not found or inaccessible '{}': {e}",
                file.root.display()
            ));
            return None;
        }
    };

    // Missing files are the common 404 case, nothing to log
    let path = fs::canonicalize(&file.path).await.ok()?;

    if !path.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            file.path.display(),
            path.display()
        ));
        return None;
    }

    let meta = fs::metadata(&path).await.ok()?;
    if !meta.is_file() {
        // Directory or special file, never listed or served
        return None;
    }

    match fs::read(&path).await {
        Ok(content) => Some(content),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    /// Create a scratch site tree: index.html, admin.html, js/app.js, a
    /// subdirectory and a file outside the root.
    fn setup_site() -> PathBuf {
        let seq = DIR_SEQ.fetch_add(1, Ordering::SeqCst);
        let base = std::env::temp_dir().join(format!(
            "pagefront-test-{}-{seq}",
            std::process::id()
        ));
        let root = base.join("site");
        std::fs::create_dir_all(root.join("js")).expect("create site tree");
        std::fs::create_dir_all(root.join("css")).expect("create css dir");
        std::fs::write(root.join("index.html"), "<html>index</html>").expect("write index");
        std::fs::write(root.join("admin.html"), "<html>admin</html>").expect("write admin");
        std::fs::write(root.join("js/app.js"), "console.log('hi');").expect("write js");
        std::fs::write(base.join("secret.txt"), "outside the root").expect("write secret");
        root
    }

    fn resolved(root: &Path, rel: &str, content_type: &'static str) -> ResolvedFile {
        ResolvedFile {
            root: root.to_path_buf(),
            path: root.join(rel),
            content_type,
        }
    }

    #[tokio::test]
    async fn test_load_existing_file() {
        let root = setup_site();
        let file = resolved(&root, "index.html", "text/html; charset=utf-8");
        let content = load(&file).await.expect("index should load");
        assert_eq!(content, b"<html>index</html>");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let root = setup_site();
        let file = resolved(&root, "missing-page", "application/octet-stream");
        assert!(load(&file).await.is_none());
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let root = setup_site();
        let file = resolved(&root, "css", "application/octet-stream");
        assert!(load(&file).await.is_none());
    }

    #[tokio::test]
    async fn test_escape_outside_root_blocked() {
        let root = setup_site();
        // A candidate that canonicalizes outside the root must not be read,
        // even though the file exists.
        let file = ResolvedFile {
            root: root.clone(),
            path: root.join("../secret.txt"),
            content_type: "text/plain; charset=utf-8",
        };
        assert!(load(&file).await.is_none());
    }

    #[tokio::test]
    async fn test_serve_success_and_headers() {
        let root = setup_site();
        let file = resolved(&root, "admin.html", "text/html; charset=utf-8");
        let resp = serve(&file, None, false).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(resp.headers().get("ETag").is_some());
    }

    #[tokio::test]
    async fn test_serve_not_modified() {
        let root = setup_site();
        let file = resolved(&root, "admin.html", "text/html; charset=utf-8");
        let etag = cache::generate_etag(b"<html>admin</html>");
        let resp = serve(&file, Some(&etag), false).await;
        assert_eq!(resp.status(), 304);
    }

    #[tokio::test]
    async fn test_serve_missing_is_404() {
        let root = setup_site();
        let file = resolved(&root, "nope.html", "text/html; charset=utf-8");
        let resp = serve(&file, None, false).await;
        assert_eq!(resp.status(), 404);
    }
}
