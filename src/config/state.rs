// Application state module
// Immutable per-process state shared by every connection task

use super::types::Config;
use crate::routing::Router;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; request handling never
/// mutates it, which is what makes the router safe under any concurrency.
pub struct AppState {
    pub config: Config,
    pub router: Router,
    /// Held for future session signing by client-side pages. No server-side
    /// session mechanism exists; only its presence is ever logged.
    pub session_secret: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let router = Router::new(&config.site.document_root, &config.site.script_root);
        Self {
            config: config.clone(),
            router,
            session_secret: Config::session_secret(),
        }
    }
}
