//! Logger module
//!
//! Server lifecycle, access and error logging to stdout/stderr.

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config, secret_is_default: bool) {
    println!("======================================");
    println!("Static page server started");
    println!("Listening on: http://{addr}");
    println!("Document root: {}", config.site.document_root);
    println!("Script root: {}", config.site.script_root);
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    if secret_is_default {
        println!("Session secret: built-in default (set SESSION_SECRET to override)");
    } else {
        println!("Session secret: loaded from environment");
    }
    println!("======================================\n");
}

pub fn log_shutdown() {
    println!("\nShutdown signal received, stopping server");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}
