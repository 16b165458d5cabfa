//! Request handler module
//!
//! Dispatches incoming requests through the static route table and serves
//! the resolved files.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
