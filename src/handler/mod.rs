//! Request handling module
//!
//! Routes inbound requests to the API proxy or the static file responder.

mod router;
pub mod static_files;

pub use router::handle_request;
