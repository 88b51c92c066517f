//! Upstream CMS integration
//!
//! The client performs the authenticated listing call; everything above it
//! treats the CMS payload as opaque bytes.

mod client;
mod error;

pub use client::CmsClient;
pub use error::{CmsError, CmsResult};
