//! kuraweb - marketing site server with a microCMS content proxy
//!
//! Serves the static site from a document root and exposes two JSON
//! endpoints, `/api/news` and `/api/topics`, that relay content listings
//! from the upstream CMS.

pub mod cms;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod proxy;
pub mod server;
