//! Static asset responder
//!
//! Maps request paths onto the document root and serves file bytes with a
//! MIME type derived from the extension. The root path is defaulted to the
//! configured index document.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use thiserror::Error;
use tokio::fs;

use crate::config::SiteConfig;
use crate::http::{self, mime};
use crate::logger;

/// Failure modes of a static file lookup.
///
/// A missing file is ordinary (404); anything else on the disk path is a
/// server error (500).
#[derive(Debug, Error)]
pub enum StaticFileError {
    #[error("file not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serve a static file for the given request path
pub async fn serve(
    site: &SiteConfig,
    path: &str,
    is_head: bool,
    server_name: &str,
) -> Response<Full<Bytes>> {
    match load_from_root(&site.root, path, &site.index_file).await {
        Ok((content, content_type)) => {
            http::build_static_file_response(&content, content_type, server_name, is_head)
        }
        Err(StaticFileError::NotFound) => http::build_404_response(),
        Err(StaticFileError::Io(e)) => {
            logger::log_error(&format!("Failed to read static file for '{path}': {e}"));
            http::build_500_response()
        }
    }
}

/// Load a file from the document root.
///
/// `/` maps to the index document. The resolved path is canonicalized and
/// checked to stay below the document root.
pub async fn load_from_root(
    root: &str,
    path: &str,
    index_file: &str,
) -> Result<(Vec<u8>, &'static str), StaticFileError> {
    // Default the root path to the index document
    let request_path = if path == "/" {
        index_file
    } else {
        path.trim_start_matches('/')
    };

    // Remove parent-directory segments before joining
    let clean_path = request_path.replace("..", "");
    let file_path = Path::new(root).join(&clean_path);

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Document root not found or inaccessible '{root}': {e}"
            ));
            return Err(StaticFileError::NotFound);
        }
    };

    let file_canonical = match file_path.canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StaticFileError::NotFound)
        }
        Err(e) => return Err(StaticFileError::Io(e)),
    };

    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_canonical.display()
        ));
        return Err(StaticFileError::NotFound);
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StaticFileError::NotFound)
        }
        Err(e) => return Err(StaticFileError::Io(e)),
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));

    Ok((content, content_type))
}
