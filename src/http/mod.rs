//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from
//! specific business logic. Shared between the API proxy and static file
//! serving.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_500_response,
    build_api_json_response, build_configuration_error_response, build_fetch_failure_response,
    build_method_not_allowed_response, build_options_response, build_preflight_response,
    build_static_file_response,
};
