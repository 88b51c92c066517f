// Application state module
// Bundles the loaded configuration with the per-process CMS client

use crate::cms::{CmsClient, CmsResult};

use super::types::Config;

/// Application state shared by every request handler.
///
/// Nothing in here is mutable after startup; requests only read it.
pub struct AppState {
    pub config: Config,
    /// `None` when no CMS API key is configured. Proxy requests then fail
    /// fast with a configuration error and no outbound call.
    pub cms: Option<CmsClient>,
}

impl AppState {
    pub fn new(config: Config) -> CmsResult<Self> {
        let cms = CmsClient::from_config(&config.cms)?;
        Ok(Self { config, cms })
    }
}
