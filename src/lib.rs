pub mod config;
pub mod feed;
pub mod log;
pub mod notify;
pub mod poller;
pub mod store;
pub mod version;

use std::time::Duration;

/// Bound on any single HTTP exchange, so a hung endpoint cannot stall the
/// loop indefinitely.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared blocking HTTP client. Status codes are inspected by the callers
/// rather than turned into errors.
pub fn http_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(HTTP_TIMEOUT))
        .http_status_as_error(false)
        .build()
        .into()
}
