//! Default configuration values

use std::time::Duration;

/// Delay between two background cache refreshes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(90);

/// HTTP request timeout for registrar calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP connect timeout for registrar calls
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the registrar resource on the server
pub const REGISTRAR_PATH: &str = "/registrar";
