//! Configuration for the icytitle engine

use std::time::Duration;

use crate::error::{Result, TitleError};

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("icytitle/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;

    /// Maximum playlist resolution depth
    pub const MAX_PLAYLIST_DEPTH: usize = 5;

    /// Cap on how much of a playlist document is fetched
    pub const PLAYLIST_MAX_BYTES: u64 = 64 * 1024;
}

/// ICY metadata framing configuration
pub mod meta {
    /// Metadata lengths are declared in units of 16 bytes
    pub const META_LENGTH_UNIT: usize = 16;

    /// Largest block a single length byte can declare (255 * 16)
    pub const META_MAX_LENGTH: usize = 4080;

    /// Chunk size for reads from the stream body
    pub const READ_CHUNK_SIZE: usize = 8 * 1024;
}

/// Settings for one title fetch.
///
/// Construction validates the arguments; a bad user agent or metadata bound
/// is a programmer error and fails loudly regardless of `show_errors`.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Value of the outgoing `User-Agent` header
    pub user_agent: String,
    /// When false, runtime failures collapse into a silent "no result"
    pub show_errors: bool,
    /// Upper bound on the metadata block length in bytes (1..=4080)
    pub meta_max_length: usize,
    /// Deadline for collecting the stream prefix
    pub read_timeout: Duration,
}

impl FetchConfig {
    pub fn new(
        user_agent: impl Into<String>,
        show_errors: bool,
        meta_max_length: usize,
    ) -> Result<Self> {
        let user_agent = user_agent.into();
        if user_agent.is_empty() {
            return Err(TitleError::InvalidArgument(
                "User-Agent must not be empty".to_string(),
            ));
        }
        if meta_max_length == 0 || meta_max_length > meta::META_MAX_LENGTH {
            return Err(TitleError::InvalidArgument(format!(
                "meta_max_length must be between 1 and {}",
                meta::META_MAX_LENGTH
            )));
        }
        Ok(Self {
            user_agent,
            show_errors,
            meta_max_length,
            read_timeout: Duration::from_secs(network::READ_TIMEOUT_SECS),
        })
    }

    /// Override the read deadline
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: network::USER_AGENT.to_string(),
            show_errors: false,
            meta_max_length: meta::META_MAX_LENGTH,
            read_timeout: Duration::from_secs(network::READ_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- construction ---

    #[test]
    fn new_with_valid_arguments() {
        let config = FetchConfig::new("agent/1.0", true, 2048).unwrap();
        assert_eq!(config.user_agent, "agent/1.0");
        assert!(config.show_errors);
        assert_eq!(config.meta_max_length, 2048);
        assert_eq!(
            config.read_timeout,
            Duration::from_secs(network::READ_TIMEOUT_SECS)
        );
    }

    #[test]
    fn new_rejects_empty_user_agent() {
        let result = FetchConfig::new("", false, 4080);
        assert!(matches!(result, Err(TitleError::InvalidArgument(_))));
    }

    #[test]
    fn new_rejects_zero_meta_max_length() {
        let result = FetchConfig::new("agent", false, 0);
        assert!(matches!(result, Err(TitleError::InvalidArgument(_))));
    }

    #[test]
    fn new_rejects_oversized_meta_max_length() {
        let result = FetchConfig::new("agent", false, meta::META_MAX_LENGTH + 1);
        assert!(matches!(result, Err(TitleError::InvalidArgument(_))));
    }

    #[test]
    fn new_accepts_boundary_meta_max_length() {
        assert!(FetchConfig::new("agent", false, 1).is_ok());
        assert!(FetchConfig::new("agent", false, meta::META_MAX_LENGTH).is_ok());
    }

    // --- defaults ---

    #[test]
    fn default_uses_crate_user_agent() {
        let config = FetchConfig::default();
        assert!(config.user_agent.starts_with("icytitle/"));
        assert!(!config.show_errors);
        assert_eq!(config.meta_max_length, meta::META_MAX_LENGTH);
    }

    #[test]
    fn with_read_timeout_overrides() {
        let config = FetchConfig::default().with_read_timeout(Duration::from_millis(50));
        assert_eq!(config.read_timeout, Duration::from_millis(50));
    }
}
