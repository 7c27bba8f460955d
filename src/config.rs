//! API Endpoint Configuration

/// Backend origin used when nothing overrides it
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Session storage key for pointing the app at another backend during dev
pub const API_BASE_OVERRIDE_KEY: &str = "apiBase";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the backend origin, honoring a session storage override
    pub fn from_window() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(API_BASE_OVERRIDE_KEY).ok())
            .flatten();
        match stored {
            Some(base) if !base.trim().is_empty() => Self { base_url: base },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_dev_backend() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8080");
    }
}
