//! Client configuration loaded via OrthoConfig.

use std::num::NonZeroU32;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// API used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://frontend-test-assignment-api.abz.agency/api/v1";

/// Configured values that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid API base URL `{value}`: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The base URL cannot carry relative endpoints.
    #[error("API base URL `{0}` cannot be a base for endpoints")]
    OpaqueBaseUrl(String),
    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Connection and paging settings for the roster client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRONTEND")]
pub struct ClientSettings {
    /// Base URL of the REST API.
    pub api_base_url: Option<String>,
    /// Users fetched per page.
    pub page_size: Option<u32>,
    /// Optional per-request timeout, in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the value is not a usable base URL.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let value = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let url = Url::parse(value).map_err(|source| ConfigError::InvalidBaseUrl {
            value: value.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::OpaqueBaseUrl(value.to_owned()));
        }
        Ok(url)
    }

    /// Return the configured page size, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPageSize`] when configured as zero.
    pub fn page_size(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .ok_or(ConfigError::ZeroPageSize)
    }

    /// Return the request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
