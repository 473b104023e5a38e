//! Endpoint selection, credentials and environment-driven configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};

const PRODUCTION_URL: &str = "https://app.casestack.io";
const STAGING_URL: &str = "https://staging.casestack.io";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Protocol version sent with every request in the `Accept-Version` header.
pub const API_VERSION: &str = "1.0.0";

/// The two CaseStack deployments a client can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    #[default]
    Production,
    Staging,
}

impl Endpoint {
    pub fn from_staging_flag(use_staging: bool) -> Self {
        if use_staging {
            Self::Staging
        } else {
            Self::Production
        }
    }

    /// Reads `CASESTACK_ENV`; anything other than staging means production.
    pub fn from_env() -> Self {
        match env::var("CASESTACK_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Staging => STAGING_URL,
        }
    }
}

/// API key and company id, as shown under Settings > CaseStack API.
///
/// `Debug` never prints the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    company_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, company_id: impl Into<String>) -> ApiResult<Self> {
        let api_key = api_key.into();
        let company_id = company_id.into();
        if api_key.is_empty() {
            return Err(ApiError::configuration("API key cannot be empty"));
        }
        if company_id.is_empty() {
            return Err(ApiError::configuration("Company ID cannot be empty"));
        }
        Ok(Self { api_key, company_id })
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("company_id", &self.company_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub credentials: Option<Credentials>,
    /// Request timeout handed to the stock transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `CASESTACK_ENV`: `staging` selects the staging deployment
    /// - `CASESTACK_API_KEY` and `CASESTACK_COMPANY_ID`: credentials, used
    ///   only when both are set and non-empty
    /// - `CASESTACK_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let endpoint = Endpoint::from_env();

        let credentials = match (env::var("CASESTACK_API_KEY"), env::var("CASESTACK_COMPANY_ID")) {
            (Ok(key), Ok(company)) if !key.is_empty() && !company.is_empty() => {
                Some(Credentials::new(key, company)?)
            }
            _ => None,
        };

        let timeout = env::var("CASESTACK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let config = Self {
            endpoint,
            credentials,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        company_id: impl Into<String>,
    ) -> ApiResult<Self> {
        self.credentials = Some(Credentials::new(api_key, company_id)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.timeout.is_zero() {
            return Err(ApiError::configuration("timeout cannot be zero"));
        }
        Ok(())
    }
}
