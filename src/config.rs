//! Connection and refresh configuration.
//!
//! Flags are parsed by the binary; this module validates them into a
//! [`Config`].

use std::time::Duration;

use crate::activity::EvictionPolicy;

/// Default time between full refreshes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Authentication header sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    ApiKey(String),
    Basic { user: String, password: String },
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::None => write!(f, "None"),
            Auth::ApiKey(_) => write!(f, "ApiKey(***)"),
            Auth::Basic { user, .. } => write!(f, "Basic({}:***)", user),
        }
    }
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `scheme://host:port` without trailing slash.
    pub base_url: String,
    pub auth: Auth,
    pub interval: Duration,
    pub eviction: EvictionPolicy,
}

/// Raw connection options as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub authless: bool,
}

/// Configuration errors reported at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host does not start with `http://` or `https://`.
    InvalidScheme(String),
    /// API key given together with user or password.
    ConflictingAuth,
    /// Neither an API key nor a complete user/password pair.
    MissingAuth,
    /// Refresh interval of zero.
    ZeroInterval,
    /// Eviction after zero absent cycles, which would forget every index
    /// before a second sample could give it a rate.
    ZeroEviction,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidScheme(host) => {
                write!(f, "host must start with http:// or https:// (got '{}')", host)
            }
            ConfigError::ConflictingAuth => write!(
                f,
                "cannot use both API key and username/password authentication"
            ),
            ConfigError::MissingAuth => write!(
                f,
                "must provide either API key or both username and password"
            ),
            ConfigError::ZeroInterval => write!(f, "refresh interval must be positive"),
            ConfigError::ZeroEviction => write!(f, "--evict-after must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

impl ConnectOptions {
    /// Validates the host and selects the authentication mode.
    pub fn resolve(&self) -> Result<(String, Auth), ConfigError> {
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(ConfigError::InvalidScheme(self.host.clone()));
        }
        let base_url = format!("{}:{}", self.host.trim_end_matches('/'), self.port);

        if self.authless {
            return Ok((base_url, Auth::None));
        }

        let api_key = non_empty(&self.api_key);
        let user = non_empty(&self.user);
        let password = non_empty(&self.password);
        let auth = match (api_key, user, password) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ConfigError::ConflictingAuth);
            }
            (Some(key), None, None) => Auth::ApiKey(key.to_string()),
            (None, Some(user), Some(password)) => Auth::Basic {
                user: user.to_string(),
                password: password.to_string(),
            },
            (None, _, _) => return Err(ConfigError::MissingAuth),
        };
        Ok((base_url, auth))
    }
}

impl Config {
    pub fn new(
        connect: &ConnectOptions,
        interval: Duration,
        evict_after: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        let (base_url, auth) = connect.resolve()?;
        let eviction = match evict_after {
            Some(0) => return Err(ConfigError::ZeroEviction),
            Some(cycles) => EvictionPolicy::AbsentFor(cycles),
            None => EvictionPolicy::Never,
        };
        Ok(Self {
            base_url,
            auth,
            interval,
            eviction,
        })
    }
}
