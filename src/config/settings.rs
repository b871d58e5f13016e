use std::fmt;
use std::path::Path;

use reqwest::Url;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://dns.api.gandi.net/api/v5/";
pub const DEFAULT_IP_URL: &str = "https://api.ipify.org";
pub const DEFAULT_TTL: u32 = 10800;

/// Record name LiveDNS uses for the domain apex
pub const APEX: &str = "@";

const REDACTED: &str = "********";

/// The LiveDNS API key. Never printed, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", REDACTED)
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Optional config file. Every key can also come from the environment,
/// which takes precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub ttl: Option<u32>,
    pub ip_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub api_key: ApiKey,
    pub api_url: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    pub ttl: u32,
    pub ip_url: String,
    pub log_level: String,
}

/// The single record one reconcile pass manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub domain: String,
    pub name: String,
    pub ttl: u32,
}

impl FileSettings {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Settings {
    /// Build settings from the process environment, layered over `path` if given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => FileSettings::read(path)?,
            None => FileSettings::default(),
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    pub fn from_sources<F>(file: FileSettings, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, wherever they came from
        let lookup = |key: &str, fallback: Option<String>| {
            env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| fallback.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
        };

        let api_key = lookup("APIKEY", file.api_key).ok_or_else(|| {
            Error::config(
                "Missing 'APIKEY'. See https://docs.gandi.net/en/domain_names/advanced_users/api.html",
            )
        })?;

        let domain = lookup("DOMAIN", file.domain).ok_or_else(|| {
            Error::config("Missing 'DOMAIN'. Set this to the domain being updated")
        })?;

        let subdomain = lookup("SUBDOMAIN", file.subdomain);

        let ttl = match env("TTL").map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(raw) => parse_ttl(&raw)?,
            None => file.ttl.unwrap_or(DEFAULT_TTL),
        };
        if ttl == 0 {
            return Err(Error::config("'TTL' must be greater than zero"));
        }

        let api_url = lookup("APIURL", file.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_url("APIURL", &api_url)?;

        let ip_url = lookup("IPURL", file.ip_url).unwrap_or_else(|| DEFAULT_IP_URL.to_string());
        validate_url("IPURL", &ip_url)?;

        let log_level = lookup("LOG_LEVEL", file.log_level).unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api_key: ApiKey::new(api_key),
            api_url,
            domain,
            subdomain,
            ttl,
            ip_url,
            log_level,
        })
    }

    /// LiveDNS record name: the subdomain label, or `@` for the apex.
    pub fn record_name(&self) -> &str {
        self.subdomain.as_deref().unwrap_or(APEX)
    }

    pub fn target(&self) -> Target {
        Target {
            domain: self.domain.clone(),
            name: self.record_name().to_string(),
            ttl: self.ttl,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == APEX {
            write!(f, "{}", self.domain)
        } else {
            write!(f, "{}.{}", self.name, self.domain)
        }
    }
}

fn parse_ttl(raw: &str) -> Result<u32> {
    raw.parse()
        .map_err(|_| Error::config(format!("'TTL' must be a number of seconds, got '{}'", raw)))
}

fn validate_url(key: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| Error::config(format!("'{}' is not a valid URL ({}): {}", key, raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config(format!(
            "'{}' must use http or https, got '{}'",
            key, other
        ))),
    }
}
