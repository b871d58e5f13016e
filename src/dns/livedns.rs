use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Serialize;

use super::provider::{DnsProvider, RecordUpdate, ZoneRecord};
use crate::config::ApiKey;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the LiveDNS v5 record API.
pub struct LiveDnsClient {
    client: Client,
    base: Url,
}

#[derive(Debug, Serialize)]
struct RrsetBody<'a> {
    rrset_ttl: u32,
    rrset_values: Vec<&'a str>,
}

impl LiveDnsClient {
    pub fn new(api_url: &str, api_key: &ApiKey) -> Result<Self> {
        let base = Url::parse(api_url)
            .map_err(|e| Error::config(format!("Invalid API URL {}: {}", api_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "'{}' cannot be used as an API base URL",
                api_url
            )));
        }

        let mut key = HeaderValue::from_str(api_key.expose())
            .map_err(|_| Error::config("'APIKEY' contains characters not allowed in a header"))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(crate::USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base })
    }

    /// `segments` appended below the base path, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("'{}' cannot be used as an API base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Api { status, body })
}

#[async_trait]
impl DnsProvider for LiveDnsClient {
    async fn list_records(&self, domain: &str) -> Result<Vec<ZoneRecord>> {
        let url = self.endpoint(&["domains", domain, "records"])?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let response = ensure_success(response).await?;

        let records: Vec<ZoneRecord> = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;

        tracing::debug!("Zone {} has {} records: {:?}", domain, records.len(), records);
        Ok(records)
    }

    async fn replace_record(&self, domain: &str, update: &RecordUpdate) -> Result<()> {
        let url = self.endpoint(&[
            "domains",
            domain,
            "records",
            &update.name,
            &update.record_type,
        ])?;
        tracing::debug!("PUT {}", url);

        let payload = RrsetBody {
            rrset_ttl: update.ttl,
            rrset_values: vec![update.value.as_str()],
        };

        let response = self
            .client
            .put(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        ensure_success(response).await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "livedns"
    }
}
