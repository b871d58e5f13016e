use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::IpResolver;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Asks an IP echo service (plain-text body, no markup) for our address.
/// No retries: the next scheduled run is the retry.
pub struct PublicIpResolver {
    client: Client,
    url: String,
}

impl PublicIpResolver {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl IpResolver for PublicIpResolver {
    async fn resolve(&self) -> Result<Ipv4Addr> {
        tracing::debug!("Resolving public IP via {}", self.url);

        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::network(format!("{}: {}", self.url, e)))?
            .text()
            .await
            .map_err(|e| Error::network(format!("{}: {}", self.url, e)))?;

        parse_ip(&body)
    }
}

fn parse_ip(body: &str) -> Result<Ipv4Addr> {
    let ip_str = body.trim();
    ip_str
        .parse()
        .map_err(|_| Error::network(format!("Expected an IPv4 address, got '{}'", ip_str)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ip_trims_whitespace() {
        let test_cases = vec!["203.0.113.9", "203.0.113.9\n", "  203.0.113.9  ", "\t203.0.113.9\r\n"];

        for case in test_cases {
            assert_eq!(
                parse_ip(case).unwrap(),
                Ipv4Addr::new(203, 0, 113, 9),
                "Failed to parse: {:?}",
                case
            );
        }
    }

    #[test]
    fn test_parse_ip_rejects_non_ipv4() {
        for case in ["2001:db8::1", "<html>oops</html>", ""] {
            let err = parse_ip(case).unwrap_err();
            assert_eq!(err.exit_code(), 2, "accepted {:?}", case);
        }
    }
}
