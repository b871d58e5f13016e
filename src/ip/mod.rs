mod external;

pub use external::PublicIpResolver;

use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait IpResolver: Send + Sync {
    /// Current public IPv4 address of this host
    async fn resolve(&self) -> Result<Ipv4Addr>;
}
