use std::fmt;
use std::net::Ipv4Addr;

use tracing::{debug, info};

use crate::config::{Settings, Target};
use crate::dns::{find_record, DnsProvider, LiveDnsClient, RecordUpdate};
use crate::error::Result;
use crate::ip::{IpResolver, PublicIpResolver};

/// The only record type this tool manages
pub const RECORD_TYPE: &str = "A";

/// Observed state after resolving the public IP and reading the zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub public_ip: Ipv4Addr,
    /// Trimmed first value of the authoritative A record, if the zone has one
    pub zone_ip: Option<String>,
}

impl Plan {
    pub fn is_current(&self) -> bool {
        self.zone_ip
            .as_deref()
            .map_or(false, |zone_ip| zone_ip == self.public_ip.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate {
        ip: Ipv4Addr,
    },
    Updated {
        previous: Option<String>,
        current: Ipv4Addr,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UpToDate { ip } => write!(f, "Record up to date ({})", ip),
            Outcome::Updated {
                previous: Some(previous),
                current,
            } => write!(f, "DNS A record updated: {} -> {}", previous, current),
            Outcome::Updated {
                previous: None,
                current,
            } => write!(f, "DNS A record created: {}", current),
        }
    }
}

/// One pass of: resolve public IP, read zone, compare, write if different.
///
/// Every step is awaited before the next starts, and the only write is a
/// single PUT issued after every read has succeeded.
pub struct Reconciler<'a> {
    resolver: &'a dyn IpResolver,
    provider: &'a dyn DnsProvider,
    target: &'a Target,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        resolver: &'a dyn IpResolver,
        provider: &'a dyn DnsProvider,
        target: &'a Target,
    ) -> Self {
        Self {
            resolver,
            provider,
            target,
        }
    }

    /// Read-only half of the pass.
    pub async fn plan(&self) -> Result<Plan> {
        let public_ip = self.resolver.resolve().await?;
        debug!("Public IP is {}", public_ip);

        let records = self.provider.list_records(&self.target.domain).await?;

        // No matching record (or one with no values) means nothing published yet
        let zone_ip = find_record(&records, RECORD_TYPE, &self.target.name)
            .and_then(|record| record.first_value())
            .map(str::to_string);

        match &zone_ip {
            Some(zone_ip) => debug!("{} currently points at {}", self.target, zone_ip),
            None => info!("No {} record found for {}", RECORD_TYPE, self.target),
        }

        Ok(Plan { public_ip, zone_ip })
    }

    pub async fn apply(&self, plan: Plan) -> Result<Outcome> {
        if plan.is_current() {
            info!("DNS record {} already set to {}", self.target, plan.public_ip);
            return Ok(Outcome::UpToDate { ip: plan.public_ip });
        }

        let update = RecordUpdate {
            name: self.target.name.clone(),
            record_type: RECORD_TYPE.to_string(),
            value: plan.public_ip.to_string(),
            ttl: self.target.ttl,
        };

        info!(
            "Updating {} from {} to {} via {}",
            self.target,
            plan.zone_ip.as_deref().unwrap_or("<none>"),
            plan.public_ip,
            self.provider.provider_name()
        );

        self.provider
            .replace_record(&self.target.domain, &update)
            .await?;

        info!("Successfully updated {} to {}", self.target, plan.public_ip);

        Ok(Outcome::Updated {
            previous: plan.zone_ip,
            current: plan.public_ip,
        })
    }

    pub async fn run(&self) -> Result<Outcome> {
        let plan = self.plan().await?;
        self.apply(plan).await
    }
}

/// Reconcile the configured record against the live public IP.
pub async fn update(settings: &Settings) -> Result<Outcome> {
    let resolver = PublicIpResolver::new(&settings.ip_url)?;
    let provider = LiveDnsClient::new(&settings.api_url, &settings.api_key)?;
    let target = settings.target();

    Reconciler::new(&resolver, &provider, &target).run().await
}

/// Same reads as [`update`], never writes.
pub async fn check(settings: &Settings) -> Result<Plan> {
    let resolver = PublicIpResolver::new(&settings.ip_url)?;
    let provider = LiveDnsClient::new(&settings.api_url, &settings.api_key)?;
    let target = settings.target();

    Reconciler::new(&resolver, &provider, &target).plan().await
}
