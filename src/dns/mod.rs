mod filter;
mod livedns;
mod provider;

pub use filter::{filter_records, find_record, Selector};
pub use livedns::LiveDnsClient;
pub use provider::{DnsProvider, RecordUpdate, ZoneRecord};
