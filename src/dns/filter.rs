//! In-memory narrowing of a zone listing. No I/O, input is never mutated.

use super::provider::ZoneRecord;

/// A field-equality predicate over a [`ZoneRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Type(&'a str),
    Name(&'a str),
    /// Matches a record whose value set is exactly `[value]`
    Value(&'a str),
}

impl Selector<'_> {
    pub fn matches(&self, record: &ZoneRecord) -> bool {
        match *self {
            Selector::Type(record_type) => record.record_type == record_type,
            Selector::Name(name) => record.name == name,
            Selector::Value(value) => record.values.len() == 1 && record.values[0] == value,
        }
    }
}

/// Records satisfying every selector, in their original order.
pub fn filter_records<'r>(records: &'r [ZoneRecord], selectors: &[Selector<'_>]) -> Vec<&'r ZoneRecord> {
    records
        .iter()
        .filter(|record| selectors.iter().all(|selector| selector.matches(record)))
        .collect()
}

/// The authoritative record for (`record_type`, `name`).
///
/// When the provider returns several, the first one in response order wins.
/// That is a simplification, not a statement about what the zone means.
pub fn find_record<'r>(
    records: &'r [ZoneRecord],
    record_type: &str,
    name: &str,
) -> Option<&'r ZoneRecord> {
    filter_records(records, &[Selector::Type(record_type), Selector::Name(name)])
        .into_iter()
        .next()
}
