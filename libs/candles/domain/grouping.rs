//! Group-by-market partition
//!
//! Markets keep the order in which they first appear in the input, and
//! records keep their relative input order inside each market.

use std::collections::HashMap;

use super::CandleRecord;

/// All records for one market, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct MarketGroup<'a> {
    pub market: String,
    pub records: Vec<&'a CandleRecord>,
}

/// Transient market -> records mapping, rebuilt every poll
#[derive(Debug, Default)]
pub struct MarketGroups<'a> {
    groups: Vec<MarketGroup<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> MarketGroups<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its market, opening a new group on first sight
    pub fn push(&mut self, record: &'a CandleRecord) {
        let market = record.market_key();
        match self.index.get(&market) {
            Some(&idx) => self.groups[idx].records.push(record),
            None => {
                self.index.insert(market.clone(), self.groups.len());
                self.groups.push(MarketGroup {
                    market,
                    records: vec![record],
                });
            }
        }
    }

    pub fn get(&self, market: &str) -> Option<&MarketGroup<'a>> {
        self.index.get(market).map(|&idx| &self.groups[idx])
    }

    /// Market identifiers in first-appearance order
    pub fn markets(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.market.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarketGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for MarketGroups<'a> {
    type Item = MarketGroup<'a>;
    type IntoIter = std::vec::IntoIter<MarketGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Stable partition of `records` by their `market` field
pub fn group_by_market(records: &[CandleRecord]) -> MarketGroups<'_> {
    let mut groups = MarketGroups::new();
    for record in records {
        groups.push(record);
    }
    groups
}
