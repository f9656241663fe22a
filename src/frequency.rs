use std::collections::{btree_map, BTreeMap};
use std::io::{BufReader, Read};

use log::debug;

use crate::error::{Error, Result};

/// Occurrence count per byte value. Iterates in ascending symbol order, which
/// is what makes header serialization and tree construction reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every byte of `reader` until end of stream.
    pub fn collect<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut reader = BufReader::new(reader);
        let mut buffer = [0u8; 8192];

        loop {
            let read = reader
                .read(&mut buffer)
                .map_err(|_| Error::InvalidInputFile)?;
            if read == 0 {
                break;
            }
            for &symbol in &buffer[..read] {
                *table.counts.entry(symbol).or_insert(0) += 1;
            }
        }

        debug!(
            "collected {} distinct symbols over {} bytes",
            table.len(),
            table.total()
        );
        Ok(table)
    }

    /// Sets the count for `symbol`, returning the previous count if any.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the source stream.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Like [`total`](Self::total), but `None` when the counts do not fit a
    /// `u64`. Every tree weight is bounded by this sum.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |sum, &count| sum.checked_add(count))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.counts.iter())
    }
}

pub struct Iter<'a>(btree_map::Iter<'a, u8, u64>);

impl Iterator for Iter<'_> {
    type Item = (u8, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(&symbol, &count)| (symbol, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (u8, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
