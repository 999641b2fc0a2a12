//! Direct-distance table and the table-backed distance sources.
//!
//! The table stores measured kilometers keyed by unordered city-name pair.
//! Duplicate records for the same pair resolve to the minimum, so re-loading
//! an overlapping dataset can only tighten a distance, never loosen it.

use std::collections::HashMap;

use thiserror::Error;

use crate::haversine::haversine_km;
use crate::traits::{DistanceSource, Location};

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("distance for {a} <-> {b} must be finite and non-negative, got {km}")]
    InvalidDistance { a: String, b: String, km: f64 },
}

/// Symmetric measured-distance table, keyed by unordered name pair.
///
/// Immutable value semantics: build it once (from triples or a remote
/// dataset), then share it by reference into planning calls.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(String, String), f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a collection of (a, b, km) triples into a table.
    pub fn from_triples<I, S>(triples: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (a, b, km) in triples {
            table.insert(a.as_ref(), b.as_ref(), km)?;
        }
        Ok(table)
    }

    /// Record a measured distance for an unordered pair.
    ///
    /// Negative or non-finite distances violate the table contract and fail
    /// immediately. A duplicate pair keeps the smaller value. Self-pairs are
    /// ignored (self-distance is implicitly zero, never stored).
    pub fn insert(&mut self, a: &str, b: &str, km: f64) -> Result<(), TableError> {
        if !km.is_finite() || km < 0.0 {
            return Err(TableError::InvalidDistance {
                a: a.to_string(),
                b: b.to_string(),
                km,
            });
        }
        if a == b {
            return Ok(());
        }
        let entry = self.entries.entry(pair_key(a, b)).or_insert(km);
        if km < *entry {
            *entry = km;
        }
        Ok(())
    }

    /// Measured distance for a pair, if any. Symmetric; self-pairs are zero.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(0.0);
        }
        self.entries.get(&pair_key(a, b)).copied()
    }

    /// Number of distinct pairs with a measured distance.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Strict table-only source: never estimates.
///
/// Used by planners that must stay comparable against the authoritative
/// dataset; a pair absent from the table is simply unknown.
#[derive(Debug, Clone, Copy)]
pub struct TableSource<'a> {
    table: &'a DistanceTable,
}

impl<'a> TableSource<'a> {
    pub fn new(table: &'a DistanceTable) -> Self {
        Self { table }
    }
}

impl DistanceSource for TableSource<'_> {
    fn distance(&self, a: &Location, b: &Location) -> Option<f64> {
        self.table.get(a.name(), b.name())
    }
}

/// Table-first source with great-circle fallback.
///
/// Prefers a finite positive table entry; otherwise estimates from
/// coordinates when both ends have them.
#[derive(Debug, Clone, Copy)]
pub struct FallbackSource<'a> {
    table: &'a DistanceTable,
}

impl<'a> FallbackSource<'a> {
    pub fn new(table: &'a DistanceTable) -> Self {
        Self { table }
    }
}

impl DistanceSource for FallbackSource<'_> {
    fn distance(&self, a: &Location, b: &Location) -> Option<f64> {
        if a.name() == b.name() {
            return Some(0.0);
        }
        if let Some(km) = self.table.get(a.name(), b.name()) {
            if km > 0.0 {
                return Some(km);
            }
        }
        match (a.coords(), b.coords()) {
            (Some(from), Some(to)) => Some(haversine_km(from, to)),
            _ => None,
        }
    }
}
