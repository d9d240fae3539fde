use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The blood groups the UI offers. Not enforced: any label is a valid key.
pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"];

/// Mapping from blood-group label to available units.
///
/// Counts never go below zero: every mutation goes through [`InventoryMap::adjust`],
/// which clamps at zero. A group that has never been stocked reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryMap(BTreeMap<String, u64>);

impl InventoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units currently available for `group` (0 when unknown).
    pub fn available(&self, group: &str) -> u64 {
        self.0.get(group).copied().unwrap_or(0)
    }

    /// Apply `count = max(0, count + delta)` and return the resulting count.
    ///
    /// Unknown groups start at 0 and are inserted, even when the result is 0.
    pub fn adjust(&mut self, group: &str, delta: i64) -> u64 {
        let current = self.available(group);
        let next = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        self.0.insert(group.to_string(), next);
        next
    }

    /// Credit `qty` units to `group`.
    pub fn add(&mut self, group: &str, qty: u64) -> u64 {
        self.adjust(group, clamp_delta(qty))
    }

    /// Debit `qty` units from `group`, clamping at zero.
    pub fn remove(&mut self, group: &str, qty: u64) -> u64 {
        self.adjust(group, -clamp_delta(qty))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for InventoryMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn clamp_delta(qty: u64) -> i64 {
    i64::try_from(qty).unwrap_or(i64::MAX)
}

/// Stock used when a fresh store is created with seeding enabled.
pub fn default_seed() -> InventoryMap {
    BLOOD_GROUPS
        .iter()
        .zip([10u64, 5, 8, 4, 12, 6, 3, 2])
        .map(|(g, n)| (*g, n))
        .collect()
}
