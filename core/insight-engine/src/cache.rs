//! FILENAME: core/insight-engine/src/cache.rs
//! Group Cache - the intermediate representation every grouped view shares.
//!
//! Architecture:
//! - Each distinct grouping key is interned once and given a `GroupId`
//! - Ids are handed out in first-appearance order, so iterating ids in
//!   ascending order walks the groups in the order the table introduced them
//! - One accumulator per group collects the values in a single pass

use rustc_hash::FxHashMap;

use crate::definition::AggregationType;

// ============================================================================
// KEY INTERNING
// ============================================================================

/// Index of a group within a `GroupIndex`.
pub type GroupId = u32;

/// Interns grouping keys in first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    key_to_id: FxHashMap<String, GroupId>,
    id_to_key: Vec<String>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `key`, creating it if unseen.
    pub fn intern(&mut self, key: &str) -> GroupId {
        if let Some(&id) = self.key_to_id.get(key) {
            return id;
        }

        let id = self.id_to_key.len() as GroupId;
        self.id_to_key.push(key.to_string());
        self.key_to_id.insert(key.to_string(), id);
        id
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.id_to_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_key.is_empty()
    }
}

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Running state for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateAccumulator {
    /// Rows in the group, including those with a missing value.
    pub rows: u64,
    /// Rows with a numeric value.
    pub count_numbers: u64,
    pub sum: f64,
}

impl AggregateAccumulator {
    pub fn add_number(&mut self, value: f64) {
        self.rows += 1;
        self.count_numbers += 1;
        self.sum += value;
    }

    pub fn add_missing(&mut self) {
        self.rows += 1;
    }

    /// Computes the final aggregate value.
    /// `None` when the aggregate is undefined for this group.
    pub fn compute(&self, aggregation: AggregationType) -> Option<f64> {
        match aggregation {
            AggregationType::Count => Some(self.rows as f64),
            AggregationType::Sum => Some(self.sum),
            AggregationType::Mean => {
                if self.count_numbers > 0 {
                    Some(self.sum / self.count_numbers as f64)
                } else {
                    None
                }
            }
        }
    }
}

// ============================================================================
// GROUP CACHE
// ============================================================================

/// Keys and accumulators for one grouping pass over a table.
#[derive(Debug, Clone, Default)]
pub struct GroupCache {
    pub index: GroupIndex,
    accumulators: Vec<AggregateAccumulator>,
}

impl GroupCache {
    /// Groups `keys` (one per row, `None` = no group) and feeds the matching
    /// entry of `values` into each group. Without `values` every row counts
    /// as a missing value, which is all `Count` needs.
    pub fn build(keys: &[Option<String>], values: Option<&[Option<f64>]>) -> Self {
        let mut cache = GroupCache::default();

        for (row, key) in keys.iter().enumerate() {
            let Some(key) = key else { continue };

            let id = cache.index.intern(key) as usize;
            if id == cache.accumulators.len() {
                cache.accumulators.push(AggregateAccumulator::default());
            }

            match values.and_then(|v| v.get(row).copied().flatten()) {
                Some(n) => cache.accumulators[id].add_number(n),
                None => cache.accumulators[id].add_missing(),
            }
        }

        cache
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates `(key, accumulator)` in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregateAccumulator)> + '_ {
        self.index.id_to_key.iter().map(String::as_str).zip(self.accumulators.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|k| k.map(str::to_string)).collect()
    }

    #[test]
    fn test_intern_preserves_first_appearance() {
        let mut index = GroupIndex::new();
        assert_eq!(index.intern("B"), 0);
        assert_eq!(index.intern("A"), 1);
        assert_eq!(index.intern("B"), 0);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_build_groups_values() {
        let cache = GroupCache::build(
            &keys(&[Some("A"), Some("B"), None, Some("A")]),
            Some(&[Some(4.0), Some(5.0), Some(9.0), None][..]),
        );

        assert_eq!(cache.len(), 2);
        let (key, a) = cache.iter().next().unwrap();
        assert_eq!(key, "A");
        assert_eq!(a.rows, 2);
        assert_eq!(a.count_numbers, 1);
        assert_eq!(a.compute(AggregationType::Mean), Some(4.0));
        assert_eq!(a.compute(AggregationType::Sum), Some(4.0));
        assert_eq!(a.compute(AggregationType::Count), Some(2.0));
    }

    #[test]
    fn test_mean_without_values_is_undefined() {
        let cache = GroupCache::build(&keys(&[Some("A")]), Some(&[None][..]));
        let (_, a) = cache.iter().next().unwrap();
        assert_eq!(a.compute(AggregationType::Mean), None);
        assert_eq!(a.compute(AggregationType::Sum), Some(0.0));
    }

    #[test]
    fn test_build_without_values_counts_rows() {
        let cache = GroupCache::build(&keys(&[Some("x"), Some("y"), Some("x")]), None);
        let counts: Vec<(&str, f64)> = cache
            .iter()
            .map(|(k, acc)| (k, acc.compute(AggregationType::Count).unwrap()))
            .collect();
        assert_eq!(counts, vec![("x", 2.0), ("y", 1.0)]);
    }
}
