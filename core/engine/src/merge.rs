//! Record-set merging with primary-wins conflict resolution.

use credsync_store::RecordSet;

/// Merge two record sets into one.
///
/// The output key set is exactly the union of the input key sets. For keys
/// present in both, the primary's record survives; the secondary's record is
/// used only for keys the primary does not have. Deterministic and free of
/// side effects.
///
/// The priority rule is the one piece of business logic here that must never
/// change silently: primary always wins.
pub fn merge_record_sets(primary: RecordSet, secondary: RecordSet) -> RecordSet {
    let mut merged = primary;
    for (key, record) in secondary {
        merged.entry(key).or_insert(record);
    }
    merged
}
