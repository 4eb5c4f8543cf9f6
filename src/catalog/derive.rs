//! Cascading selection projections (make → model → year).
//!
//! Each projection is recomputed from the catalog whenever the upstream
//! selection changes; nothing here caches or tracks selection state.

use std::collections::BTreeSet;

use crate::domain::VehicleRecord;

/// Unique makes, ascending.
pub fn distinct_makes<R: VehicleRecord>(catalog: &[R]) -> Vec<String> {
    catalog
        .iter()
        .map(|r| r.make())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Unique models listed under `make`, ascending.
pub fn models_for_make<R: VehicleRecord>(catalog: &[R], make: &str) -> Vec<String> {
    catalog
        .iter()
        .filter(|r| r.make() == make)
        .map(|r| r.model())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Unique years listed under `make` + `model`, most recent first.
pub fn years_for_make_model<R: VehicleRecord>(catalog: &[R], make: &str, model: &str) -> Vec<i32> {
    catalog
        .iter()
        .filter(|r| r.make() == make && r.model() == model)
        .map(|r| r.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
