use std::collections::BTreeSet;
use std::path::Path;

use super::sample_rate::{get_sample_rate, SampleRate};

/// Collect the distinct sample rates found across a list of files
///
/// Unreadable files contribute `SampleRate::Unknown`.
pub fn distinct_sample_rates<P: AsRef<Path>>(paths: &[P]) -> BTreeSet<SampleRate> {
    paths
        .iter()
        .map(|p| get_sample_rate(p.as_ref()))
        .collect()
}

/// True iff every file reports exactly `target_sample_rate`
///
/// An empty list is never uniform, and a single unreadable file makes the
/// whole list non-uniform.
pub fn is_same_sample_rate<P: AsRef<Path>>(paths: &[P], target_sample_rate: u32) -> bool {
    let rates = distinct_sample_rates(paths);
    log::debug!("Distinct sample rates across {} files: {:?}", paths.len(), rates);

    rates.len() == 1 && rates.contains(&SampleRate::Known(target_sample_rate))
}
