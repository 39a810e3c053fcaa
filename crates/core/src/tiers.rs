//! Stage 3: tier grouping.

use crate::model::Tiers;

/// Group reconstructed lines into one tier map per utterance.
///
/// A `*SPK:` line opens a new group keyed by `SPK`; each `%marker:` line
/// after it adds an entry keyed by `%marker`. Dependent tiers before the
/// first main tier and header lines are ignored. Tier text is
/// re-joined with single spaces.
pub fn group_tiers(lines: &[String]) -> Vec<Tiers> {
    let mut groups: Vec<Tiers> = Vec::new();

    for line in lines {
        if line.starts_with('@') {
            continue;
        }
        let mut items = line.split_whitespace();
        let Some(marker) = items.next() else {
            continue;
        };
        let text = items.collect::<Vec<_>>().join(" ");

        if let Some(speaker) = marker.strip_prefix('*') {
            let code = speaker.trim_start_matches('*').trim_end_matches(':');
            let mut tiers = Tiers::new();
            tiers.insert(code.to_string(), text);
            groups.push(tiers);
        } else if marker.starts_with('%') {
            if let Some(current) = groups.last_mut() {
                current.insert(marker.trim_end_matches(':').to_string(), text);
            }
        }
    }

    groups
}
