//! Court selection for the scheduled cycle.

use std::collections::BTreeMap;

use courtbot_core::Court;

/// Courts per booking slot is capped so one cycle cannot drain the pool
/// on a single hour.
const MAX_COURTS_PER_HOUR: usize = 2;

/// Courts to attempt per target hour, in attempt order.
pub type SelectionPlan = BTreeMap<u8, Vec<Court>>;

/// Greedy continuity pass over per-hour options.
///
/// For each hour the preferred courts are the previous hour's selection
/// when it is non-empty, otherwise the next hour's options. Preferred
/// courts come first, remaining options after, each group keeping the
/// input order, capped at two. Staying on the same court across adjacent
/// hours turns single slots into contiguous blocks.
pub fn build_plan(options: &BTreeMap<u8, Vec<Court>>) -> SelectionPlan {
    let mut selected = SelectionPlan::new();

    for (&hour, current) in options {
        let behind = hour
            .checked_sub(1)
            .and_then(|h| selected.get(&h))
            .cloned()
            .unwrap_or_default();
        let ahead = options.get(&(hour + 1)).cloned().unwrap_or_default();
        let preferred = if behind.is_empty() { ahead } else { behind };

        let mut choices: Vec<Court> = current
            .iter()
            .filter(|&court| preferred.contains(court))
            .copied()
            .collect();
        choices.extend(
            current
                .iter()
                .filter(|&court| !preferred.contains(court))
                .copied(),
        );
        choices.truncate(MAX_COURTS_PER_HOUR);

        selected.insert(hour, choices);
    }

    selected
}
