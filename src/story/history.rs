// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Find the first time a work item entered a named status from its change history
// role: derivation/timestamp-extractor
// inputs: Unordered change events; target status name
// outputs: Earliest matching event time, or None
// invariants:
// - Events are ordered by time with a stable sort; ties keep original collection order
// - Only transitions with field == "status" and toString == target count
// - Pure: no IO, never panics
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, FixedOffset};

use crate::model::History;

const STATUS_FIELD: &str = "status";

/// Time of the earliest event that moved the item into `status`.
pub fn status_timestamp(histories: &[History], status: &str) -> Option<DateTime<FixedOffset>> {
  let mut ordered: Vec<&History> = histories.iter().collect();
  ordered.sort_by_key(|h| h.created);

  ordered
    .into_iter()
    .find(|h| {
      h.items
        .iter()
        .any(|i| i.field == STATUS_FIELD && i.to_string.as_deref() == Some(status))
    })
    .map(|h| h.created)
}

/// First hit among `statuses`, tried in order (primary, then fallbacks).
pub fn first_status_timestamp(histories: &[History], statuses: &[&str]) -> Option<DateTime<FixedOffset>> {
  statuses.iter().find_map(|s| status_timestamp(histories, s))
}
