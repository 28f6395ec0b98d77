// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve a story's effort estimate, inheriting an even share of the parent's raw estimate for leaf items
// role: derivation/estimate-resolver
// inputs: Story; StoryRepo for parent/children resolution
// outputs: Option<f64> estimate (real-valued share, never truncated)
// invariants:
// - Items with sub-items never carry an estimate
// - Only the parent's raw estimate is read, never its derived one, so resolution is at most one level deep
// - A parent whose children list is empty yields None instead of dividing by zero
// errors: Tracker failures while resolving links propagate unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::errors::TrackerError;
use crate::story::Story;
use crate::story_repo::StoryRepo;

pub fn resolve_estimate(story: &Story, repo: &StoryRepo) -> Result<Option<f64>, TrackerError> {
  // Phase 1: parent-level items carry no estimate of their own
  if !repo.children(story)?.is_empty() {
    return Ok(None);
  }

  // Phase 2: a leaf's own estimate wins
  if let Some(own) = story.raw_estimate() {
    return Ok(Some(own));
  }

  // Phase 3: fall back to an even share of the parent's raw estimate
  let Some(parent) = repo.parent(story)? else {
    return Ok(None);
  };
  let Some(parent_estimate) = parent.raw_estimate() else {
    return Ok(None);
  };

  let siblings = repo.children(&parent)?.len();

  if siblings == 0 {
    return Ok(None);
  }

  Ok(Some(parent_estimate / siblings as f64))
}
