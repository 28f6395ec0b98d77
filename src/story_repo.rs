// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run-scoped memoizing repository of stories keyed by item reference; drives windowed discovery
// role: repository/cache
// inputs: Tracker backend; estimate field name
// outputs: Shared Rc<Story> handles; lazy StorySearch iterator over a day window
// side_effects: Tracker calls on cache misses and while paging a search
// invariants:
// - At most one fetch per reference for find_by_key; the same Rc is returned on every hit
// - search() inserts each yielded story under its key, replacing any stale entry
// - A failed fetch caches nothing and is returned to the caller unchanged
// - Lookups never recurse, so cyclic parent/child links cannot loop
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::errors::TrackerError;
use crate::model::Issue;
use crate::story::Story;
use crate::tracker::{SearchQuery, Tracker};

pub struct StoryRepo {
  tracker: Box<dyn Tracker>,
  estimate_field: String,
  stories: RefCell<HashMap<String, Rc<Story>>>,
}

impl StoryRepo {
  pub fn new(tracker: Box<dyn Tracker>, estimate_field: &str) -> Self {
    Self {
      tracker,
      estimate_field: estimate_field.to_string(),
      stories: RefCell::new(HashMap::new()),
    }
  }

  /// Cached story for `key`, fetching it on first use.
  pub fn find_by_key(&self, key: &str) -> Result<Rc<Story>, TrackerError> {
    if let Some(story) = self.stories.borrow().get(key).cloned() {
      return Ok(story);
    }

    debug!(key, "fetching work item");
    let issue = self.tracker.issue_by_key(key)?;
    let story = Rc::new(Story::new(issue, &self.estimate_field));
    self.stories.borrow_mut().insert(key.to_string(), Rc::clone(&story));

    Ok(story)
  }

  /// Lazily page through items matching `query`, caching each as it is yielded.
  pub fn search(&self, query: SearchQuery) -> StorySearch<'_> {
    StorySearch {
      repo: self,
      query,
      buffered: Vec::new().into_iter(),
      next_start: Some(0),
    }
  }

  pub fn parent(&self, story: &Story) -> Result<Option<Rc<Story>>, TrackerError> {
    story.parent_key().map(|key| self.find_by_key(key)).transpose()
  }

  pub fn children(&self, story: &Story) -> Result<Vec<Rc<Story>>, TrackerError> {
    story.child_keys().map(|key| self.find_by_key(key)).collect()
  }

  #[cfg(test)]
  pub fn cached_len(&self) -> usize {
    self.stories.borrow().len()
  }

  fn remember(&self, issue: Issue) -> Rc<Story> {
    let story = Rc::new(Story::new(issue, &self.estimate_field));
    self.stories.borrow_mut().insert(story.key().to_string(), Rc::clone(&story));
    story
  }
}

/// Iterator returned by [`StoryRepo::search`]; fetches one page at a time.
pub struct StorySearch<'r> {
  repo: &'r StoryRepo,
  query: SearchQuery,
  buffered: std::vec::IntoIter<Issue>,
  next_start: Option<usize>,
}

impl Iterator for StorySearch<'_> {
  type Item = Result<Rc<Story>, TrackerError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(issue) = self.buffered.next() {
        return Some(Ok(self.repo.remember(issue)));
      }

      let start = self.next_start?;

      match self.repo.tracker.search_page(&self.query, start) {
        Ok(page) => {
          debug!(start, total = page.total, page_size = page.max_results, "search page");
          self.next_start = page.next_start();
          self.buffered = page.issues.into_iter();
        }
        Err(err) => {
          self.next_start = None;
          return Some(Err(err));
        }
      }
    }
  }
}
