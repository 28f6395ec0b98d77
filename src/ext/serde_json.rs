// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups over loosely typed tracker JSON (custom fields, error bodies) with typed extraction
// role: extension/serde_json
// outputs: JsonFetch trait (for Value and Map) and JsonFetched wrapper with typed and lenient numeric extraction
// invariants: No panics; missing paths yield None; to_or_default returns T::default on failure; null is absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A located JSON value (or nothing), awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.present().and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// Numbers as-is, numeric strings parsed; anything else is None.
  pub fn to_number(&self) -> Option<f64> {
    match self.present()? {
      Value::Number(n) => n.as_f64(),
      Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
      _ => None,
    }
  }

  fn present(&self) -> Option<&'a Value> {
    self.inner.filter(|v| !v.is_null())
  }
}

/// Fetch nested values via dotted paths like "assignee.emailAddress".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

fn walk<'a>(mut cur: &'a Value, keys: std::str::Split<'_, char>) -> Option<&'a Value> {
  for key in keys {
    cur = cur.get(key)?;
  }
  Some(cur)
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    JsonFetched { inner: walk(self, path.split('.')) }
  }
}

impl JsonFetch for Map<String, Value> {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    let mut keys = path.split('.');
    let inner = keys.next().and_then(|first| self.get(first)).and_then(|head| walk(head, keys));

    JsonFetched { inner }
  }
}
