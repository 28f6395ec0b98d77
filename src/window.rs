// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Day-window iteration, ISO week start, and deterministic "now" handling for report runs
// role: windowing/calendar-days
// inputs: Start date, effective now, reference time zone
// outputs: Calendar days in [since, today); Monday of a timestamp's week
// invariants:
// - "today" is computed in the reference zone and is never itself scanned
// - week_start always returns a Monday on or before the given instant's local date
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_SINCE: &str = "2016-01-01";

pub fn parse_day(raw: &str) -> Result<NaiveDate> {
  match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
    Ok(d) => Ok(d),
    Err(_) => bail!("invalid date {:?}, expected YYYY-MM-DD", raw),
  }
}

/// Parse a `--now-override` value: RFC3339, or a bare date taken as midnight in `tz`.
pub fn parse_now_override(raw: Option<&str>, tz: Tz) -> Result<Option<DateTime<Utc>>> {
  let Some(raw) = raw else { return Ok(None) };

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(Some(dt.with_timezone(&Utc)));
  }

  let day = parse_day(raw)?;

  match day.and_hms_opt(0, 0, 0).and_then(|ndt| tz.from_local_datetime(&ndt).earliest()) {
    Some(dt) => Ok(Some(dt.with_timezone(&Utc))),
    None => bail!("cannot place {:?} in time zone {}", raw, tz),
  }
}

pub fn today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
  now.with_timezone(&tz).date_naive()
}

/// Every calendar day from `since` up to, but excluding, `until`.
pub fn days(since: NaiveDate, until: NaiveDate) -> impl Iterator<Item = NaiveDate> {
  std::iter::successors(Some(since), |d| d.checked_add_days(Days::new(1))).take_while(move |d| *d < until)
}

/// Monday of the ISO week containing `at`, as a local calendar date.
pub fn week_start<T: TimeZone>(at: &DateTime<T>) -> NaiveDate {
  let date = at.date_naive();
  let back = date.weekday().num_days_from_monday() as u64;
  date.checked_sub_days(Days::new(back)).unwrap_or(date)
}
