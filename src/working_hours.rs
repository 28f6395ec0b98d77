// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Business-duration arithmetic over a fixed weekly calendar with optional holidays
// role: calendar/working-hours
// inputs: Two instants; calendar policy (time zone, weekday office hours, holidays)
// outputs: chrono::Duration of working time between the instants
// invariants:
// - Default policy is Monday-Friday 09:00-17:00 in the calendar's time zone
// - Swapping the arguments negates the result
// - Intervals that fall into a DST gap are skipped
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

type Interval = (NaiveTime, NaiveTime);

#[derive(Debug, Clone)]
pub struct WorkingHours {
  tz: Tz,
  /// Indexed by days from Monday.
  week: [Vec<Interval>; 7],
  holidays: HashSet<NaiveDate>,
}

impl WorkingHours {
  pub fn new(tz: Tz) -> Self {
    let office: Vec<Interval> = match (NaiveTime::from_hms_opt(9, 0, 0), NaiveTime::from_hms_opt(17, 0, 0)) {
      (Some(open), Some(close)) => vec![(open, close)],
      _ => Vec::new(),
    };

    Self {
      tz,
      week: [
        office.clone(),
        office.clone(),
        office.clone(),
        office.clone(),
        office,
        Vec::new(),
        Vec::new(),
      ],
      holidays: HashSet::new(),
    }
  }

  pub fn with_holidays<I>(mut self, dates: I) -> Self
  where
    I: IntoIterator<Item = NaiveDate>,
  {
    self.holidays.extend(dates);
    self
  }

  /// Working time between `start` and `end`.
  pub fn business_duration<A, B>(&self, start: &DateTime<A>, end: &DateTime<B>) -> Duration
  where
    A: TimeZone,
    B: TimeZone,
  {
    let start = start.with_timezone(&Utc);
    let end = end.with_timezone(&Utc);

    if end < start {
      return -self.business_duration(&end, &start);
    }

    let mut total = Duration::zero();
    let mut day = start.with_timezone(&self.tz).date_naive();
    let last = end.with_timezone(&self.tz).date_naive();

    while day <= last {
      if !self.holidays.contains(&day) {
        for (open, close) in &self.week[day.weekday().num_days_from_monday() as usize] {
          let (Some(open), Some(close)) = (self.instant(day, *open), self.instant(day, *close)) else {
            continue;
          };
          let lo = open.max(start);
          let hi = close.min(end);

          if hi > lo {
            total += hi - lo;
          }
        }
      }

      day = match day.succ_opt() {
        Some(next) => next,
        None => break,
      };
    }

    total
  }

  fn instant(&self, day: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    self
      .tz
      .from_local_datetime(&day.and_time(time))
      .earliest()
      .map(|dt| dt.with_timezone(&Utc))
  }
}

impl Default for WorkingHours {
  fn default() -> Self {
    Self::new(chrono_tz::UTC)
  }
}
