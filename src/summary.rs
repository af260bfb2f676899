//! Daily aggregate over a city's same-day readings.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

use crate::{DailySummary, Reading};

// ---

/// Calendar date of `now` in the summary time zone.
pub fn local_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// True from 23:55:00 to 23:59:59 in the summary time zone.
///
/// With a polling interval of five minutes or more a day's window can fall
/// between two cycles and that day gets no summary.
pub fn in_late_day_window(now: DateTime<Utc>, offset: FixedOffset) -> bool {
    // ---
    let local = now.with_timezone(&offset);
    local.hour() == 23 && local.minute() >= 55
}

/// Summarize the readings of `city` that fall on `today`.
///
/// Returns `None` when there are none. The dominant condition is the most
/// frequent one; ties go to the condition seen first.
pub fn summarize(
    city: &str,
    readings: &[Reading],
    today: NaiveDate,
    offset: FixedOffset,
) -> Option<DailySummary> {
    // ---
    let todays: Vec<&Reading> = readings
        .iter()
        .filter(|r| local_date(r.timestamp, offset) == today)
        .collect();

    if todays.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut max_temp = f64::NEG_INFINITY;
    let mut min_temp = f64::INFINITY;
    for r in &todays {
        sum += r.temperature;
        max_temp = max_temp.max(r.temperature);
        min_temp = min_temp.min(r.temperature);
    }

    Some(DailySummary {
        city: city.to_string(),
        date: today,
        avg_temp: sum / todays.len() as f64,
        max_temp,
        min_temp,
        dominant_condition: dominant_condition(&todays),
    })
}

fn dominant_condition(readings: &[&Reading]) -> String {
    // ---
    // Counts kept in first-seen order so the strict `>` below keeps the
    // earliest condition on ties.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for r in readings {
        match counts.iter_mut().find(|(c, _)| *c == r.condition) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.condition.as_str(), 1)),
        }
    }

    let mut best = ("", 0);
    for &(condition, n) in &counts {
        if n > best.1 {
            best = (condition, n);
        }
    }
    best.0.to_string()
}
