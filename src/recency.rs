//! Highlight list items created today

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use log::debug;

use crate::config::RecencyDefaults;
use crate::dom::Dom;

pub const CREATED_ON_ATTR: &str = "data-created-on";

/// Source of "now" for the highlighter
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Midnight at the start of the current day
    fn start_of_today(&self) -> NaiveDateTime {
        self.now().date().and_time(chrono::NaiveTime::MIN)
    }
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parse a `data-created-on` value into local wall-clock time.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` and a
/// bare date (midnight).
pub fn parse_created_on(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Local).naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(stamp);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}

/// Mark every item created since midnight; returns how many were marked
pub fn highlight_recent<D: Dom, C: Clock>(dom: &mut D, config: &RecencyDefaults, clock: &C) -> usize {
    let midnight = clock.start_of_today();
    let mut marked = 0;
    for item in dom.elements_by_class(&config.item_class) {
        let Some(raw) = dom.attribute(&item, CREATED_ON_ATTR) else {
            continue;
        };
        match parse_created_on(&raw) {
            Some(created) if created >= midnight => {
                dom.add_class(&item, &config.today_class);
                marked += 1;
            }
            Some(_) => {}
            None => debug!("recency: unreadable {}=\"{}\"", CREATED_ON_ATTR, raw),
        }
    }
    marked
}
