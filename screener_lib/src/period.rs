//! Chronological ordering of period column labels.
//!
//! The site labels quarters as `"<Mon> <YYYY>"` (e.g. `"Jun 2023"`), which
//! sorts wrongly as plain text across years. Labels are parsed into
//! (year, month) and compared numerically; anything unparseable (such as
//! `"TTM"`) sorts after every dated label, lexically among its peers.

use std::cmp::Ordering;

use chrono::Month;

/// A reporting period resolved to its closing month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
}

impl Period {
    /// Parses `"<Month> <YYYY>"` (full or 3-letter English month name, any
    /// case) or a bare `"<YYYY>"`, which is taken as December of that year.
    pub fn parse(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let first = parts.next()?;
        let second = parts.next();
        if parts.next().is_some() {
            return None;
        }
        match second {
            Some(year) => {
                let month = first.parse::<Month>().ok()?;
                Some(Self {
                    year: parse_year(year)?,
                    month: month.number_from_month(),
                })
            }
            None => parse_year(first).map(|year| Self { year, month: 12 }),
        }
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

/// Total order over period labels: dated labels chronologically, then
/// unparsed labels lexically. Labels resolving to the same month are ordered
/// by their text so the order stays deterministic.
pub fn compare_periods(a: &str, b: &str) -> Ordering {
    match (Period::parse(a), Period::parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn sort_periods(labels: &mut [String]) {
    labels.sort_by(|a, b| compare_periods(a, b));
}
