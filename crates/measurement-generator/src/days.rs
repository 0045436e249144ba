//! Day enumeration over a half-open calendar range.

use chrono::{DateTime, Days as ChronoDays, NaiveDate, NaiveTime, Utc};
use measurement_config::TimeLine;

/// Half-open range of calendar days `[from, to)`.
///
/// The range is cheap to copy and every call to [`DayRange::iter`] starts
/// over from `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DayRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Number of days in the range.
    pub fn len(&self) -> usize {
        (self.to - self.from).num_days().max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate UTC midnights from `from` up to, but excluding, `to`.
    pub fn iter(&self) -> Days {
        Days {
            next: self.from,
            end: self.to,
        }
    }
}

impl From<&TimeLine> for DayRange {
    fn from(time_line: &TimeLine) -> Self {
        Self::new(time_line.from, time_line.to)
    }
}

impl IntoIterator for &DayRange {
    type Item = DateTime<Utc>;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the days of a [`DayRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: NaiveDate,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }

        let day = self.next;
        // Past the last representable date there is nothing left to yield.
        self.next = day.checked_add_days(ChronoDays::new(1)).unwrap_or(self.end);
        Some(day.and_time(NaiveTime::MIN).and_utc())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).num_days().max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}
