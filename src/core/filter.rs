//! Client-side filtering of a loaded report list.

use crate::models::Shift;
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    /// Shifts still in progress
    Active,
    /// Closed shifts
    Completed,
}

/// Three independent predicates; an empty/`None` predicate matches everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub search: String,
    pub status: StatusFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    /// Case-insensitive substring match on the employee name.
    pub fn matches_search(&self, shift: &Shift) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || shift.user_name.to_lowercase().contains(&needle)
    }

    pub fn matches_status(&self, shift: &Shift) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => shift.is_in_progress,
            StatusFilter::Completed => !shift.is_in_progress,
        }
    }

    /// Day-granular and inclusive at both ends. Shifts without a readable
    /// start are not excluded by the range.
    pub fn matches_dates(&self, shift: &Shift, tz: Tz) -> bool {
        let Some(day) = shift.start_day(tz) else {
            return true;
        };
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        true
    }

    pub fn matches(&self, shift: &Shift, tz: Tz) -> bool {
        self.matches_search(shift) && self.matches_status(shift) && self.matches_dates(shift, tz)
    }

    pub fn apply<'a>(&self, shifts: &'a [Shift], tz: Tz) -> Vec<&'a Shift> {
        shifts.iter().filter(|s| self.matches(s, tz)).collect()
    }
}
