//! Calendar month enumeration.
//!
//! Every per-month figure in the service (absences, working days, salaries)
//! is keyed by [`Month`]. Maps keyed by `Month` iterate in calendar order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar month, January through December.
///
/// Serializes as the full English month name (`"January"`).
///
/// # Example
///
/// ```
/// use attendance_payroll::models::Month;
///
/// let month: Month = "February".parse().unwrap();
/// assert_eq!(month, Month::February);
/// assert_eq!(month.abbreviation(), "Feb");
/// assert_eq!(month.absent_column(), "February_Absent");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Returns the full English name of the month.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Returns the three-letter abbreviation used in export headers.
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }

    /// Returns the storage column key for this month's absence count.
    pub fn absent_column(self) -> String {
        format!("{}_Absent", self.name())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| EngineError::validation("month", format!("unknown month '{}'", s)))
    }
}
