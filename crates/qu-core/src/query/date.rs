//! Inclusive date ranges for date predicates

use chrono::NaiveDate;

use crate::bail_invalid;
use crate::codec::parse_date;
use crate::error::{QuError, Result};
use crate::idea::Idea;

use super::parse::split_array;

/// Which date of an idea a predicate looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Created,
    Edited,
    Consumed,
}

impl DateField {
    pub fn of(self, idea: &Idea) -> Option<NaiveDate> {
        match self {
            DateField::Created => Some(idea.created),
            DateField::Edited => Some(idea.edited),
            DateField::Consumed => idea.consumed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            bail_invalid!(
                "date range",
                format!("{start} is after {end}"),
            );
        }
        Ok(DateRange { start, end })
    }

    /// The whole of a calendar year
    pub fn year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| QuError::invalid_value("year", year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| QuError::invalid_value("year", year))?;
        Ok(DateRange { start, end })
    }

    /// Parse `YYYY-MM-DD`, a bare `YYYY`, or `[from,to]` where each bound
    /// is a date or a year
    pub fn parse(value: &str) -> Result<Self> {
        let parts = split_array(value);
        match parts.as_slice() {
            [single] => Self::parse_single(single),
            [from, to] => {
                let from = Self::parse_single(from)?;
                let to = Self::parse_single(to)?;
                Self::new(from.start, to.end)
            }
            _ => Err(QuError::invalid_value("date range", value)),
        }
    }

    fn parse_single(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
            let year = s
                .parse::<i32>()
                .map_err(|_| QuError::invalid_value("year", s))?;
            return Self::year(year);
        }
        let date = parse_date(s)?;
        Ok(DateRange {
            start: date,
            end: date,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
