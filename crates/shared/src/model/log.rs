use crate::{
    api::payloads::LogEntry,
    model::Exercise,
    utils::date::{format_epoch_millis, parse_date},
};

/// One end of a log date range.
///
/// A bound that doesn't parse is kept rather than dropped: it compares false
/// against every date, so a range with one excludes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    At(i64),
    Unparseable,
}

impl DateBound {
    /// Empty and missing values mean "no bound"
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        let value = value?.trim();
        if value.is_empty() {
            return None;
        }
        Some(match parse_date(value) {
            Some(date) => DateBound::At(date.timestamp_millis()),
            None => DateBound::Unparseable,
        })
    }

    fn at_or_before(&self, date: i64) -> bool {
        matches!(self, DateBound::At(bound) if *bound <= date)
    }

    fn at_or_after(&self, date: i64) -> bool {
        matches!(self, DateBound::At(bound) if *bound >= date)
    }
}

/// Inclusive date range applied to an already limited set of exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogFilter {
    pub from: Option<DateBound>,
    pub to: Option<DateBound>,
}

impl LogFilter {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: DateBound::from_query(from),
            to: DateBound::from_query(to),
        }
    }

    pub fn admits(&self, date: i64) -> bool {
        match (&self.from, &self.to) {
            (None, None) => true,
            (Some(from), Some(to)) => from.at_or_before(date) && to.at_or_after(date),
            (Some(from), None) => from.at_or_before(date),
            (None, Some(to)) => to.at_or_after(date),
        }
    }

    /// Keeps the admitted exercises, in order, as response entries
    pub fn apply<'a, I>(&self, exercises: I) -> Vec<LogEntry>
    where
        I: IntoIterator<Item = &'a Exercise>,
    {
        exercises
            .into_iter()
            .filter(|e| self.admits(e.date))
            .map(LogEntry::from)
            .collect()
    }
}

impl From<&Exercise> for LogEntry {
    fn from(exercise: &Exercise) -> Self {
        LogEntry {
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: format_epoch_millis(exercise.date).unwrap_or_else(|| "Invalid Date".to_string()),
        }
    }
}
