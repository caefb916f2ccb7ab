//! Date filtering for printed transaction lists.

use jiff::civil::Date;

use super::DashboardError;

/// Optional, inclusive date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFilter {
    start: Option<Date>,
    end: Option<Date>,
}

impl DateFilter {
    /// Build a filter; either bound may be open.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvertedRange`] when both bounds are given and
    /// `end` precedes `start`.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Result<Self, DashboardError> {
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            return Err(DashboardError::InvertedRange);
        }

        Ok(Self { start, end })
    }

    /// Lower bound.
    #[must_use]
    pub const fn start(&self) -> Option<Date> {
        self.start
    }

    /// Upper bound.
    #[must_use]
    pub const fn end(&self) -> Option<Date> {
        self.end
    }

    /// Whether the inclusive span `first..=last` touches the filter.
    #[must_use]
    pub fn overlaps(&self, first: Date, last: Date) -> bool {
        self.start.is_none_or(|start| last >= start) && self.end.is_none_or(|end| first <= end)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn open_filter_matches_everything() {
        assert!(DateFilter::default().overlaps(date(1999, 1, 1), date(1999, 1, 2)));
    }

    #[test]
    fn spans_touching_either_edge_overlap() -> TestResult {
        let filter = DateFilter::new(Some(date(2024, 3, 1)), Some(date(2024, 3, 31)))?;

        assert!(filter.overlaps(date(2024, 2, 20), date(2024, 3, 1)));
        assert!(filter.overlaps(date(2024, 3, 31), date(2024, 4, 10)));
        assert!(filter.overlaps(date(2024, 1, 1), date(2024, 12, 31)));
        assert!(!filter.overlaps(date(2024, 2, 1), date(2024, 2, 29)));
        assert!(!filter.overlaps(date(2024, 4, 1), date(2024, 4, 2)));

        Ok(())
    }

    #[test]
    fn half_open_filters() -> TestResult {
        let from = DateFilter::new(Some(date(2024, 3, 1)), None)?;
        let until = DateFilter::new(None, Some(date(2024, 3, 1)))?;

        assert!(from.overlaps(date(2030, 1, 1), date(2030, 1, 2)));
        assert!(!from.overlaps(date(2024, 2, 1), date(2024, 2, 2)));
        assert!(until.overlaps(date(2000, 1, 1), date(2000, 1, 2)));
        assert!(!until.overlaps(date(2024, 3, 2), date(2024, 3, 3)));

        Ok(())
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_eq!(
            DateFilter::new(Some(date(2024, 3, 2)), Some(date(2024, 3, 1))),
            Err(DashboardError::InvertedRange)
        );
    }
}
