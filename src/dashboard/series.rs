//! Time-bucketed series.

use rust_decimal::Decimal;

/// Activity recorded in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bucket {
    /// Day of month (`"1"`..`"31"`) or month abbreviation (`"Jan"`..`"Dec"`).
    pub label: String,
    /// Income attributed to the bucket.
    pub income: Decimal,
    /// Stays that began in the bucket.
    pub check_ins: u32,
    /// Stays completed in the bucket.
    pub check_outs: u32,
    /// Bookings cancelled in the bucket.
    pub cancellations: u32,
}

/// Ordered buckets plus their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    /// Buckets in chronological order.
    pub buckets: Vec<Bucket>,
}

impl Series {
    pub(crate) fn labelled(labels: impl IntoIterator<Item = String>) -> Self {
        Self {
            buckets: labels
                .into_iter()
                .map(|label| Bucket {
                    label,
                    ..Bucket::default()
                })
                .collect(),
        }
    }

    pub(crate) fn bucket_mut(&mut self, index: Option<usize>) -> Option<&mut Bucket> {
        index.and_then(|index| self.buckets.get_mut(index))
    }

    /// Sum of every bucket.
    #[must_use]
    pub fn totals(&self) -> Bucket {
        self.buckets.iter().fold(
            Bucket {
                label: "total".to_string(),
                ..Bucket::default()
            },
            |mut total, bucket| {
                total.income += bucket.income;
                total.check_ins += bucket.check_ins;
                total.check_outs += bucket.check_outs;
                total.cancellations += bucket.cancellations;
                total
            },
        )
    }
}
