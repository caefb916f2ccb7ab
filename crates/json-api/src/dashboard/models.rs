//! Dashboard response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use dormitory::dashboard::{Bucket, Overview, Series};
use dormitory_app::dashboard::models::DashboardStats;

/// Overview
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OverviewResponse {
    pub total_rooms: u32,
    pub available_rooms: u32,
    pub occupied_rooms: u32,
    pub maintenance_rooms: u32,
    pub total_capacity: u32,
    pub total_occupied: u32,

    /// Percentage of places taken, one decimal place
    pub occupancy_rate: String,

    pub pending_assignments: u32,
    pub active_assignments: u32,
    pub tenants: u32,
}

impl From<Overview> for OverviewResponse {
    fn from(overview: Overview) -> Self {
        Self {
            total_rooms: overview.total_rooms,
            available_rooms: overview.available_rooms,
            occupied_rooms: overview.occupied_rooms,
            maintenance_rooms: overview.maintenance_rooms,
            total_capacity: overview.total_capacity,
            total_occupied: overview.total_occupied,
            occupancy_rate: overview.occupancy_rate().to_string(),
            pending_assignments: overview.pending_assignments,
            active_assignments: overview.active_assignments,
            tenants: overview.tenants,
        }
    }
}

/// Bucket
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BucketResponse {
    pub label: String,
    pub income: String,
    pub check_ins: u32,
    pub check_outs: u32,
    pub cancellations: u32,
}

impl From<Bucket> for BucketResponse {
    fn from(bucket: Bucket) -> Self {
        Self {
            label: bucket.label,
            income: bucket.income.to_string(),
            check_ins: bucket.check_ins,
            check_outs: bucket.check_outs,
            cancellations: bucket.cancellations,
        }
    }
}

/// Series
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SeriesResponse {
    pub buckets: Vec<BucketResponse>,
    pub totals: BucketResponse,
}

impl From<Series> for SeriesResponse {
    fn from(series: Series) -> Self {
        let totals = series.totals().into();

        Self {
            buckets: series.buckets.into_iter().map(Into::into).collect(),
            totals,
        }
    }
}

/// Dashboard Stats Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardStatsResponse {
    pub overview: OverviewResponse,

    /// First day of the reported month, `YYYY-MM-DD`
    pub month: String,

    pub year: i16,

    /// One bucket per day of the reported month
    pub monthly: SeriesResponse,

    /// One bucket per month of the reported year
    pub yearly: SeriesResponse,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            overview: stats.overview.into(),
            month: stats.month.to_string(),
            year: stats.year,
            monthly: stats.series.monthly.into(),
            yearly: stats.series.yearly.into(),
        }
    }
}
