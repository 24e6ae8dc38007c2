use serde::{Deserialize, Serialize};

/// One BGC row of the distance table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DistanceRecord {
    pub strain: String,
    pub distance: f64,
    pub completeness: String,
}

impl DistanceRecord {
    pub fn is_complete(&self) -> bool {
        self.completeness == "complete"
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LengthRecord {
    pub strain: String,
    pub length: f64,
}

/// Column names of the result table, in `StrainMetric` field order.
pub const METRIC_COLUMNS: [&str; 6] = [
    "strain",
    "sum_distances",
    "#_Clusters",
    "Length",
    "Mean_distance",
    "BiNI_Complete_BCGS",
];

/// Per-strain result row. Written without headers, under `METRIC_COLUMNS`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrainMetric {
    pub strain: String,
    pub sum_distances: f64,
    pub cluster_count: usize,
    pub length: f64,
    pub mean_distance: f64,
    pub bini: f64,
}
