//! Descriptive statistics over the club dataset.

use serde::Serialize;

/// A rider, identified the way the club feed exposes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Rider {
    pub firstname: String,
    pub lastname: String,
}

impl std::fmt::Display for Rider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.firstname, self.lastname)
    }
}

/// Number of published rides for a rider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideCount {
    pub rider: Rider,
    pub rides: usize,
}

/// Mean per-ride speed for a rider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiderSpeed {
    pub rider: Rider,
    /// Meters per second
    pub speed_ms: f64,
    /// Kilometers per hour
    pub speed_kmh: f64,
    /// Rides that contributed (rides without moving time are skipped)
    pub rides: usize,
}

/// Features a ride is clustered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RideFeatures {
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub elevation_gain_m: f64,
}

impl RideFeatures {
    pub(crate) fn to_array(self) -> [f64; 3] {
        [self.distance_km, self.speed_kmh, self.elevation_gain_m]
    }
}

/// Mean features of one cluster, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub rides: usize,
    pub mean: RideFeatures,
}

/// Result of clustering the club's rides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterReport {
    /// Cluster index per clustered ride, in dataset order
    pub assignments: Vec<usize>,
    pub clusters: Vec<ClusterSummary>,
}
