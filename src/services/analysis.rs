// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Descriptive analytics over the stored club dataset.
//!
//! - Who published the most rides
//! - Average speed per rider
//! - K-means clustering of rides on distance, speed and elevation gain

use crate::models::{
    ActivityRecord, ClusterReport, ClusterSummary, Dataset, RideCount, RideFeatures, Rider,
    RiderSpeed,
};
use std::collections::BTreeMap;

/// Default number of ride clusters (short, long, hilly).
pub const DEFAULT_CLUSTERS: usize = 3;

const MAX_ITERATIONS: usize = 100;
const MS_TO_KMH: f64 = 3.6;

/// Records with at least one positive measurement.
pub fn clean(dataset: &Dataset) -> impl Iterator<Item = &ActivityRecord> {
    dataset.iter().filter(|r| {
        r.distance.is_some_and(|v| v > 0.0)
            || r.moving_time.is_some_and(|v| v > 0)
            || r.elapsed_time.is_some_and(|v| v > 0)
            || r.total_elevation_gain.is_some_and(|v| v > 0.0)
    })
}

fn rider_of(record: &ActivityRecord) -> Rider {
    Rider {
        firstname: record.firstname.clone(),
        lastname: record.lastname.clone(),
    }
}

/// Average speed of one ride in m/s, if distance and moving time are known.
fn speed_ms(record: &ActivityRecord) -> Option<f64> {
    let distance = record.distance?;
    let moving_time = record.moving_time.filter(|t| *t > 0)?;
    Some(distance / moving_time as f64)
}

/// Rider(s) with the most published rides. Ties are all returned.
pub fn most_published_riders(dataset: &Dataset) -> Vec<RideCount> {
    let mut counts: BTreeMap<Rider, usize> = BTreeMap::new();
    for record in clean(dataset) {
        *counts.entry(rider_of(record)).or_default() += 1;
    }

    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };

    counts
        .into_iter()
        .filter(|(_, rides)| *rides == max)
        .map(|(rider, rides)| RideCount { rider, rides })
        .collect()
}

/// Mean per-ride speed for every rider with at least one timed ride.
pub fn average_speed_by_rider(dataset: &Dataset) -> Vec<RiderSpeed> {
    let mut sums: BTreeMap<Rider, (f64, usize)> = BTreeMap::new();
    for record in clean(dataset) {
        if let Some(speed) = speed_ms(record) {
            let entry = sums.entry(rider_of(record)).or_default();
            entry.0 += speed;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(rider, (total, rides))| {
            let speed_ms = total / rides as f64;
            RiderSpeed {
                rider,
                speed_ms,
                speed_kmh: speed_ms * MS_TO_KMH,
                rides,
            }
        })
        .collect()
}

/// Clustering features for every clean ride with a known speed.
pub fn ride_features(dataset: &Dataset) -> Vec<RideFeatures> {
    clean(dataset)
        .filter_map(|record| {
            let speed = speed_ms(record)?;
            Some(RideFeatures {
                distance_km: record.distance.unwrap_or_default() / 1000.0,
                speed_kmh: speed * MS_TO_KMH,
                elevation_gain_m: record.total_elevation_gain.unwrap_or_default(),
            })
        })
        .collect()
}

/// K-means over z-score standardized features.
///
/// Initial centroids are chosen by farthest-point selection starting from the
/// first ride, so results are deterministic. `k` is capped at the number of
/// rides. Cluster means are reported on the original scale, rounded to 2
/// decimals; empty clusters are omitted.
pub fn cluster_rides(features: &[RideFeatures], k: usize) -> ClusterReport {
    let k = k.min(features.len());
    if k == 0 {
        return ClusterReport::default();
    }

    let points = standardize(features);
    let mut centroids = initial_centroids(&points, k);
    let mut assignments = vec![usize::MAX; points.len()];

    for iteration in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (point, assigned) in points.iter().zip(assignments.iter_mut()) {
            let closest = nearest(point, &centroids);
            if *assigned != closest {
                *assigned = closest;
                changed = true;
            }
        }
        if !changed {
            tracing::debug!(iteration, "K-means converged");
            break;
        }

        for (c, centroid) in centroids.iter_mut().enumerate() {
            let members = points
                .iter()
                .zip(&assignments)
                .filter(|(_, a)| **a == c)
                .map(|(p, _)| *p);
            // An emptied cluster keeps its previous centroid.
            if let Some(mean) = mean_of(members) {
                *centroid = mean;
            }
        }
    }

    let clusters = (0..k)
        .filter_map(|c| {
            let members = features
                .iter()
                .zip(&assignments)
                .filter(|(_, a)| **a == c)
                .map(|(f, _)| f.to_array());
            let rides = assignments.iter().filter(|a| **a == c).count();
            let mean = mean_of(members)?;
            Some(ClusterSummary {
                cluster: c,
                rides,
                mean: RideFeatures {
                    distance_km: round2(mean[0]),
                    speed_kmh: round2(mean[1]),
                    elevation_gain_m: round2(mean[2]),
                },
            })
        })
        .collect();

    ClusterReport {
        assignments,
        clusters,
    }
}

fn standardize(features: &[RideFeatures]) -> Vec<[f64; 3]> {
    let raw: Vec<[f64; 3]> = features.iter().map(|f| f.to_array()).collect();
    let n = raw.len() as f64;

    let mut mean = [0.0; 3];
    let mut scale = [0.0; 3];
    for d in 0..3 {
        mean[d] = raw.iter().map(|p| p[d]).sum::<f64>() / n;
        let variance = raw.iter().map(|p| (p[d] - mean[d]).powi(2)).sum::<f64>() / n;
        // Constant columns are centered but not scaled.
        scale[d] = if variance > 0.0 { variance.sqrt() } else { 1.0 };
    }

    raw.iter()
        .map(|p| {
            let mut z = [0.0; 3];
            for d in 0..3 {
                z[d] = (p[d] - mean[d]) / scale[d];
            }
            z
        })
        .collect()
}

fn initial_centroids(points: &[[f64; 3]], k: usize) -> Vec<[f64; 3]> {
    let mut centroids = vec![points[0]];
    while centroids.len() < k {
        let mut best = 0;
        let mut best_distance = f64::NEG_INFINITY;
        for (i, point) in points.iter().enumerate() {
            let d = centroids
                .iter()
                .map(|c| squared_distance(point, c))
                .fold(f64::INFINITY, f64::min);
            if d > best_distance {
                best = i;
                best_distance = d;
            }
        }
        centroids.push(points[best]);
    }
    centroids
}

fn nearest(point: &[f64; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best_distance {
            best = c;
            best_distance = d;
        }
    }
    best
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn mean_of(points: impl Iterator<Item = [f64; 3]>) -> Option<[f64; 3]> {
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        for d in 0..3 {
            sum[d] += p[d];
        }
        count += 1;
    }
    (count > 0).then(|| sum.map(|s| s / count as f64))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
