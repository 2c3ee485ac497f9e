//! Gaussian kernel density estimates for overlaying feature distributions.

use std::f64::consts::PI;

use serde::Serialize;
use statrs::statistics::{Data, Distribution};

use crate::data::model::DatasetLabel;

/// Number of evaluation points per curve.
pub const GRID_POINTS: usize = 200;

/// How many bandwidths the grid extends past the data range on each side.
pub const CUT: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    pub dataset: DatasetLabel,
    pub bandwidth: f64,
    /// `[x, density]` pairs, x ascending.
    pub points: Vec<[f64; 2]>,
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Data::new(values.to_vec()).std_dev()
}

/// Scott's rule: `σ · n^(-1/5)`. `None` for fewer than two values or zero spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values)?;
    if !std.is_finite() || std <= 0.0 {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// Evaluate a Gaussian KDE of `values` on `grid_points` evenly spaced points.
///
/// Returns the bandwidth used and the curve.
pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Option<(f64, Vec<[f64; 2]>)> {
    let h = scott_bandwidth(values)?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - CUT * h;
    let hi = max + CUT * h;
    let steps = grid_points.max(2) - 1;
    let step = (hi - lo) / steps as f64;
    let norm = 1.0 / (values.len() as f64 * h * (2.0 * PI).sqrt());

    let points = (0..=steps)
        .map(|i| {
            let x = lo + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / h;
                    (-0.5 * z * z).exp()
                })
                .sum();
            [x, sum * norm]
        })
        .collect();

    Some((h, points))
}

pub fn density_curve(dataset: DatasetLabel, values: &[f64]) -> Option<DensityCurve> {
    let (bandwidth, points) = gaussian_kde(values, GRID_POINTS)?;
    Some(DensityCurve {
        dataset,
        bandwidth,
        points,
    })
}
