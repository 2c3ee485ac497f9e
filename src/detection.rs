//! Precomputed anomaly-detection figures shown as a reference table.
//!
//! These numbers are demo data; nothing in this crate computes them.

use crate::data::model::DatasetLabel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRate {
    pub dataset: DatasetLabel,
    /// Share of rows a detector flagged as anomalous, in percent.
    pub detection_rate: f64,
    pub false_positive_rate: f64,
}

pub const DETECTION_DEMO: [DetectionRate; 4] = [
    DetectionRate {
        dataset: DatasetLabel::Real,
        detection_rate: 92.4,
        false_positive_rate: 3.1,
    },
    DetectionRate {
        dataset: DatasetLabel::Ctgan,
        detection_rate: 78.6,
        false_positive_rate: 7.9,
    },
    DetectionRate {
        dataset: DatasetLabel::TableGan,
        detection_rate: 74.2,
        false_positive_rate: 9.4,
    },
    DetectionRate {
        dataset: DatasetLabel::Custom,
        detection_rate: 88.1,
        false_positive_rate: 4.6,
    },
];

pub const DETECTION_HEADERS: [&str; 3] = ["Dataset", "Detection rate (%)", "False positives (%)"];
