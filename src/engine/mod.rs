//! Comparison engine: everything the dashboard computes from the store.
//!
//! All functions borrow a [`DatasetStore`](crate::data::store::DatasetStore)
//! (or one of its datasets) and return plain view models; nothing here
//! touches the UI.

pub mod density;
pub mod distribution;
pub mod frequency;
pub mod means;
pub mod timeseries;

pub use distribution::{Distribution, compare_distribution};
pub use frequency::{FrequencyComparison, protocol_comparison};
pub use means::{MeanComparison, mean_comparison};
pub use timeseries::{TimeWindow, time_window};
