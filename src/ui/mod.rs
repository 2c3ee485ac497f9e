//! egui rendering. Panels read [`AppState`](crate::state::AppState) and emit
//! [`Control`](crate::state::Control) events; they never compute statistics.

pub mod panels;
pub mod plot;
pub mod tables;
