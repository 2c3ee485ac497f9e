//! Rusty Traffic: compare a real network-traffic dataset with synthetic ones.
//!
//! The binary wires [`app::RustyTrafficApp`] into eframe; everything it shows
//! is computed by [`engine`] and [`game`] from a [`data::store::DatasetStore`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod detection;
pub mod engine;
pub mod error;
pub mod export;
pub mod game;
pub mod state;
pub mod ui;
