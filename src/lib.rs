//! Explore AI job posting datasets: load a CSV, derive the aggregate views a
//! dashboard charts, filter by year / location / experience level and export
//! the matching rows.
//!
//! The `data` module is UI-free; `state` ties one loaded dataset to its
//! derived views and is what the desktop front end drives.

pub mod config;
pub mod data;
pub mod state;
