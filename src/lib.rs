//! Fraud Dashboard - viewer for precomputed fraud-detection reports
//!
//! Loads the tab- and pipe-delimited files produced by the upstream MapReduce job,
//! cleans and ranks them, and renders tables and charts per report.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod gui;
pub mod stats;
