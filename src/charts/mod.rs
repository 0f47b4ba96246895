//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartKind, ChartPlotter, ChartSpec, FRAUD_COLOR, PALETTE, PRIMARY_COLOR};
