//! Core domain types and logic.

pub mod aggregator;
pub mod chart;
pub mod contribution;
pub mod error;
pub mod lookup;
pub mod selection;
pub mod series;
pub mod ticker;
