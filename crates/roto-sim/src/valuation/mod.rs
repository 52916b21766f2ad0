// Projection loading and weight-independent player valuation.

pub mod projections;
pub mod zscore;
