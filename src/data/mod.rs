//! UI-free data layer: dataset records, curve sampling, projected columns,
//! error crosses and the derived ranking.

pub mod dataset;
pub mod detail;
pub mod error_bars;
pub mod export;
pub mod gas;
pub mod projection;
pub mod ranking;
pub mod sampler;
