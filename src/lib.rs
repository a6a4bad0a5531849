//! Separation explorer crate root: module wiring and re-exports.
//!
//! - `data`: dataset model, curve sampling, metric projection, error bars and ranking
//! - `isotherm`: isotherm curves and the background loader that fetches them
//! - `state` / `controller`: selection state and the engine that keeps every
//!   derived output in step with it
//! - `panels` / `app`: the egui front end

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod isotherm;
pub mod panels;
pub mod state;

pub use app::{run_explorer, ExplorerApp};
pub use color_scheme::ColorScheme;
pub use config::ExplorerConfig;
pub use controller::{Explorer, ExplorerUpdate};
pub use data::dataset::{Dataset, GasRecord, MaterialRecord};
pub use data::gas::{Gas, GasPair, GasSlot};
pub use data::projection::{MetricFamily, PressureParams, ProjectedTable};
pub use error::{ExplorerError, Result};
pub use isotherm::{DirectoryFetcher, FetchedIsotherm, IsothermFetch};
pub use state::{SelectionMode, SelectionState};
