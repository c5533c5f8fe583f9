//! `spangapp` - read-only analytics over the Spacing Angels radar database
//!
//! This library loads the four datasets written by the roadside radar from
//! a local `SQLite` file, derives series from the iteration samples
//! (routes, cumulative distance, speed statistics), and renders each
//! dashboard section as a typed view.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod record;
pub mod render;
pub mod state;
pub mod store;

pub use config::Config;
pub use dataset::{Datasets, Table, Value};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Iteration, IterationStatus, Position};
pub use render::{render, RenderOptions, View};
pub use state::{DatasetKind, Section, Selection};
pub use store::{DatasetStats, Store};
