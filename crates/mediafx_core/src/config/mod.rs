//! Configuration for the filter pipelines.
//!
//! Settings are stored as TOML and organized into sections. The web layer
//! loads them once at startup and passes them to the pipeline constructors.

mod manager;
mod settings;

pub use manager::{load_from, load_or_default, save_to};
pub use settings::{LoggingSettings, PathSettings, Settings, ToolSettings};
