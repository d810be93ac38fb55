pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::cli::LocalStorage;

pub use crate::core::{adder::add, engine::BatchEngine, pipeline::CasePipeline};
pub use crate::utils::error::{Result, SumError};
