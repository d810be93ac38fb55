pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "digitsum")]
#[command(about = "Adds arbitrary-length decimal numbers held as digit lists")]
pub struct CliConfig {
    /// Left operand as a decimal digit string
    #[arg(long)]
    pub left: Option<String>,

    /// Right operand as a decimal digit string
    #[arg(long)]
    pub right: Option<String>,

    /// Path to a JSON case file; selects batch mode
    #[arg(long)]
    pub cases: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn cases_path(&self) -> &str {
        self.cases.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(cases) = &self.cases {
            validation::validate_non_empty_string("cases", cases)?;
        }
        Ok(())
    }
}
