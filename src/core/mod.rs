pub mod adder;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AddCase, BatchResult, BatchSummary, CaseOutcome, Outcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
