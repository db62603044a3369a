pub mod config;
pub mod convert;
pub mod corpus;
pub mod error;
pub mod fingerprint;
pub mod inspect;
pub mod normalize;
pub mod pipeline;
pub mod types;
pub mod workflow;

pub use config::{CleanOptions, ConfigLoader, FlowsieveConfig};
pub use corpus::{CleanedExample, DecodeError, ParsedExample, RawExample};
pub use error::AppError;
pub use pipeline::RunStats;
pub use types::*;
pub use workflow::{Workflow, WorkflowNode};
