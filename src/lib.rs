pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod process;
pub mod schema;
pub mod store;
pub mod visual;

pub use error::PipelineError;
