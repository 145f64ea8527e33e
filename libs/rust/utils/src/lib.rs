pub mod errors;
pub mod tracing;
pub mod types;
