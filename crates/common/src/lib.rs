pub mod errors;
pub mod logger;
pub mod models;

pub use errors::SignalError;
pub use models::{Signal, SignalKind};
