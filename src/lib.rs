pub mod settings;

pub mod error;

pub mod shutdown;

pub mod records;

pub mod catalog;

pub mod generator;

pub mod store;

pub mod loader;

pub mod workload;

pub use error::LoaderError;

/// Result type alias.
pub type Result<T> = std::result::Result<T, LoaderError>;
