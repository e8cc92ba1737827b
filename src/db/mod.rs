//! Storage layer (flat files).

pub mod credentials;
pub mod dataset;
pub mod files;

pub use credentials::CredentialsFile;
pub use dataset::{csv_path, DatasetStore};
