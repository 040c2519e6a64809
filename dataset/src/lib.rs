pub mod dataset;
pub mod error;
pub mod label;
pub mod loader;
pub mod samples;

pub use dataset::{Dataset, DatasetConfig, Item, Subset};
pub use error::DatasetError;
pub use samples::{Sample, Samples};
