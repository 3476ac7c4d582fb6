pub mod analyzers;
pub mod cache;
pub mod cli;
pub mod error;
pub mod models;
pub mod readers;
pub mod utils;

pub use error::{ProcessingError, Result};
