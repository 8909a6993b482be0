pub mod analyzers;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod models;
pub mod readers;
pub mod settings;
pub mod utils;

pub use error::{ProcessingError, Result};
